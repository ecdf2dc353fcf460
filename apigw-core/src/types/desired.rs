use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::paths::canonical_path;
use crate::templates::prepare_request_templates;
use crate::types::Endpoint;
use crate::validate::validate_endpoint;

pub const DEFAULT_INTEGRATION_TYPE: &str = "AWS";

/// The validated, canonical desired state of one endpoint.
///
/// Built only through [`DesiredEndpoint::from_endpoint`], which enforces that every
/// required field was present.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DesiredEndpoint {
    /// Starts with `/`, no trailing slash (except the root itself).
    pub path: String,
    /// Uppercase HTTP verb.
    pub method: String,
    pub integration_type: String,
    pub authorization_type: String,
    pub api_key_required: bool,
    pub request_parameters: BTreeMap<String, String>,
    pub request_models: BTreeMap<String, String>,
    /// Already serialized and rewritten; ready to send.
    pub request_templates: BTreeMap<String, String>,
    pub responses: BTreeMap<String, DesiredResponse>,
    pub cache_key_parameters: Vec<String>,
    pub cache_namespace: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DesiredResponse {
    pub status_code: String,
    pub selection_pattern: Option<String>,
    pub response_parameters: BTreeMap<String, String>,
    pub response_models: BTreeMap<String, String>,
    pub response_templates: BTreeMap<String, String>,
}

impl DesiredEndpoint {
    pub fn from_endpoint(endpoint: &Endpoint) -> Result<Self, ValidationError> {
        validate_endpoint(endpoint, "$")?;

        // validate_endpoint guarantees presence of these; defaults are unreachable.
        let responses = endpoint
            .responses
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|(key, r)| {
                let resp = DesiredResponse {
                    status_code: r.status_code.unwrap_or_default(),
                    selection_pattern: r.selection_pattern,
                    response_parameters: r.response_parameters,
                    response_models: r.response_models,
                    response_templates: r.response_templates,
                };
                (key, resp)
            })
            .collect();

        Ok(Self {
            path: canonical_path(endpoint.path.as_deref().unwrap_or_default()),
            method: endpoint
                .method
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_ascii_uppercase(),
            integration_type: endpoint
                .integration_type
                .clone()
                .unwrap_or_else(|| DEFAULT_INTEGRATION_TYPE.to_string()),
            authorization_type: endpoint.authorization_type.clone().unwrap_or_default(),
            api_key_required: endpoint.api_key_required.unwrap_or(false),
            request_parameters: endpoint.request_parameters.clone().unwrap_or_default(),
            request_models: endpoint.request_models.clone().unwrap_or_default(),
            request_templates: prepare_request_templates(
                endpoint.request_templates.as_ref().unwrap_or(&BTreeMap::new()),
            ),
            responses,
            cache_key_parameters: endpoint.cache_key_parameters.clone().unwrap_or_default(),
            cache_namespace: endpoint.cache_namespace.clone(),
        })
    }

    /// Method-side request parameter names, each flagged as declared.
    ///
    /// API Gateway only wants to know which `method.request.*` parameters exist; the
    /// mapping expressions themselves belong to the integration.
    pub fn method_request_parameters(&self) -> BTreeMap<String, bool> {
        self.request_parameters
            .values()
            .map(|source| (source.clone(), true))
            .collect()
    }
}

impl DesiredResponse {
    pub fn method_response_parameters(&self) -> BTreeMap<String, bool> {
        self.response_parameters
            .keys()
            .map(|name| (name.clone(), true))
            .collect()
    }
}
