use std::collections::BTreeMap;

use crate::types::common::string_or_number;
use crate::types::Extensions;

/// Endpoint as described in a project document, with all variables already populated.
///
/// Required fields are optional here so that a missing field surfaces as a validation
/// violation instead of a deserialization error.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Endpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Integration type; `AWS` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "type")]
    pub integration_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "authorizationType")]
    pub authorization_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "apiKeyRequired")]
    pub api_key_required: Option<bool>,

    /// Integration-side name -> method-side source expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "requestParameters")]
    pub request_parameters: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "requestModels")]
    pub request_models: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "requestTemplates")]
    pub request_templates: Option<BTreeMap<String, RequestTemplate>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<BTreeMap<String, ResponseSpec>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "cacheKeyParameters")]
    pub cache_key_parameters: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "cacheNamespace")]
    pub cache_namespace: Option<String>,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}

/// A request template body: either the literal mapping template or a structured value
/// that gets serialized before it is sent to API Gateway.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum RequestTemplate {
    Text(String),
    Structured(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct ResponseSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "statusCode", deserialize_with = "string_or_number")]
    pub status_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "selectionPattern")]
    pub selection_pattern: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[serde(rename = "responseParameters")]
    pub response_parameters: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[serde(rename = "responseModels")]
    pub response_models: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[serde(rename = "responseTemplates")]
    pub response_templates: BTreeMap<String, String>,
}
