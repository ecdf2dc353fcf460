use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::services::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RestApi {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ApiResource {
    pub id: String,
    pub parent_id: Option<String>,
    pub path_part: Option<String>,
    pub path: String,
}

/// What is currently deployed for a method, as far as the engine cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingMethod {
    pub http_method: String,
    pub authorization_type: Option<String>,
    pub api_key_required: bool,
    pub integration: Option<IntegrationSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct IntegrationSummary {
    pub integration_type: Option<String>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PutMethodInput {
    pub http_method: String,
    pub authorization_type: String,
    pub api_key_required: bool,
    pub request_models: BTreeMap<String, String>,
    /// `method.request.*` name -> declared
    pub request_parameters: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PutIntegrationInput {
    pub http_method: String,
    pub integration_type: String,
    pub integration_http_method: String,
    pub uri: String,
    pub request_parameters: BTreeMap<String, String>,
    pub request_templates: BTreeMap<String, String>,
    pub cache_key_parameters: Vec<String>,
    pub cache_namespace: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PutMethodResponseInput {
    pub http_method: String,
    pub status_code: String,
    pub response_parameters: BTreeMap<String, bool>,
    pub response_models: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PutIntegrationResponseInput {
    pub http_method: String,
    pub status_code: String,
    /// `None` makes this the default (catch-all) response.
    pub selection_pattern: Option<String>,
    pub response_parameters: BTreeMap<String, String>,
    pub response_templates: BTreeMap<String, String>,
}

/// The API Gateway control-plane calls the engine issues.
#[async_trait]
pub trait ApiGatewayClient: Send + Sync {
    async fn find_rest_api_by_name(&self, name: &str) -> Result<Option<RestApi>, ServiceError>;

    /// All resources of the REST API, across pages.
    async fn get_resources(&self, rest_api_id: &str) -> Result<Vec<ApiResource>, ServiceError>;

    async fn create_resource(
        &self,
        rest_api_id: &str,
        parent_id: &str,
        path_part: &str,
    ) -> Result<ApiResource, ServiceError>;

    /// `Ok(None)` when the method does not exist on the resource.
    async fn get_method(
        &self,
        rest_api_id: &str,
        resource_id: &str,
        http_method: &str,
    ) -> Result<Option<ExistingMethod>, ServiceError>;

    async fn delete_method(
        &self,
        rest_api_id: &str,
        resource_id: &str,
        http_method: &str,
    ) -> Result<(), ServiceError>;

    async fn put_method(
        &self,
        rest_api_id: &str,
        resource_id: &str,
        input: &PutMethodInput,
    ) -> Result<(), ServiceError>;

    async fn put_integration(
        &self,
        rest_api_id: &str,
        resource_id: &str,
        input: &PutIntegrationInput,
    ) -> Result<IntegrationSummary, ServiceError>;

    async fn put_method_response(
        &self,
        rest_api_id: &str,
        resource_id: &str,
        input: &PutMethodResponseInput,
    ) -> Result<(), ServiceError>;

    async fn put_integration_response(
        &self,
        rest_api_id: &str,
        resource_id: &str,
        input: &PutIntegrationResponseInput,
    ) -> Result<(), ServiceError>;
}
