use apigw_core::Endpoint;

use crate::retry::RetryConfig;
use crate::services::ApiResource;

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub retry: RetryConfig,
    /// Lambda alias baked into the integration URI. When unset the URI references the
    /// `functionAlias` stage variable and API Gateway resolves it per stage.
    pub alias_override: Option<String>,
}

/// Everything one endpoint run needs from upstream.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Display name of the endpoint, e.g. `users/show@/users/{id}~GET`.
    pub endpoint_name: String,
    /// Populated endpoint; validated by the run itself.
    pub endpoint: Endpoint,
    pub stage: String,
    pub region: String,
    pub iam_role_arn: Option<String>,
    pub rest_api_name: Option<String>,
    pub function_name: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildOutcome {
    pub endpoint: String,
    pub method: String,
    pub path: String,
    pub url: String,
    pub rest_api_id: String,
    pub function_name: String,
    pub created_resources: Vec<ApiResource>,
}
