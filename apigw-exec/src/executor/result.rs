use std::fmt;

use apigw_core::ValidationError;

use crate::services::ServiceError;

/// The fixed sequence of steps in one endpoint run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStep {
    Validate,
    ResolveRestApi,
    FetchFunction,
    ListResources,
    Resources,
    Method,
    Integration,
    MethodResponses,
    IntegrationResponses,
    Permission,
}

impl BuildStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStep::Validate => "validate",
            BuildStep::ResolveRestApi => "resolve_rest_api",
            BuildStep::FetchFunction => "fetch_function",
            BuildStep::ListResources => "list_resources",
            BuildStep::Resources => "resources",
            BuildStep::Method => "method",
            BuildStep::Integration => "integration",
            BuildStep::MethodResponses => "method_responses",
            BuildStep::IntegrationResponses => "integration_responses",
            BuildStep::Permission => "permission",
        }
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("precondition failed: {0}")]
    Precondition(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("API Gateway REST API with the name {0:?} was not found")]
    RestApiNotFound(String),
    #[error("parent resource {parent} of {path} is missing")]
    MissingParent { path: String, parent: String },
    #[error("response {key:?} failed: {source}")]
    Response {
        key: String,
        #[source]
        source: ServiceError,
    },
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl StepError {
    /// The remote error behind this failure, if any.
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            StepError::Service(e) | StepError::Response { source: e, .. } => Some(e),
            _ => None,
        }
    }
}

/// A failed endpoint run: which endpoint, which step, and why.
#[derive(Debug, thiserror::Error)]
#[error("endpoint {endpoint} failed at step {step}: {source}")]
pub struct BuildError {
    pub endpoint: String,
    pub step: BuildStep,
    #[source]
    pub source: StepError,
}

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("endpoint not found: {0}")]
    EndpointNotFound(String),
    #[error("no deployed function known for endpoint {0}")]
    FunctionNotFound(String),
}
