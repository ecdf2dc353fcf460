//! Lookups the engine needs from whatever describes the deployment target.

use std::sync::Arc;

use apigw_core::{Endpoint, EndpointAddress, ProjectDocument};

/// Typed access to per-stage variables and project endpoints.
pub trait StateProvider: Send + Sync {
    /// Name of the REST API to deploy into.
    fn rest_api_name(&self, stage: &str, region: &str) -> Option<String>;

    /// Execution role of the project's functions; its ARN carries the account number.
    fn iam_role_arn(&self, stage: &str, region: &str) -> Option<String>;

    /// Every endpoint of the project keyed by its address.
    fn endpoints_by_path(&self) -> Vec<(EndpointAddress, Endpoint)>;

    /// Deployed Lambda function name for a function path.
    fn deployed_function(&self, function_path: &str) -> Option<String>;

    fn endpoint(&self, address: &EndpointAddress) -> Option<Endpoint> {
        self.endpoints_by_path()
            .into_iter()
            .find(|(a, _)| a == address)
            .map(|(_, e)| e)
    }
}

/// [`StateProvider`] over a parsed project document.
#[derive(Debug, Clone)]
pub struct ProjectStateProvider {
    project: Arc<ProjectDocument>,
}

impl ProjectStateProvider {
    pub fn new(project: ProjectDocument) -> Self {
        Self {
            project: Arc::new(project),
        }
    }

    pub fn project(&self) -> &ProjectDocument {
        &self.project
    }
}

impl StateProvider for ProjectStateProvider {
    fn rest_api_name(&self, stage: &str, region: &str) -> Option<String> {
        self.project
            .region_variables(stage, region)?
            .api_gateway_api
            .clone()
            .filter(|s| !s.trim().is_empty())
    }

    fn iam_role_arn(&self, stage: &str, region: &str) -> Option<String> {
        self.project
            .region_variables(stage, region)?
            .iam_role_arn_lambda
            .clone()
            .filter(|s| !s.trim().is_empty())
    }

    fn endpoints_by_path(&self) -> Vec<(EndpointAddress, Endpoint)> {
        self.project
            .endpoints()
            .into_iter()
            .map(|(a, e)| (a, e.clone()))
            .collect()
    }

    fn deployed_function(&self, function_path: &str) -> Option<String> {
        self.project.deployed_function_name(function_path)
    }
}
