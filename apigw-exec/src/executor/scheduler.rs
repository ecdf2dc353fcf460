use apigw_core::EndpointAddress;

use crate::executor::builder::EndpointBuilder;
use crate::executor::concurrency::ConcurrencyLimit;
use crate::executor::result::{BuildStep, DeployError};
use crate::executor::types::{BuildOutcome, BuildRequest};
use crate::state::StateProvider;

#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Endpoint runs in flight at once.
    pub concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

#[derive(Debug, Clone, Default)]
pub enum EndpointSelection {
    #[default]
    All,
    Only(Vec<EndpointAddress>),
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct EndpointFailure {
    pub endpoint: String,
    /// `None` when the run itself aborted (panicked) rather than failing a step.
    pub step: Option<BuildStep>,
    pub error: String,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct DeployReport {
    pub deployed: Vec<BuildOutcome>,
    pub failed: Vec<EndpointFailure>,
}

impl DeployReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs many endpoint builds concurrently. Each run is its own failure domain: a failed
/// or panicking run is recorded and the others carry on.
pub struct BatchDeployer {
    builder: EndpointBuilder,
    config: BatchConfig,
}

impl BatchDeployer {
    pub fn new(builder: EndpointBuilder, config: BatchConfig) -> Self {
        Self { builder, config }
    }

    /// Resolve the selected endpoints into build requests. Fails before any run starts
    /// if an address is unknown or its function has no deployed name.
    pub fn plan(
        &self,
        state: &dyn StateProvider,
        stage: &str,
        region: &str,
        selection: &EndpointSelection,
    ) -> Result<Vec<BuildRequest>, DeployError> {
        let all = state.endpoints_by_path();
        let chosen = match selection {
            EndpointSelection::All => all,
            EndpointSelection::Only(addresses) => {
                let mut chosen = Vec::with_capacity(addresses.len());
                for address in addresses {
                    let found = all
                        .iter()
                        .find(|(a, _)| a == address)
                        .cloned()
                        .ok_or_else(|| DeployError::EndpointNotFound(address.to_string()))?;
                    chosen.push(found);
                }
                chosen
            }
        };

        let rest_api_name = state.rest_api_name(stage, region);
        let iam_role_arn = state.iam_role_arn(stage, region);

        chosen
            .into_iter()
            .map(|(address, endpoint)| {
                let function_name = state
                    .deployed_function(&address.function)
                    .ok_or_else(|| DeployError::FunctionNotFound(address.to_string()))?;
                Ok(BuildRequest {
                    endpoint_name: address.to_string(),
                    endpoint,
                    stage: stage.to_string(),
                    region: region.to_string(),
                    iam_role_arn: iam_role_arn.clone(),
                    rest_api_name: rest_api_name.clone(),
                    function_name,
                })
            })
            .collect()
    }

    pub async fn deploy(
        &self,
        state: &dyn StateProvider,
        stage: &str,
        region: &str,
        selection: &EndpointSelection,
    ) -> Result<DeployReport, DeployError> {
        let requests = self.plan(state, stage, region, selection)?;
        Ok(self.run_all(requests).await)
    }

    /// Build every request; the report keeps request order.
    pub async fn run_all(&self, requests: Vec<BuildRequest>) -> DeployReport {
        let limit = ConcurrencyLimit::new(self.config.concurrency);
        tracing::info!(
            endpoints = requests.len(),
            concurrency = self.config.concurrency,
            "deploying endpoints"
        );

        let mut handles = Vec::with_capacity(requests.len());
        for request in requests {
            let name = request.endpoint_name.clone();
            let builder = self.builder.clone();
            let limit = limit.clone();
            let handle = tokio::spawn(async move {
                let _permit = limit.acquire().await;
                builder.build(request).await
            });
            handles.push((name, handle));
        }

        let mut report = DeployReport::default();
        for (name, handle) in handles {
            match handle.await {
                Ok(Ok(outcome)) => report.deployed.push(outcome),
                Ok(Err(e)) => report.failed.push(EndpointFailure {
                    endpoint: name,
                    step: Some(e.step),
                    error: e.source.to_string(),
                }),
                Err(e) => report.failed.push(EndpointFailure {
                    endpoint: name,
                    step: None,
                    error: format!("run aborted: {e}"),
                }),
            }
        }
        report
    }
}
