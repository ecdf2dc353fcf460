use std::future::Future;
use std::sync::Arc;

use apigw_core::naming::{account_number_from_role_arn, invoke_url, STAGE_VARIABLE_ALIAS};
use apigw_core::DesiredEndpoint;
use uuid::Uuid;

use crate::executor::context::{ResourceCache, RunContext};
use crate::executor::events::{Event, EventSink};
use crate::executor::result::{BuildError, BuildStep, StepError};
use crate::executor::retrying::RetryingClient;
use crate::executor::types::{BuildOutcome, BuildRequest, EngineConfig};
use crate::reconcile::{
    integration_input, reconcile_integration, reconcile_integration_responses,
    reconcile_method, reconcile_method_responses, reconcile_permission, resolve_resource_tree,
    MethodTransition, PermissionTarget,
};
use crate::services::{ApiGatewayClient, LambdaClient};

/// Deploys one endpoint: validate, resolve the REST API and function, then converge
/// resources, method, integration, responses and permission, in that order.
///
/// The first failing step aborts the run. Nothing already applied is rolled back.
#[derive(Clone)]
pub struct EndpointBuilder {
    api: Arc<dyn ApiGatewayClient>,
    lambda: Arc<dyn LambdaClient>,
    event_sink: Arc<dyn EventSink>,
    config: EngineConfig,
}

struct Prepared {
    endpoint: DesiredEndpoint,
    account_number: String,
    rest_api_name: String,
}

impl EndpointBuilder {
    pub fn new(
        api: Arc<dyn ApiGatewayClient>,
        lambda: Arc<dyn LambdaClient>,
        event_sink: Arc<dyn EventSink>,
        config: EngineConfig,
    ) -> Self {
        Self {
            api,
            lambda,
            event_sink,
            config,
        }
    }

    pub async fn build(&self, request: BuildRequest) -> Result<BuildOutcome, BuildError> {
        let run_id = Uuid::new_v4();
        self.event_sink
            .emit(Event::RunStarted {
                run_id,
                endpoint: request.endpoint_name.clone(),
            })
            .await;

        let result = self.run(run_id, &request).await;

        match &result {
            Ok(outcome) => {
                tracing::info!(endpoint = %request.endpoint_name, url = %outcome.url, "endpoint deployed")
            }
            Err(e) => tracing::warn!(endpoint = %request.endpoint_name, error = %e, "endpoint failed"),
        }
        self.event_sink
            .emit(Event::RunFinished {
                run_id,
                endpoint: request.endpoint_name.clone(),
                url: result.as_ref().ok().map(|o| o.url.clone()),
                error: result.as_ref().err().map(|e| e.to_string()),
            })
            .await;

        result
    }

    async fn run(&self, run_id: Uuid, req: &BuildRequest) -> Result<BuildOutcome, BuildError> {
        let name = req.endpoint_name.as_str();
        let api = self.api.as_ref();
        let lambda = self.lambda.as_ref();
        let retry = RetryingClient::new(&self.config.retry, self.event_sink.as_ref(), run_id);

        let prepared = self
            .step(run_id, name, BuildStep::Validate, async { prepare(req) })
            .await?;

        let rest_api = self
            .step(run_id, name, BuildStep::ResolveRestApi, async {
                let rest_api_name = prepared.rest_api_name.as_str();
                retry
                    .call("getRestApis", || api.find_rest_api_by_name(rest_api_name))
                    .await?
                    .ok_or_else(|| StepError::RestApiNotFound(rest_api_name.to_string()))
            })
            .await?;

        let function = self
            .step(run_id, name, BuildStep::FetchFunction, async {
                let f = retry
                    .call("getFunction", || {
                        lambda.get_function(&req.function_name, &req.stage)
                    })
                    .await?;
                Ok::<_, StepError>(f)
            })
            .await?;

        let listed = self
            .step(run_id, name, BuildStep::ListResources, async {
                let resources = retry
                    .call("getResources", || api.get_resources(&rest_api.id))
                    .await?;
                Ok::<_, StepError>(ResourceCache::from_resources(resources))
            })
            .await?;

        let mut ctx = RunContext {
            run_id,
            endpoint_name: req.endpoint_name.clone(),
            endpoint: prepared.endpoint,
            stage: req.stage.clone(),
            region: req.region.clone(),
            account_number: prepared.account_number,
            alias: self
                .config
                .alias_override
                .clone()
                .unwrap_or_else(|| STAGE_VARIABLE_ALIAS.to_string()),
            resources: listed,
        };

        let leaf_path = ctx.endpoint.path.clone();
        let cache = &mut ctx.resources;
        let tree = self
            .step(run_id, name, BuildStep::Resources, async {
                resolve_resource_tree(api, &retry, &rest_api.id, cache, &leaf_path).await
            })
            .await?;
        for r in &tree.created {
            self.event_sink
                .emit(Event::ResourceCreated {
                    run_id,
                    path: r.path.clone(),
                    resource_id: r.id.clone(),
                })
                .await;
        }
        let resource_id = tree.leaf.resource.id.clone();
        tracing::debug!(
            endpoint = %name,
            resource_id = %resource_id,
            parent_id = tree.leaf.parent.as_ref().map(|p| p.id.as_str()).unwrap_or("-"),
            created = tree.created.len(),
            "resolved leaf resource"
        );

        let transition = self
            .step(run_id, name, BuildStep::Method, async {
                reconcile_method(api, &retry, &rest_api.id, &resource_id, &ctx.endpoint).await
            })
            .await?;
        if let MethodTransition::Replaced {
            previous_integration,
        } = transition
        {
            self.event_sink
                .emit(Event::MethodReplaced {
                    run_id,
                    http_method: ctx.endpoint.method.clone(),
                    previous_integration_uri: previous_integration.and_then(|i| i.uri),
                })
                .await;
        }

        let integration = integration_input(&ctx, &function.function_name);
        self.step(run_id, name, BuildStep::Integration, async {
            reconcile_integration(api, &retry, &rest_api.id, &resource_id, &integration).await
        })
        .await?;

        self.step(run_id, name, BuildStep::MethodResponses, async {
            reconcile_method_responses(api, &retry, &rest_api.id, &resource_id, &ctx.endpoint).await
        })
        .await?;

        self.step(run_id, name, BuildStep::IntegrationResponses, async {
            reconcile_integration_responses(api, &retry, &rest_api.id, &resource_id, &ctx.endpoint)
                .await
        })
        .await?;

        let target = PermissionTarget {
            function_arn: &function.function_arn,
            region: &ctx.region,
            account_number: &ctx.account_number,
            rest_api_id: &rest_api.id,
            http_method: &ctx.endpoint.method,
            path: &ctx.endpoint.path,
        };
        self.step(run_id, name, BuildStep::Permission, async {
            reconcile_permission(lambda, &retry, self.event_sink.as_ref(), run_id, &target).await
        })
        .await?;

        Ok(BuildOutcome {
            endpoint: ctx.endpoint_name.clone(),
            method: ctx.endpoint.method.clone(),
            path: ctx.endpoint.path.clone(),
            url: invoke_url(&rest_api.id, &ctx.region, &ctx.stage, &ctx.endpoint.path),
            rest_api_id: rest_api.id.clone(),
            function_name: function.function_name.clone(),
            created_resources: tree.created,
        })
    }

    /// Run one step, bracketing it with step events and tagging a failure with the step.
    async fn step<T, Fut>(
        &self,
        run_id: Uuid,
        endpoint: &str,
        step: BuildStep,
        fut: Fut,
    ) -> Result<T, BuildError>
    where
        Fut: Future<Output = Result<T, StepError>>,
    {
        self.event_sink.emit(Event::StepStarted { run_id, step }).await;
        tracing::debug!(endpoint, %step, "step started");

        match fut.await {
            Ok(v) => {
                self.event_sink
                    .emit(Event::StepSucceeded { run_id, step })
                    .await;
                Ok(v)
            }
            Err(source) => {
                self.event_sink
                    .emit(Event::StepFailed {
                        run_id,
                        step,
                        error: source.to_string(),
                    })
                    .await;
                Err(BuildError {
                    endpoint: endpoint.to_string(),
                    step,
                    source,
                })
            }
        }
    }
}

/// Everything checked before the first remote call.
fn prepare(req: &BuildRequest) -> Result<Prepared, StepError> {
    let role_arn = req.iam_role_arn.as_deref().ok_or_else(|| {
        StepError::Precondition(format!(
            "no Lambda IAM role found for stage {} in region {}",
            req.stage, req.region
        ))
    })?;
    let rest_api_name = req.rest_api_name.clone().ok_or_else(|| {
        StepError::Precondition(format!(
            "no API Gateway REST API name found for stage {} in region {}",
            req.stage, req.region
        ))
    })?;
    let endpoint = DesiredEndpoint::from_endpoint(&req.endpoint)?;
    let account_number =
        account_number_from_role_arn(role_arn).map_err(|e| StepError::Precondition(e.to_string()))?;

    Ok(Prepared {
        endpoint,
        account_number,
        rest_api_name,
    })
}
