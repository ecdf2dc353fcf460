use apigw_core::naming::{lambda_integration_uri, INTEGRATION_HTTP_METHOD};

use crate::executor::context::RunContext;
use crate::executor::retrying::RetryingClient;
use crate::executor::StepError;
use crate::services::{ApiGatewayClient, IntegrationSummary, PutIntegrationInput};

/// Full integration definition for the endpoint; request templates were prepared when
/// the endpoint was validated.
pub fn integration_input(ctx: &RunContext, function_name: &str) -> PutIntegrationInput {
    let e = &ctx.endpoint;
    PutIntegrationInput {
        http_method: e.method.clone(),
        integration_type: e.integration_type.clone(),
        integration_http_method: INTEGRATION_HTTP_METHOD.to_string(),
        uri: lambda_integration_uri(&ctx.region, &ctx.account_number, function_name, &ctx.alias),
        request_parameters: e.request_parameters.clone(),
        request_templates: e.request_templates.clone(),
        cache_key_parameters: e.cache_key_parameters.clone(),
        cache_namespace: e.cache_namespace.clone(),
    }
}

pub async fn reconcile_integration(
    api: &dyn ApiGatewayClient,
    retry: &RetryingClient<'_>,
    rest_api_id: &str,
    resource_id: &str,
    input: &PutIntegrationInput,
) -> Result<IntegrationSummary, StepError> {
    let summary = retry
        .call("putIntegration", || {
            api.put_integration(rest_api_id, resource_id, input)
        })
        .await?;
    Ok(summary)
}
