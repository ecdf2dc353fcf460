use apigw_core::naming::selection_pattern;
use apigw_core::DesiredEndpoint;

use crate::executor::retrying::RetryingClient;
use crate::executor::StepError;
use crate::services::{ApiGatewayClient, PutIntegrationResponseInput, PutMethodResponseInput};

pub fn method_response_inputs(endpoint: &DesiredEndpoint) -> Vec<(String, PutMethodResponseInput)> {
    endpoint
        .responses
        .iter()
        .map(|(key, r)| {
            let input = PutMethodResponseInput {
                http_method: endpoint.method.clone(),
                status_code: r.status_code.clone(),
                response_parameters: r.method_response_parameters(),
                response_models: r.response_models.clone(),
            };
            (key.clone(), input)
        })
        .collect()
}

pub fn integration_response_inputs(
    endpoint: &DesiredEndpoint,
) -> Vec<(String, PutIntegrationResponseInput)> {
    endpoint
        .responses
        .iter()
        .map(|(key, r)| {
            let input = PutIntegrationResponseInput {
                http_method: endpoint.method.clone(),
                status_code: r.status_code.clone(),
                selection_pattern: selection_pattern(key, r.selection_pattern.as_deref()),
                response_parameters: r.response_parameters.clone(),
                response_templates: r.response_templates.clone(),
            };
            (key.clone(), input)
        })
        .collect()
}

/// Declare every method response. Stops at the first failing key; keys already written
/// stay written.
pub async fn reconcile_method_responses(
    api: &dyn ApiGatewayClient,
    retry: &RetryingClient<'_>,
    rest_api_id: &str,
    resource_id: &str,
    endpoint: &DesiredEndpoint,
) -> Result<usize, StepError> {
    let inputs = method_response_inputs(endpoint);
    for (key, input) in &inputs {
        retry
            .call("putMethodResponse", || {
                api.put_method_response(rest_api_id, resource_id, input)
            })
            .await
            .map_err(|source| StepError::Response {
                key: key.clone(),
                source,
            })?;
    }
    Ok(inputs.len())
}

/// Same contract as [`reconcile_method_responses`], for integration responses.
pub async fn reconcile_integration_responses(
    api: &dyn ApiGatewayClient,
    retry: &RetryingClient<'_>,
    rest_api_id: &str,
    resource_id: &str,
    endpoint: &DesiredEndpoint,
) -> Result<usize, StepError> {
    let inputs = integration_response_inputs(endpoint);
    for (key, input) in &inputs {
        retry
            .call("putIntegrationResponse", || {
                api.put_integration_response(rest_api_id, resource_id, input)
            })
            .await
            .map_err(|source| StepError::Response {
                key: key.clone(),
                source,
            })?;
    }
    Ok(inputs.len())
}
