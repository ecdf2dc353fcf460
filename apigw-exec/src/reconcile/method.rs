use apigw_core::DesiredEndpoint;

use crate::executor::retrying::RetryingClient;
use crate::executor::StepError;
use crate::services::{ApiGatewayClient, IntegrationSummary, PutMethodInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodTransition {
    Created,
    /// The method existed and was deleted before being recreated.
    Replaced {
        previous_integration: Option<IntegrationSummary>,
    },
}

pub fn method_input(endpoint: &DesiredEndpoint) -> PutMethodInput {
    PutMethodInput {
        http_method: endpoint.method.clone(),
        authorization_type: endpoint.authorization_type.clone(),
        api_key_required: endpoint.api_key_required,
        request_models: endpoint.request_models.clone(),
        request_parameters: endpoint.method_request_parameters(),
    }
}

/// Converge the method on the leaf resource by delete-then-create.
///
/// Partial updates leave stale fields behind, so an existing method is always removed
/// first. Its integration is captured for reporting only.
pub async fn reconcile_method(
    api: &dyn ApiGatewayClient,
    retry: &RetryingClient<'_>,
    rest_api_id: &str,
    resource_id: &str,
    endpoint: &DesiredEndpoint,
) -> Result<MethodTransition, StepError> {
    let http_method = endpoint.method.as_str();

    let existing = retry
        .call("getMethod", || api.get_method(rest_api_id, resource_id, http_method))
        .await?;

    let transition = match existing {
        Some(m) => {
            let deleted = retry
                .call("deleteMethod", || {
                    api.delete_method(rest_api_id, resource_id, http_method)
                })
                .await;
            match deleted {
                Ok(()) => {}
                // A retried delete whose first attempt already landed.
                Err(e) if e.is_not_found() => {
                    tracing::debug!(http_method, "method already gone on delete");
                }
                Err(e) => return Err(e.into()),
            }
            MethodTransition::Replaced {
                previous_integration: m.integration,
            }
        }
        None => MethodTransition::Created,
    };

    let input = method_input(endpoint);
    retry
        .call("putMethod", || api.put_method(rest_api_id, resource_id, &input))
        .await?;

    Ok(transition)
}
