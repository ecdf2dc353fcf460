use apigw_core::naming::{execute_api_source_arn, statement_id, API_GATEWAY_PRINCIPAL, INVOKE_ACTION};

use crate::executor::events::{Event, EventSink};
use crate::executor::retrying::RetryingClient;
use crate::executor::StepError;
use crate::services::{AddPermissionInput, LambdaClient, PolicyDocument};

/// Where the invoke permission should point.
#[derive(Debug, Clone)]
pub struct PermissionTarget<'a> {
    /// Qualified function ARN returned by `get_function`.
    pub function_arn: &'a str,
    pub region: &'a str,
    pub account_number: &'a str,
    pub rest_api_id: &'a str,
    pub http_method: &'a str,
    pub path: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PermissionOutcome {
    pub statement_id: String,
    /// A statement with the same id was found and removed first.
    pub replaced: bool,
}

pub fn permission_input(target: &PermissionTarget<'_>) -> AddPermissionInput {
    AddPermissionInput {
        function_name: target.function_arn.to_string(),
        statement_id: statement_id(target.path, target.http_method),
        action: INVOKE_ACTION.to_string(),
        principal: API_GATEWAY_PRINCIPAL.to_string(),
        source_arn: execute_api_source_arn(
            target.region,
            target.account_number,
            target.rest_api_id,
            target.http_method,
            target.path,
        ),
    }
}

/// Replace the function's invoke permission for this path and method.
///
/// Reading the policy and removing the old statement are best effort; only the final
/// add can fail the step.
pub async fn reconcile_permission(
    lambda: &dyn LambdaClient,
    retry: &RetryingClient<'_>,
    events: &dyn EventSink,
    run_id: uuid::Uuid,
    target: &PermissionTarget<'_>,
) -> Result<PermissionOutcome, StepError> {
    let input = permission_input(target);
    let function = target.function_arn;

    let policy = match retry
        .call("getPolicy", || lambda.get_policy(function))
        .await
    {
        Ok(Some(raw)) => PolicyDocument::parse(&raw),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(function, error = %e, "could not read function policy");
            None
        }
    };

    let mut replaced = false;
    if policy.is_some_and(|p| p.has_statement(&input.statement_id)) {
        let sid = input.statement_id.as_str();
        match retry
            .call("removePermission", || lambda.remove_permission(function, sid))
            .await
        {
            Ok(()) => replaced = true,
            Err(e) => {
                tracing::warn!(statement_id = sid, error = %e, "ignoring failed permission removal");
                events
                    .emit(Event::PermissionRemovalIgnored {
                        run_id,
                        statement_id: sid.to_string(),
                        error: e.to_string(),
                    })
                    .await;
            }
        }
    }

    retry
        .call("addPermission", || lambda.add_permission(&input))
        .await?;

    Ok(PermissionOutcome {
        statement_id: input.statement_id,
        replaced,
    })
}
