//! Deterministic names and ARNs derived from an endpoint and its run target.

/// Stage variable that API Gateway resolves at invocation time to pick the Lambda alias.
pub const STAGE_VARIABLE_ALIAS: &str = "${stageVariables.functionAlias}";

/// Response key that matches any backend response.
pub const DEFAULT_RESPONSE_KEY: &str = "default";

pub const INVOKE_ACTION: &str = "lambda:InvokeFunction";
pub const API_GATEWAY_PRINCIPAL: &str = "apigateway.amazonaws.com";

/// Lambda integrations are always invoked with POST regardless of the endpoint method.
pub const INTEGRATION_HTTP_METHOD: &str = "POST";

/// Policy statement id for the endpoint's invoke permission.
///
/// `/users/{id}` + `GET` -> `s_apig_users__id__GET`.
pub fn statement_id(path: &str, method: &str) -> String {
    format!("s_apig{path}_{method}")
        .chars()
        .map(|c| match c {
            '/' | '{' | '}' => '_',
            c => c,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not an IAM role ARN: {0:?}")]
pub struct RoleArnError(pub String);

/// Account number embedded in an IAM role ARN (`arn:aws:iam::123456789012:role/name`).
pub fn account_number_from_role_arn(role_arn: &str) -> Result<String, RoleArnError> {
    let parts: Vec<&str> = role_arn.trim().splitn(6, ':').collect();
    match parts.as_slice() {
        ["arn", _partition, "iam", "", account, _resource]
            if !account.is_empty() && account.chars().all(|c| c.is_ascii_digit()) =>
        {
            Ok(account.to_string())
        }
        _ => Err(RoleArnError(role_arn.to_string())),
    }
}

/// Integration URI pointing API Gateway at `function:alias`.
pub fn lambda_integration_uri(region: &str, account: &str, function_name: &str, alias: &str) -> String {
    format!(
        "arn:aws:apigateway:{region}:lambda:path/2015-03-31/functions/arn:aws:lambda:{region}:{account}:function:{function_name}:{alias}/invocations"
    )
}

/// Source ARN restricting the invoke permission to one method + path on any stage.
pub fn execute_api_source_arn(
    region: &str,
    account: &str,
    rest_api_id: &str,
    method: &str,
    path: &str,
) -> String {
    format!("arn:aws:execute-api:{region}:{account}:{rest_api_id}/*/{method}{path}")
}

pub fn invoke_url(rest_api_id: &str, region: &str, stage: &str, path: &str) -> String {
    format!("https://{rest_api_id}.execute-api.{region}.amazonaws.com/{stage}{path}")
}

/// Integration response selection pattern for a response key.
///
/// An explicit pattern wins; otherwise the key itself, except `default` which has none.
pub fn selection_pattern(response_key: &str, explicit: Option<&str>) -> Option<String> {
    if let Some(p) = explicit {
        return Some(p.to_string());
    }
    if response_key == DEFAULT_RESPONSE_KEY {
        None
    } else {
        Some(response_key.to_string())
    }
}
