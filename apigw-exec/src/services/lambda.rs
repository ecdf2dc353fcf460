use async_trait::async_trait;

use crate::services::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FunctionConfiguration {
    pub function_name: String,
    /// Qualified ARN when fetched with a qualifier.
    pub function_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AddPermissionInput {
    pub function_name: String,
    pub statement_id: String,
    pub action: String,
    pub principal: String,
    pub source_arn: String,
}

/// Resource policy attached to a function. Only statement ids matter to us.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Deserialize)]
pub struct PolicyDocument {
    #[serde(rename = "Statement", default)]
    pub statements: Vec<PolicyStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct PolicyStatement {
    #[serde(rename = "Sid", default)]
    pub sid: Option<String>,
}

impl PolicyDocument {
    /// Parse a policy; anything unparsable is treated as no policy at all.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn has_statement(&self, statement_id: &str) -> bool {
        self.statements
            .iter()
            .any(|s| s.sid.as_deref() == Some(statement_id))
    }
}

#[async_trait]
pub trait LambdaClient: Send + Sync {
    async fn get_function(
        &self,
        function_name: &str,
        qualifier: &str,
    ) -> Result<FunctionConfiguration, ServiceError>;

    /// Raw policy JSON; `Ok(None)` when the function has no resource policy.
    async fn get_policy(&self, function: &str) -> Result<Option<String>, ServiceError>;

    async fn remove_permission(&self, function: &str, statement_id: &str)
        -> Result<(), ServiceError>;

    async fn add_permission(&self, input: &AddPermissionInput) -> Result<(), ServiceError>;
}
