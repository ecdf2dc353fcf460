use async_trait::async_trait;
use aws_sdk_lambda::Client;

use crate::aws::service_error;
use crate::services::{
    AddPermissionInput, FunctionConfiguration, LambdaClient, ServiceError, ServiceErrorKind,
    ServiceKind,
};

pub struct AwsLambda {
    client: Client,
}

impl AwsLambda {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_conf(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

fn err<E, R>(e: aws_sdk_lambda::error::SdkError<E, R>) -> ServiceError
where
    E: aws_sdk_lambda::error::ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug + 'static,
{
    service_error(ServiceKind::Lambda, e)
}

#[async_trait]
impl LambdaClient for AwsLambda {
    async fn get_function(
        &self,
        function_name: &str,
        qualifier: &str,
    ) -> Result<FunctionConfiguration, ServiceError> {
        let out = self
            .client
            .get_function()
            .function_name(function_name)
            .qualifier(qualifier)
            .send()
            .await
            .map_err(err)?;

        let config = out.configuration().ok_or_else(|| {
            ServiceError::new(
                ServiceKind::Lambda,
                ServiceErrorKind::Other,
                format!("function {function_name}:{qualifier} has no configuration"),
            )
        })?;

        Ok(FunctionConfiguration {
            function_name: config
                .function_name()
                .unwrap_or(function_name)
                .to_string(),
            function_arn: config.function_arn().unwrap_or_default().to_string(),
        })
    }

    async fn get_policy(&self, function: &str) -> Result<Option<String>, ServiceError> {
        match self
            .client
            .get_policy()
            .function_name(function)
            .send()
            .await
            .map_err(err)
        {
            Ok(out) => Ok(out.policy().map(str::to_string)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn remove_permission(
        &self,
        function: &str,
        statement_id: &str,
    ) -> Result<(), ServiceError> {
        self.client
            .remove_permission()
            .function_name(function)
            .statement_id(statement_id)
            .send()
            .await
            .map_err(err)?;
        Ok(())
    }

    async fn add_permission(&self, input: &AddPermissionInput) -> Result<(), ServiceError> {
        self.client
            .add_permission()
            .function_name(&input.function_name)
            .statement_id(&input.statement_id)
            .action(&input.action)
            .principal(&input.principal)
            .source_arn(&input.source_arn)
            .send()
            .await
            .map_err(err)?;
        Ok(())
    }
}
