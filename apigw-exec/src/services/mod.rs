//! Service seams for the two remote control planes.

mod apigateway;
mod error;
mod lambda;

pub use apigateway::{
    ApiGatewayClient, ApiResource, ExistingMethod, IntegrationSummary, PutIntegrationInput,
    PutIntegrationResponseInput, PutMethodInput, PutMethodResponseInput, RestApi,
};
pub use error::{kind_from_code, ServiceError, ServiceErrorKind, ServiceKind};
pub use lambda::{
    AddPermissionInput, FunctionConfiguration, LambdaClient, PolicyDocument, PolicyStatement,
};
