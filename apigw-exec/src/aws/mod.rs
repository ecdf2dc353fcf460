//! Service clients backed by the AWS SDK.
//!
//! Enabled via the `aws` feature. Credentials come from the default provider chain.

mod apigateway;
mod lambda;

pub use apigateway::AwsApiGateway;
pub use lambda::AwsLambda;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_apigateway::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use crate::services::{kind_from_code, ServiceError, ServiceErrorKind, ServiceKind};

/// Page size for list calls; the API Gateway maximum.
pub(crate) const PAGE_LIMIT: i32 = 500;

/// Shared SDK config for both clients.
pub async fn load_sdk_config(region: Option<&str>, profile: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }
    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }
    loader.load().await
}

/// Classify an SDK failure. Network level failures are transient; service errors are
/// mapped by their code and keep the service's message.
pub(crate) fn service_error<E, R>(service: ServiceKind, err: SdkError<E, R>) -> ServiceError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug + 'static,
{
    let code = err.code().map(str::to_string);
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());

    let kind = match (&err, code.as_deref()) {
        (SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_), _) => {
            ServiceErrorKind::Transient
        }
        (_, Some(code)) => kind_from_code(code),
        _ => ServiceErrorKind::Other,
    };

    let e = ServiceError::new(service, kind, message);
    match code {
        Some(code) => e.with_code(code),
        None => e,
    }
}
