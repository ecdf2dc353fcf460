use std::fmt;

/// Which remote surface an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ServiceKind {
    ApiGateway,
    Lambda,
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKind::ApiGateway => f.write_str("API Gateway"),
            ServiceKind::Lambda => f.write_str("Lambda"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ServiceErrorKind {
    NotFound,
    /// The resource already exists or is being modified concurrently.
    Conflict,
    /// Rate limited by the control plane.
    Throttled,
    /// Timeouts, dispatch failures, 5xx.
    Transient,
    BadRequest,
    Other,
}

impl ServiceErrorKind {
    pub fn is_retryable(self) -> bool {
        matches!(self, ServiceErrorKind::Throttled | ServiceErrorKind::Transient)
    }
}

/// A remote call failure. `message` is the service's own message, unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{service} error{}: {message}", .code.as_deref().map(|c| format!(" ({c})")).unwrap_or_default())]
pub struct ServiceError {
    pub service: ServiceKind,
    pub kind: ServiceErrorKind,
    pub code: Option<String>,
    pub message: String,
}

impl ServiceError {
    pub fn new(service: ServiceKind, kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            service,
            kind,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ServiceErrorKind::NotFound
    }

    pub fn is_conflict(&self) -> bool {
        self.kind == ServiceErrorKind::Conflict
    }
}

/// Map an AWS error code onto our kinds. Both services use the same vocabulary for the
/// cases we care about.
pub fn kind_from_code(code: &str) -> ServiceErrorKind {
    match code {
        "NotFoundException" | "ResourceNotFoundException" => ServiceErrorKind::NotFound,
        "ConflictException" | "ResourceConflictException" => ServiceErrorKind::Conflict,
        "TooManyRequestsException" | "ThrottlingException" | "LimitExceededException" => {
            ServiceErrorKind::Throttled
        }
        "ServiceUnavailableException" | "ServiceException" | "InternalFailure" => {
            ServiceErrorKind::Transient
        }
        "BadRequestException" | "InvalidParameterValueException" => ServiceErrorKind::BadRequest,
        _ => ServiceErrorKind::Other,
    }
}
