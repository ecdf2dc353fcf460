mod rules;
mod validator;

use crate::error::ValidationError;
use crate::types::{Endpoint, ProjectDocument};
pub use validator::Validator;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for ProjectDocument {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_project(self)
    }
}

impl Validate for Endpoint {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_endpoint(self, "$")
    }
}

pub fn validate_project(project: &ProjectDocument) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    v.validate_project(project);
    v.finish()
}

/// Validate one endpoint; violation paths are rooted at `path`.
pub fn validate_endpoint(endpoint: &Endpoint, path: &str) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    v.validate_endpoint(endpoint, path);
    v.finish()
}
