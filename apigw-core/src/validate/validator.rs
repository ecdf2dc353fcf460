use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ValidationError, Violation};
use crate::types::{Endpoint, Extensions, ProjectDocument};

use super::rules;

pub(crate) static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-\.]+$").expect("valid"));
pub(crate) static PARAM_SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{[A-Za-z0-9_\-\.]+\+?\}$").expect("valid"));
pub(crate) static STATUS_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-5][0-9]{2}$").expect("valid"));

pub struct Validator {
    violations: Vec<Violation>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    pub fn validate_project(&mut self, project: &ProjectDocument) {
        rules::project::validate_project(self, project);
    }

    pub fn validate_endpoint(&mut self, endpoint: &Endpoint, path: &str) {
        rules::endpoint::validate_endpoint(self, endpoint, path);
    }

    pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::new(path, message));
    }

    pub(crate) fn validate_extensions(&mut self, path: &str, ext: &Extensions) {
        for key in ext.keys() {
            if !key.starts_with("x-") {
                self.push(
                    format!("{path}.{key}"),
                    "unknown field (only x-* extensions are allowed)",
                );
            }
        }
    }
}
