#![forbid(unsafe_code)]

pub mod error;
pub mod naming;
pub mod parser;
pub mod paths;
pub mod templates;
pub mod types;
pub mod validate;

pub use crate::error::{ApigwError, ParseError, ValidationError, Violation};
pub use crate::parser::{parse_project_str, DocumentFormat, ParsedProject};
pub use crate::types::{DesiredEndpoint, DesiredResponse, Endpoint, EndpointAddress, ProjectDocument};
pub use crate::validate::{validate_endpoint, validate_project, Validate};
