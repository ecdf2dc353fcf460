mod common;
mod desired;
mod endpoint;
mod project;

pub use common::Extensions;
pub use desired::{DesiredEndpoint, DesiredResponse, DEFAULT_INTEGRATION_TYPE};
pub use endpoint::{Endpoint, RequestTemplate, ResponseSpec};
pub use project::{
    EndpointAddress, EndpointAddressParseError, FunctionDef, ProjectDocument, RegionVariables,
};
