//! One reconciler per remote concern. Each converges a single piece of the endpoint and
//! goes through the shared [`RetryingClient`](crate::executor::retrying::RetryingClient).

pub mod integration;
pub mod method;
pub mod permission;
pub mod resources;
pub mod responses;

pub use integration::{integration_input, reconcile_integration};
pub use method::{method_input, reconcile_method, MethodTransition};
pub use permission::{permission_input, reconcile_permission, PermissionOutcome, PermissionTarget};
pub use resources::{resolve_resource_tree, TreeResolution};
pub use responses::{
    integration_response_inputs, method_response_inputs, reconcile_integration_responses,
    reconcile_method_responses,
};
