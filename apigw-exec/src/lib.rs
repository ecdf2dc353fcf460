#![forbid(unsafe_code)]

//! Reconciliation engine that deploys project endpoints onto API Gateway REST APIs
//! backed by Lambda functions.
//!
//! Document parsing and validation live in `apigw-core`.

pub mod executor;
pub mod reconcile;
pub mod retry;
pub mod services;
pub mod state;

#[cfg(feature = "aws")]
pub mod aws;

pub use crate::executor::{
    BatchConfig, BatchDeployer, BuildError, BuildOutcome, BuildRequest, BuildStep, DeployReport,
    EndpointBuilder, EngineConfig,
};
pub use crate::state::{ProjectStateProvider, StateProvider};
