mod builder;
pub mod concurrency;
pub mod context;
pub mod events;
mod result;
pub mod retrying;
mod scheduler;
mod types;

pub use builder::EndpointBuilder;
pub use events::{
    CompositeEventSink, Event, EventSink, NoOpEventSink, StdoutEventSink, TracingEventSink,
};
pub use result::{BuildError, BuildStep, DeployError, StepError};
pub use scheduler::{BatchConfig, BatchDeployer, DeployReport, EndpointFailure, EndpointSelection};
pub use types::{BuildOutcome, BuildRequest, EngineConfig};
