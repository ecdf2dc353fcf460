use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::executor::result::BuildStep;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    RunStarted {
        run_id: Uuid,
        endpoint: String,
    },
    RunFinished {
        run_id: Uuid,
        endpoint: String,
        url: Option<String>,
        error: Option<String>,
    },
    StepStarted {
        run_id: Uuid,
        step: BuildStep,
    },
    StepSucceeded {
        run_id: Uuid,
        step: BuildStep,
    },
    StepFailed {
        run_id: Uuid,
        step: BuildStep,
        error: String,
    },
    ResourceCreated {
        run_id: Uuid,
        path: String,
        resource_id: String,
    },
    MethodReplaced {
        run_id: Uuid,
        http_method: String,
        previous_integration_uri: Option<String>,
    },
    RetryScheduled {
        run_id: Uuid,
        operation: String,
        attempt_no: usize,
        delay_ms: u64,
        error: String,
    },
    PermissionRemovalIgnored {
        run_id: Uuid,
        statement_id: String,
        error: String,
    },
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::RunStarted { .. } => "run.started",
            Event::RunFinished { .. } => "run.finished",
            Event::StepStarted { .. } => "step.started",
            Event::StepSucceeded { .. } => "step.succeeded",
            Event::StepFailed { .. } => "step.failed",
            Event::ResourceCreated { .. } => "resource.created",
            Event::MethodReplaced { .. } => "method.replaced",
            Event::RetryScheduled { .. } => "retry.scheduled",
            Event::PermissionRemovalIgnored { .. } => "permission.removal_ignored",
        }
    }

    pub fn run_id(&self) -> Uuid {
        match self {
            Event::RunStarted { run_id, .. }
            | Event::RunFinished { run_id, .. }
            | Event::StepStarted { run_id, .. }
            | Event::StepSucceeded { run_id, .. }
            | Event::StepFailed { run_id, .. }
            | Event::ResourceCreated { run_id, .. }
            | Event::MethodReplaced { run_id, .. }
            | Event::RetryScheduled { run_id, .. }
            | Event::PermissionRemovalIgnored { run_id, .. } => *run_id,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let payload = match self {
            Event::RunStarted { endpoint, .. } => json!({ "endpoint": endpoint }),
            Event::RunFinished { endpoint, url, error, .. } => {
                json!({ "endpoint": endpoint, "url": url, "error": error })
            }
            Event::StepStarted { step, .. } | Event::StepSucceeded { step, .. } => {
                json!({ "step": step.as_str() })
            }
            Event::StepFailed { step, error, .. } => {
                json!({ "step": step.as_str(), "error": error })
            }
            Event::ResourceCreated { path, resource_id, .. } => {
                json!({ "path": path, "resource_id": resource_id })
            }
            Event::MethodReplaced {
                http_method,
                previous_integration_uri,
                ..
            } => json!({
                "http_method": http_method,
                "previous_integration_uri": previous_integration_uri
            }),
            Event::RetryScheduled {
                operation,
                attempt_no,
                delay_ms,
                error,
                ..
            } => json!({
                "operation": operation,
                "attempt_no": attempt_no,
                "delay_ms": delay_ms,
                "error": error
            }),
            Event::PermissionRemovalIgnored {
                statement_id,
                error,
                ..
            } => json!({ "statement_id": statement_id, "error": error }),
        };

        let mut out = json!({
            "type": self.event_type(),
            "run_id": self.run_id().to_string(),
        });
        if let (Some(out), Some(payload)) = (out.as_object_mut(), payload.as_object()) {
            for (k, v) in payload {
                out.insert(k.clone(), v.clone());
            }
        }
        out
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct CompositeEventSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

/// One JSON object per line on stdout.
pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: Event) {
        println!("{}", serde_json::to_string(&event.to_json()).unwrap_or_default());
    }
}

/// Forwards events to `tracing`; failures and ignored errors at `warn`.
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn emit(&self, event: Event) {
        let kind = event.event_type();
        let run_id = event.run_id().to_string();
        let payload = event.to_json().to_string();
        match &event {
            Event::StepFailed { .. }
            | Event::PermissionRemovalIgnored { .. }
            | Event::RunFinished { error: Some(_), .. } => {
                tracing::warn!(event = kind, %run_id, %payload);
            }
            Event::RetryScheduled { .. } => {
                tracing::debug!(event = kind, %run_id, %payload);
            }
            _ => tracing::info!(event = kind, %run_id, %payload),
        }
    }
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}
