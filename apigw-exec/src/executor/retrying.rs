use std::future::Future;

use uuid::Uuid;

use crate::executor::events::{Event, EventSink};
use crate::retry::{decide_retry, RetryConfig, RetryDecision};
use crate::services::ServiceError;

/// Issues remote calls with backoff on throttling and transient failures.
///
/// Non-retryable errors and the last error after exhaustion are returned unchanged.
pub struct RetryingClient<'a> {
    config: &'a RetryConfig,
    event_sink: &'a dyn EventSink,
    run_id: Uuid,
}

impl<'a> RetryingClient<'a> {
    pub fn new(config: &'a RetryConfig, event_sink: &'a dyn EventSink, run_id: Uuid) -> Self {
        Self {
            config,
            event_sink,
            run_id,
        }
    }

    pub async fn call<T, F, Fut>(&self, operation: &str, mut f: F) -> Result<T, ServiceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ServiceError>>,
    {
        let mut attempt_no = 1;
        loop {
            let err = match f().await {
                Ok(v) => return Ok(v),
                Err(e) => e,
            };

            match decide_retry(self.config, attempt_no, err.kind, || fastrand::u64(..)) {
                RetryDecision::RetryAfter { delay, reason } => {
                    tracing::debug!(
                        operation,
                        attempt_no,
                        delay_ms = delay.as_millis() as u64,
                        ?reason,
                        error = %err,
                        "retrying remote call"
                    );
                    self.event_sink
                        .emit(Event::RetryScheduled {
                            run_id: self.run_id,
                            operation: operation.to_string(),
                            attempt_no,
                            delay_ms: delay.as_millis() as u64,
                            error: err.to_string(),
                        })
                        .await;
                    tokio::time::sleep(delay).await;
                    attempt_no += 1;
                }
                RetryDecision::Stop { .. } => return Err(err),
            }
        }
    }
}
