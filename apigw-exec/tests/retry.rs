use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use apigw_exec::executor::events::NoOpEventSink;
use apigw_exec::executor::retrying::RetryingClient;
use apigw_exec::retry::{decide_retry, RetryConfig, RetryDecision, RetryReason};
use apigw_exec::services::{ServiceError, ServiceErrorKind, ServiceKind};
use uuid::Uuid;

fn throttled() -> ServiceError {
    ServiceError::new(ServiceKind::ApiGateway, ServiceErrorKind::Throttled, "Too Many Requests")
        .with_code("TooManyRequestsException")
}

#[test]
fn retry_stops_on_non_retryable_kinds() {
    let cfg = RetryConfig::default();
    for kind in [
        ServiceErrorKind::NotFound,
        ServiceErrorKind::Conflict,
        ServiceErrorKind::BadRequest,
        ServiceErrorKind::Other,
    ] {
        assert!(!kind.is_retryable());
        assert_eq!(
            decide_retry(&cfg, 1, kind, || 0),
            RetryDecision::Stop {
                reason: RetryReason::NotRetryable
            }
        );
    }
}

#[test]
fn retryable_kinds_are_throttled_and_transient() {
    let cfg = RetryConfig::default();
    for (kind, reason) in [
        (ServiceErrorKind::Throttled, RetryReason::Throttled),
        (ServiceErrorKind::Transient, RetryReason::Transient),
    ] {
        assert!(kind.is_retryable());
        assert!(matches!(
            decide_retry(&cfg, 1, kind, || 0),
            RetryDecision::RetryAfter { reason: r, .. } if r == reason
        ));
    }
}

#[test]
fn retry_stops_when_attempts_exhausted() {
    let cfg = RetryConfig {
        max_attempts: 3,
        ..Default::default()
    };
    assert!(matches!(
        decide_retry(&cfg, 2, ServiceErrorKind::Throttled, || 0),
        RetryDecision::RetryAfter { .. }
    ));
    assert_eq!(
        decide_retry(&cfg, 3, ServiceErrorKind::Throttled, || 0),
        RetryDecision::Stop {
            reason: RetryReason::AttemptsExhausted
        }
    );
}

#[test]
fn no_retry_config_never_retries() {
    let d = decide_retry(&RetryConfig::no_retry(), 1, ServiceErrorKind::Transient, || 0);
    assert_eq!(
        d,
        RetryDecision::Stop {
            reason: RetryReason::AttemptsExhausted
        }
    );
}

#[test]
fn backoff_grows_exponentially_with_full_jitter() {
    let cfg = RetryConfig::default();
    // The RNG returning the ceiling itself yields the un-jittered delay.
    let d1 = decide_retry(&cfg, 1, ServiceErrorKind::Transient, || 500);
    let d3 = decide_retry(&cfg, 3, ServiceErrorKind::Throttled, || 2000);
    assert_eq!(
        d1,
        RetryDecision::RetryAfter {
            delay: Duration::from_millis(500),
            reason: RetryReason::Transient
        }
    );
    assert_eq!(
        d3,
        RetryDecision::RetryAfter {
            delay: Duration::from_millis(2000),
            reason: RetryReason::Throttled
        }
    );

    let zero = decide_retry(&cfg, 3, ServiceErrorKind::Throttled, || 0);
    assert!(matches!(zero, RetryDecision::RetryAfter { delay, .. } if delay.is_zero()));
}

#[test]
fn backoff_is_capped_at_max_delay() {
    let cfg = RetryConfig::default();
    for rand in [0u64, 7, 19_999, 20_000, u64::MAX] {
        match decide_retry(&cfg, 7, ServiceErrorKind::Throttled, || rand) {
            RetryDecision::RetryAfter { delay, .. } => assert!(delay <= cfg.max_delay),
            other => panic!("unexpected decision: {other:?}"),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn retrying_client_retries_until_success() {
    let cfg = RetryConfig::default();
    let sink = NoOpEventSink;
    let client = RetryingClient::new(&cfg, &sink, Uuid::new_v4());
    let attempts = AtomicUsize::new(0);
    let counter = &attempts;

    let out = client
        .call("createResource", || async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(throttled())
            } else {
                Ok("res1")
            }
        })
        .await
        .unwrap();

    assert_eq!(out, "res1");
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn retrying_client_returns_last_error_unchanged() {
    let cfg = RetryConfig {
        max_attempts: 4,
        ..Default::default()
    };
    let sink = NoOpEventSink;
    let client = RetryingClient::new(&cfg, &sink, Uuid::new_v4());
    let attempts = AtomicUsize::new(0);
    let counter = &attempts;

    let err = client
        .call("getResources", || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(throttled())
        })
        .await
        .unwrap_err();

    assert_eq!(err, throttled());
    assert_eq!(attempts.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn retrying_client_does_not_retry_not_found() {
    let cfg = RetryConfig::default();
    let sink = NoOpEventSink;
    let client = RetryingClient::new(&cfg, &sink, Uuid::new_v4());
    let attempts = AtomicUsize::new(0);
    let counter = &attempts;

    let err = client
        .call("getMethod", || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(ServiceError::new(
                ServiceKind::ApiGateway,
                ServiceErrorKind::NotFound,
                "Invalid Method identifier specified",
            ))
        })
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}
