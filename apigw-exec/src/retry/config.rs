use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub base_delay: Duration,
    pub factor: f64,
    pub max_delay: Duration,
    /// Total attempts, including the first one.
    pub max_attempts: usize,
}

impl Default for RetryConfig {
    fn default() -> Self {
        // API Gateway control-plane limits are low (a few requests/sec per account).
        Self {
            base_delay: Duration::from_millis(500),
            factor: 2.0,
            max_delay: Duration::from_secs(20),
            max_attempts: 8,
        }
    }
}

impl RetryConfig {
    /// A single attempt, no retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }
}
