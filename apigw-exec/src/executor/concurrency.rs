use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Caps how many endpoint runs talk to the control plane at once.
#[derive(Clone)]
pub struct ConcurrencyLimit {
    global: Arc<Semaphore>,
}

impl ConcurrencyLimit {
    pub fn new(limit: usize) -> Self {
        Self {
            global: Arc::new(Semaphore::new(limit.max(1))),
        }
    }

    /// `None` only if the semaphore was closed, which this type never does.
    pub async fn acquire(&self) -> Option<ConcurrencyPermit> {
        let permit = self.global.clone().acquire_owned().await.ok()?;
        Some(ConcurrencyPermit { _global: permit })
    }
}

pub struct ConcurrencyPermit {
    _global: OwnedSemaphorePermit,
}
