//! Sleep abstraction for determinism.
//!
//! The retry executor waits between attempts through this trait, so tests
//! can record the requested delays instead of waiting them out.

use std::time::Duration;

use async_trait::async_trait;

/// Abstraction over an asynchronous sleep.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspends the current task for `delay`.
    async fn sleep(&self, delay: Duration);
}

/// Production sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}
