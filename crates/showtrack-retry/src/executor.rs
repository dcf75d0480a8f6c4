//! The retry executor.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use showtrack_core::cancellation::CancellationSignal;
use showtrack_core::error::DomainError;
use showtrack_core::sleeper::{Sleeper, TokioSleeper};
use tracing::{debug, error, info, warn};

use crate::policy::RetryPolicy;

/// Runs a unit of work, retrying every failure with exponential backoff.
///
/// The operation is invoked at most `policy.max_attempts` times. After a
/// failed attempt `a` that still leaves budget, the executor sleeps for
/// [`RetryPolicy::backoff_delay`]`(a)`; that sleep is the only cancellable
/// point, and an in-flight attempt is never interrupted.
#[derive(Clone)]
pub struct RetryExecutor {
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl fmt::Debug for RetryExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryExecutor")
            .field("policy", &self.policy)
            .field("sleeper", &"<sleeper>")
            .finish()
    }
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl RetryExecutor {
    /// Creates an executor that sleeps on the tokio timer.
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_sleeper(policy, Arc::new(TokioSleeper))
    }

    /// Creates an executor with a custom sleeper.
    #[must_use]
    pub fn with_sleeper(policy: RetryPolicy, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { policy, sleeper }
    }

    /// Returns the policy this executor applies.
    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Runs `op` until it succeeds or the attempt budget is spent.
    ///
    /// `operation` names the unit of work in logs and errors only.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RetryExhausted` carrying the last failure as its
    /// source when every attempt failed, or `DomainError::Cancelled` when
    /// `cancel` fires while waiting between attempts.
    pub async fn execute<T, F, Fut>(
        &self,
        operation: &str,
        cancel: &CancellationSignal,
        mut op: F,
    ) -> Result<T, DomainError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            debug!(operation, attempt, max_attempts, "starting attempt");

            let err = match op().await {
                Ok(value) => {
                    if attempt > 1 {
                        info!(operation, attempt, max_attempts, "operation succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) => err,
            };

            warn!(operation, attempt, max_attempts, error = %err, "attempt failed");

            if attempt >= max_attempts {
                error!(operation, attempts = attempt, error = %err, "retry budget exhausted");
                return Err(DomainError::RetryExhausted {
                    operation: operation.to_owned(),
                    attempts: attempt,
                    source: Box::new(err),
                });
            }

            let delay = self.policy.backoff_delay(attempt);
            info!(
                operation,
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "waiting before next attempt"
            );

            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    warn!(operation, attempt, "cancelled while waiting to retry");
                    return Err(DomainError::Cancelled {
                        operation: operation.to_owned(),
                    });
                }
                () = self.sleeper.sleep(delay) => {}
            }

            attempt += 1;
        }
    }

    /// Runs a unit of work that produces no value. See [`Self::execute`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::execute`].
    pub async fn execute_unit<F, Fut>(
        &self,
        operation: &str,
        cancel: &CancellationSignal,
        op: F,
    ) -> Result<(), DomainError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), DomainError>>,
    {
        self.execute(operation, cancel, op).await
    }
}
