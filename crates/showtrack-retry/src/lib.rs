//! Showtrack Retry — bounded retry with exponential backoff.
//!
//! [`RetryExecutor`] runs an asynchronous unit of work, retrying any failure
//! up to [`RetryPolicy::max_attempts`] times with a cancellable backoff
//! sleep between attempts. It is independent of the event handlers and can
//! wrap any operation that returns `Result<T, DomainError>`.

mod executor;
mod policy;

pub use executor::RetryExecutor;
pub use policy::{BASE_DELAY, MAX_DELAY, MAX_RETRIES, RetryPolicy};
