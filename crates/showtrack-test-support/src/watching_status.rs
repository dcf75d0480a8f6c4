//! Test lookups — mock `WatchingStatusLookup` implementations.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use showtrack_core::error::DomainError;
use showtrack_core::recommendation::WatchingStatus;
use showtrack_core::repository::WatchingStatusLookup;

/// A lookup that returns the same status for every user and series.
#[derive(Debug)]
pub struct StaticWatchingStatusLookup {
    status: WatchingStatus,
    calls: AtomicU32,
}

impl StaticWatchingStatusLookup {
    /// Create a lookup answering `status`.
    #[must_use]
    pub fn new(status: WatchingStatus) -> Self {
        Self {
            status,
            calls: AtomicU32::new(0),
        }
    }

    /// Number of lookups so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WatchingStatusLookup for StaticWatchingStatusLookup {
    async fn status(&self, _user_id: i64, _series_id: i64) -> Result<WatchingStatus, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.status)
    }
}

/// A lookup that always fails.
#[derive(Debug, Default)]
pub struct FailingWatchingStatusLookup {
    calls: AtomicU32,
}

impl FailingWatchingStatusLookup {
    /// Create a failing lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lookups so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WatchingStatusLookup for FailingWatchingStatusLookup {
    async fn status(&self, _user_id: i64, _series_id: i64) -> Result<WatchingStatus, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::Infrastructure("watching-state service unavailable".into()))
    }
}
