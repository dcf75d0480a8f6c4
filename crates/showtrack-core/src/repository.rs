//! Persistence abstractions consumed by the event handlers.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::recommendation::{RecommendationLogEntry, RecommendationLogFilter, WatchingStatus};

/// Repository trait for reading and saving recommendation log entries.
#[async_trait]
pub trait RecommendationLogRepository: Send + Sync {
    /// Load every entry matching `filter`.
    async fn find(
        &self,
        filter: &RecommendationLogFilter,
    ) -> Result<Vec<RecommendationLogEntry>, DomainError>;

    /// Persist a batch of modified entries as one unit of work.
    async fn save(&self, entries: &[RecommendationLogEntry]) -> Result<(), DomainError>;
}

/// Looks up a user's current watching state for a series.
#[async_trait]
pub trait WatchingStatusLookup: Send + Sync {
    /// Returns the watching status of `user_id` for `series_id`.
    async fn status(&self, user_id: i64, series_id: i64) -> Result<WatchingStatus, DomainError>;
}
