//! `PostgreSQL` implementation of the `WatchingStatusLookup` trait.

use async_trait::async_trait;
use sqlx::PgPool;

use showtrack_core::error::DomainError;
use showtrack_core::recommendation::WatchingStatus;
use showtrack_core::repository::WatchingStatusLookup;

use crate::infrastructure;

/// Reads watching states from the `user_series_states` table.
#[derive(Debug, Clone)]
pub struct PgWatchingStatusLookup {
    pool: PgPool,
}

impl PgWatchingStatusLookup {
    /// Creates a new `PgWatchingStatusLookup`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WatchingStatusLookup for PgWatchingStatusLookup {
    async fn status(&self, user_id: i64, series_id: i64) -> Result<WatchingStatus, DomainError> {
        let status: Option<String> = sqlx::query_scalar(
            "SELECT status FROM user_series_states WHERE user_id = $1 AND series_id = $2",
        )
        .bind(user_id)
        .bind(series_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| infrastructure("failed to load watching status", &e))?;

        status.map_or(Ok(WatchingStatus::NotStarted), |s| s.parse())
    }
}
