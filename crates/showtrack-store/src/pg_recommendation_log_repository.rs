//! `PostgreSQL` implementation of the `RecommendationLogRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;

use showtrack_core::error::DomainError;
use showtrack_core::recommendation::{RecommendationLogEntry, RecommendationLogFilter};
use showtrack_core::repository::RecommendationLogRepository;

use crate::infrastructure;

/// PostgreSQL-backed recommendation log repository.
#[derive(Debug, Clone)]
pub struct PgRecommendationLogRepository {
    pool: PgPool,
}

impl PgRecommendationLogRepository {
    /// Creates a new `PgRecommendationLogRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RecommendationLogRow {
    id: i64,
    user_id: i64,
    series_id: i64,
    watched: bool,
    recommended_at: DateTime<Utc>,
    watched_at: Option<DateTime<Utc>>,
}

impl From<RecommendationLogRow> for RecommendationLogEntry {
    fn from(row: RecommendationLogRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            series_id: row.series_id,
            watched: row.watched,
            recommended_at: row.recommended_at,
            watched_at: row.watched_at,
        }
    }
}

#[async_trait]
impl RecommendationLogRepository for PgRecommendationLogRepository {
    async fn find(
        &self,
        filter: &RecommendationLogFilter,
    ) -> Result<Vec<RecommendationLogEntry>, DomainError> {
        let rows: Vec<RecommendationLogRow> = sqlx::query_as(
            r"
            SELECT id, user_id, series_id, watched, recommended_at, watched_at
            FROM recommendation_logs
            WHERE user_id = $1
              AND series_id = $2
              AND ($3::BOOLEAN IS NULL OR watched = $3)
            ORDER BY id
            ",
        )
        .bind(filter.user_id)
        .bind(filter.series_id)
        .bind(filter.watched)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| infrastructure("failed to load recommendation logs", &e))?;

        Ok(rows.into_iter().map(RecommendationLogEntry::from).collect())
    }

    async fn save(&self, entries: &[RecommendationLogEntry]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| infrastructure("failed to begin transaction", &e))?;

        // `watched` only ever moves to true, even if a concurrent writer got
        // there first.
        for entry in entries {
            sqlx::query(
                r"
                UPDATE recommendation_logs
                SET watched = watched OR $2,
                    watched_at = COALESCE(watched_at, $3)
                WHERE id = $1
                ",
            )
            .bind(entry.id)
            .bind(entry.watched)
            .bind(entry.watched_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| infrastructure("failed to update recommendation log", &e))?;
        }

        tx.commit()
            .await
            .map_err(|e| infrastructure("failed to commit recommendation logs", &e))?;

        debug!(count = entries.len(), "saved recommendation logs");
        Ok(())
    }
}
