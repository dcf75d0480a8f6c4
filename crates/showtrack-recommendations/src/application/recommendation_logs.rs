//! Recommendation-log bookkeeping shared by both event handlers.

use std::fmt;
use std::str::FromStr;

use showtrack_core::clock::Clock;
use showtrack_core::error::DomainError;
use showtrack_core::recommendation::RecommendationLogFilter;
use showtrack_core::repository::RecommendationLogRepository;
use tracing::{debug, info, warn};

/// How a failed recommendation-log update inside a retried unit of work is
/// treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecommendationLogIsolation {
    /// Log the failure and carry on. The surrounding retry never sees it and
    /// event handling succeeds.
    #[default]
    Isolated,
    /// Propagate the failure so the retry executor retries it and, once the
    /// budget is spent, the handler fails with `RetryExhausted`.
    Retried,
}

impl RecommendationLogIsolation {
    /// Returns the configuration name of this mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Isolated => "isolated",
            Self::Retried => "retried",
        }
    }
}

impl fmt::Display for RecommendationLogIsolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationLogIsolation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isolated" => Ok(Self::Isolated),
            "retried" => Ok(Self::Retried),
            other => Err(DomainError::Validation(format!(
                "unknown recommendation log isolation '{other}' (expected 'isolated' or 'retried')"
            ))),
        }
    }
}

/// Marks every unwatched recommendation log for `(user_id, series_id)` as
/// watched and saves them as one batch. Returns how many entries changed.
///
/// Zero matches is a no-op and skips the save.
///
/// # Errors
///
/// Returns `DomainError` if loading or saving the entries fails.
pub async fn mark_recommendations_watched(
    repo: &dyn RecommendationLogRepository,
    clock: &dyn Clock,
    user_id: i64,
    series_id: i64,
) -> Result<usize, DomainError> {
    let mut entries = repo
        .find(&RecommendationLogFilter::unwatched(user_id, series_id))
        .await?;

    let now = clock.now();
    entries.retain_mut(|entry| entry.mark_watched(now));

    if entries.is_empty() {
        debug!(user_id, series_id, "no unwatched recommendation logs to update");
        return Ok(0);
    }

    repo.save(&entries).await?;

    info!(
        user_id,
        series_id,
        updated = entries.len(),
        "recommendation logs marked watched"
    );
    Ok(entries.len())
}

/// Runs [`mark_recommendations_watched`] under the given isolation mode.
///
/// # Errors
///
/// Only in `RecommendationLogIsolation::Retried` mode, when the update fails.
pub(crate) async fn update_recommendation_logs(
    repo: &dyn RecommendationLogRepository,
    clock: &dyn Clock,
    isolation: RecommendationLogIsolation,
    user_id: i64,
    series_id: i64,
) -> Result<usize, DomainError> {
    match mark_recommendations_watched(repo, clock, user_id, series_id).await {
        Ok(updated) => Ok(updated),
        Err(err) if isolation == RecommendationLogIsolation::Isolated => {
            warn!(
                user_id,
                series_id,
                error = %err,
                "failed to update recommendation logs; continuing"
            );
            Ok(0)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use showtrack_core::error::DomainError;
    use showtrack_core::recommendation::RecommendationLogEntry;
    use showtrack_test_support::{
        FailingRecommendationLogRepository, FixedClock, InMemoryRecommendationLogRepository,
    };

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
    }

    fn log(id: i64, user_id: i64, series_id: i64, watched: bool) -> RecommendationLogEntry {
        RecommendationLogEntry {
            id,
            user_id,
            series_id,
            watched,
            recommended_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            watched_at: None,
        }
    }

    #[tokio::test]
    async fn test_marks_only_matching_unwatched_logs() {
        // Arrange
        let repo = InMemoryRecommendationLogRepository::new(vec![
            log(1, 1, 5, false),
            log(2, 1, 5, false),
            log(3, 1, 6, false),
            log(4, 2, 5, false),
        ]);
        let clock = FixedClock(now());

        // Act
        let updated = mark_recommendations_watched(&repo, &clock, 1, 5).await.unwrap();

        // Assert
        assert_eq!(updated, 2);
        let watched: Vec<i64> = repo
            .rows()
            .iter()
            .filter(|row| row.watched)
            .map(|row| row.id)
            .collect();
        assert_eq!(watched, vec![1, 2]);
        assert!(
            repo.rows()
                .iter()
                .filter(|row| row.watched)
                .all(|row| row.watched_at == Some(now()))
        );
    }

    #[tokio::test]
    async fn test_no_matching_logs_skips_save() {
        // Arrange
        let repo = InMemoryRecommendationLogRepository::new(vec![log(1, 1, 5, true)]);
        let clock = FixedClock(now());

        // Act
        let updated = mark_recommendations_watched(&repo, &clock, 1, 5).await.unwrap();

        // Assert
        assert_eq!(updated, 0);
        assert_eq!(repo.find_calls(), 1);
        assert!(repo.saved_batches().is_empty());
    }

    #[tokio::test]
    async fn test_isolated_update_swallows_repository_failure() {
        // Arrange
        let repo = FailingRecommendationLogRepository::new();
        let clock = FixedClock(now());

        // Act
        let result = update_recommendation_logs(
            &repo,
            &clock,
            RecommendationLogIsolation::Isolated,
            1,
            5,
        )
        .await;

        // Assert
        assert_eq!(result.unwrap(), 0);
        assert_eq!(repo.calls(), 1);
    }

    #[tokio::test]
    async fn test_retried_update_propagates_repository_failure() {
        // Arrange
        let repo = FailingRecommendationLogRepository::new();
        let clock = FixedClock(now());

        // Act
        let result = update_recommendation_logs(
            &repo,
            &clock,
            RecommendationLogIsolation::Retried,
            1,
            5,
        )
        .await;

        // Assert
        match result {
            Err(DomainError::Infrastructure(msg)) => assert_eq!(msg, "connection refused"),
            other => panic!("expected Infrastructure, got {other:?}"),
        }
    }

    #[test]
    fn test_isolation_parses_configuration_names() {
        assert_eq!(
            "isolated".parse::<RecommendationLogIsolation>().unwrap(),
            RecommendationLogIsolation::Isolated
        );
        assert_eq!(
            " Retried ".parse::<RecommendationLogIsolation>().unwrap(),
            RecommendationLogIsolation::Retried
        );
        assert_eq!(RecommendationLogIsolation::Retried.to_string(), "retried");
        assert!(matches!(
            "sometimes".parse::<RecommendationLogIsolation>(),
            Err(DomainError::Validation(_))
        ));
    }
}
