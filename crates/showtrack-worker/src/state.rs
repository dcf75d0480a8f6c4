//! Shared application state.

use std::sync::Arc;

use showtrack_core::cancellation::CancellationSignal;
use showtrack_core::clock::SystemClock;
use showtrack_core::handler::EventHandler;
use showtrack_recommendations::application::event_handlers::{
    EpisodeWatchedHandler, ReviewCreatedHandler,
};
use showtrack_recommendations::application::recommendation_logs::RecommendationLogIsolation;
use showtrack_recommendations::domain::events::{EpisodeWatched, ReviewCreated};
use showtrack_retry::RetryExecutor;
use showtrack_store::pg_recommendation_log_repository::PgRecommendationLogRepository;
use showtrack_store::pg_watching_status_lookup::PgWatchingStatusLookup;
use sqlx::PgPool;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Handler for episode-watched events.
    pub episode_watched: Arc<dyn EventHandler<EpisodeWatched>>,
    /// Handler for review-created events.
    pub review_created: Arc<dyn EventHandler<ReviewCreated>>,
    /// Fired on shutdown; aborts handlers waiting to retry.
    pub cancellation: CancellationSignal,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        episode_watched: Arc<dyn EventHandler<EpisodeWatched>>,
        review_created: Arc<dyn EventHandler<ReviewCreated>>,
        cancellation: CancellationSignal,
    ) -> Self {
        Self {
            episode_watched,
            review_created,
            cancellation,
        }
    }

    /// Wires both handlers to PostgreSQL-backed collaborators.
    #[must_use]
    pub fn postgres(
        pool: PgPool,
        retry: RetryExecutor,
        isolation: RecommendationLogIsolation,
        cancellation: CancellationSignal,
    ) -> Self {
        let repository = Arc::new(PgRecommendationLogRepository::new(pool.clone()));
        let watching_status = Arc::new(PgWatchingStatusLookup::new(pool));
        let clock = Arc::new(SystemClock);

        let episode_watched = EpisodeWatchedHandler::new(
            repository.clone(),
            watching_status,
            clock.clone(),
            retry.clone(),
        )
        .with_isolation(isolation);
        let review_created =
            ReviewCreatedHandler::new(repository, clock, retry).with_isolation(isolation);

        Self::new(
            Arc::new(episode_watched),
            Arc::new(review_created),
            cancellation,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use showtrack_core::error::DomainError;
    use sqlx::postgres::PgPoolOptions;

    use super::*;

    /// A pool that never reaches a database: every acquire times out fast.
    fn unreachable_pool() -> PgPool {
        PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://showtrack@127.0.0.1:1/showtrack")
            .unwrap()
    }

    fn high_rating() -> ReviewCreated {
        ReviewCreated {
            rating_id: 3,
            user_id: 1,
            series_id: 5,
            score: 9,
        }
    }

    #[tokio::test]
    async fn test_postgres_wiring_with_retried_isolation_surfaces_log_failures() {
        // Arrange
        let cancellation = CancellationSignal::new();
        cancellation.cancel();
        let state = AppState::postgres(
            unreachable_pool(),
            RetryExecutor::default(),
            RecommendationLogIsolation::Retried,
            cancellation.clone(),
        );

        // Act
        let result = state
            .review_created
            .handle(&high_rating(), &state.cancellation)
            .await;

        // Assert
        assert!(matches!(result, Err(DomainError::Cancelled { .. })));
    }

    #[tokio::test]
    async fn test_postgres_wiring_with_isolated_mode_swallows_log_failures() {
        // Arrange
        let state = AppState::postgres(
            unreachable_pool(),
            RetryExecutor::default(),
            RecommendationLogIsolation::Isolated,
            CancellationSignal::new(),
        );

        // Act
        let result = state
            .review_created
            .handle(&high_rating(), &state.cancellation)
            .await;

        // Assert
        assert!(result.is_ok());
    }
}
