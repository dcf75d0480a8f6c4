//! Event handlers for the recommendation-tracking context.
//!
//! Each handler guards on its event, then runs the recommendation-log update
//! inside the retry executor. Only `RetryExhausted` or `Cancelled` escape
//! `handle`; the delivery layer decides what to do with them.

use std::sync::Arc;

use async_trait::async_trait;
use showtrack_core::cancellation::CancellationSignal;
use showtrack_core::clock::Clock;
use showtrack_core::error::DomainError;
use showtrack_core::handler::EventHandler;
use showtrack_core::repository::{RecommendationLogRepository, WatchingStatusLookup};
use showtrack_retry::RetryExecutor;
use tracing::{debug, info, instrument, warn};

use crate::application::recommendation_logs::{
    RecommendationLogIsolation, update_recommendation_logs,
};
use crate::domain::events::{EpisodeWatched, HIGH_RATING_THRESHOLD, ReviewCreated};

/// Marks recommendations watched when a user completes an episode.
pub struct EpisodeWatchedHandler {
    repository: Arc<dyn RecommendationLogRepository>,
    watching_status: Arc<dyn WatchingStatusLookup>,
    clock: Arc<dyn Clock>,
    retry: RetryExecutor,
    isolation: RecommendationLogIsolation,
}

impl EpisodeWatchedHandler {
    /// Creates a handler with isolated recommendation-log updates.
    #[must_use]
    pub fn new(
        repository: Arc<dyn RecommendationLogRepository>,
        watching_status: Arc<dyn WatchingStatusLookup>,
        clock: Arc<dyn Clock>,
        retry: RetryExecutor,
    ) -> Self {
        Self {
            repository,
            watching_status,
            clock,
            retry,
            isolation: RecommendationLogIsolation::default(),
        }
    }

    /// Overrides how recommendation-log failures are treated.
    #[must_use]
    pub fn with_isolation(mut self, isolation: RecommendationLogIsolation) -> Self {
        self.isolation = isolation;
        self
    }

    async fn process(&self, event: &EpisodeWatched) -> Result<(), DomainError> {
        let updated = update_recommendation_logs(
            self.repository.as_ref(),
            self.clock.as_ref(),
            self.isolation,
            event.user_id,
            event.series_id,
        )
        .await?;

        // Advisory only: a failed lookup never fails or retries the event.
        match self
            .watching_status
            .status(event.user_id, event.series_id)
            .await
        {
            Ok(status) => info!(%status, "current watching status"),
            Err(err) => warn!(error = %err, "could not read watching status; continuing"),
        }

        info!(updated, "episode watched event processed");
        Ok(())
    }
}

#[async_trait]
impl EventHandler<EpisodeWatched> for EpisodeWatchedHandler {
    #[instrument(
        skip(self, event, cancel),
        fields(
            episode_id = event.episode_id,
            user_id = event.user_id,
            series_id = event.series_id
        )
    )]
    async fn handle(
        &self,
        event: &EpisodeWatched,
        cancel: &CancellationSignal,
    ) -> Result<(), DomainError> {
        info!(is_completed = event.is_completed, "episode watched event received");

        if !event.is_completed {
            debug!("episode not completed; no recommendation update");
            return Ok(());
        }

        let operation = format!(
            "episode-watched(episode={}, user={})",
            event.episode_id, event.user_id
        );
        self.retry
            .execute_unit(&operation, cancel, move || self.process(event))
            .await
    }
}

/// Marks recommendations watched when a user rates the series highly.
pub struct ReviewCreatedHandler {
    repository: Arc<dyn RecommendationLogRepository>,
    clock: Arc<dyn Clock>,
    retry: RetryExecutor,
    isolation: RecommendationLogIsolation,
}

impl ReviewCreatedHandler {
    /// Creates a handler with isolated recommendation-log updates.
    #[must_use]
    pub fn new(
        repository: Arc<dyn RecommendationLogRepository>,
        clock: Arc<dyn Clock>,
        retry: RetryExecutor,
    ) -> Self {
        Self {
            repository,
            clock,
            retry,
            isolation: RecommendationLogIsolation::default(),
        }
    }

    /// Overrides how recommendation-log failures are treated.
    #[must_use]
    pub fn with_isolation(mut self, isolation: RecommendationLogIsolation) -> Self {
        self.isolation = isolation;
        self
    }

    async fn process(&self, event: &ReviewCreated) -> Result<(), DomainError> {
        let updated = update_recommendation_logs(
            self.repository.as_ref(),
            self.clock.as_ref(),
            self.isolation,
            event.user_id,
            event.series_id,
        )
        .await?;

        info!(updated, "review created event processed");
        Ok(())
    }
}

#[async_trait]
impl EventHandler<ReviewCreated> for ReviewCreatedHandler {
    #[instrument(
        skip(self, event, cancel),
        fields(
            rating_id = event.rating_id,
            user_id = event.user_id,
            series_id = event.series_id
        )
    )]
    async fn handle(
        &self,
        event: &ReviewCreated,
        cancel: &CancellationSignal,
    ) -> Result<(), DomainError> {
        info!(score = event.score, "review created event received");

        if !event.is_high_rating() {
            debug!(
                threshold = HIGH_RATING_THRESHOLD,
                "score below threshold; no recommendation update"
            );
            return Ok(());
        }

        let operation = format!(
            "review-created(rating={}, user={})",
            event.rating_id, event.user_id
        );
        self.retry
            .execute_unit(&operation, cancel, move || self.process(event))
            .await
    }
}
