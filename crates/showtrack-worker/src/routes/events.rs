//! Event ingestion routes.
//!
//! The publisher POSTs one event per request. A `503` response means the
//! handler gave up (retry budget spent or shutdown in progress) and the
//! publisher should requeue or dead-letter the event.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::Serialize;
use showtrack_core::event::DomainEvent;
use showtrack_recommendations::domain::events::{EpisodeWatched, ReviewCreated};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body returned once an event has been handled.
#[derive(Debug, Serialize)]
pub struct EventProcessedResponse {
    /// The handled event's type name.
    pub event_type: &'static str,
    /// Correlation ID logged while handling the event.
    pub correlation_id: Uuid,
    /// Always `processed`.
    pub status: &'static str,
}

impl EventProcessedResponse {
    fn processed(event: &impl DomainEvent, correlation_id: Uuid) -> Self {
        Self {
            event_type: event.event_type(),
            correlation_id,
            status: "processed",
        }
    }
}

/// POST /episode-watched
#[instrument(
    skip(state, event),
    fields(episode_id = event.episode_id, user_id = event.user_id)
)]
async fn episode_watched(
    State(state): State<AppState>,
    Json(event): Json<EpisodeWatched>,
) -> Result<Json<EventProcessedResponse>, ApiError> {
    event.validate()?;

    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "delivering episode_watched event");

    state
        .episode_watched
        .handle(&event, &state.cancellation)
        .await?;

    Ok(Json(EventProcessedResponse::processed(&event, correlation_id)))
}

/// POST /review-created
#[instrument(
    skip(state, event),
    fields(rating_id = event.rating_id, user_id = event.user_id)
)]
async fn review_created(
    State(state): State<AppState>,
    Json(event): Json<ReviewCreated>,
) -> Result<Json<EventProcessedResponse>, ApiError> {
    event.validate()?;

    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "delivering review_created event");

    state
        .review_created
        .handle(&event, &state.cancellation)
        .await?;

    Ok(Json(EventProcessedResponse::processed(&event, correlation_id)))
}

/// Returns the router for event ingestion.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/episode-watched", post(episode_watched))
        .route("/review-created", post(review_created))
}
