//! Route modules.

pub mod events;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Builds the full router: health check plus event ingestion.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/events", events::router())
        .with_state(state)
}
