//! Shared test helpers for worker integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use showtrack_core::cancellation::CancellationSignal;
use showtrack_core::clock::Clock;
use showtrack_core::recommendation::WatchingStatus;
use showtrack_core::repository::{RecommendationLogRepository, WatchingStatusLookup};
use showtrack_recommendations::application::event_handlers::{
    EpisodeWatchedHandler, ReviewCreatedHandler,
};
use showtrack_retry::{RetryExecutor, RetryPolicy};
use showtrack_store::pg_recommendation_log_repository::PgRecommendationLogRepository;
use showtrack_store::pg_watching_status_lookup::PgWatchingStatusLookup;
use showtrack_test_support::{FixedClock, RecordingSleeper, StaticWatchingStatusLookup};
use sqlx::PgPool;
use tower::ServiceExt;

use showtrack_worker::routes;
use showtrack_worker::state::AppState;

fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Retry executor with the default budget that records backoff delays
/// instead of sleeping.
fn instant_retry() -> RetryExecutor {
    RetryExecutor::with_sleeper(RetryPolicy::default(), Arc::new(RecordingSleeper::new()))
}

fn build_app(
    repository: Arc<dyn RecommendationLogRepository>,
    watching_status: Arc<dyn WatchingStatusLookup>,
    cancellation: CancellationSignal,
) -> Router {
    let clock = fixed_clock();
    let retry = instant_retry();
    let episode_watched =
        EpisodeWatchedHandler::new(repository.clone(), watching_status, clock.clone(), retry.clone());
    let review_created = ReviewCreatedHandler::new(repository, clock, retry);
    let app_state = AppState::new(
        Arc::new(episode_watched),
        Arc::new(review_created),
        cancellation,
    );

    routes::app(app_state)
}

/// Build the full app router backed by PostgreSQL, with a fixed clock and
/// no real backoff sleeps. Uses the same route structure as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(
        Arc::new(PgRecommendationLogRepository::new(pool.clone())),
        Arc::new(PgWatchingStatusLookup::new(pool)),
        CancellationSignal::new(),
    )
}

/// Build the full app router over an in-memory repository.
pub fn build_in_memory_app(
    repository: Arc<dyn RecommendationLogRepository>,
    cancellation: CancellationSignal,
) -> Router {
    build_app(
        repository,
        Arc::new(StaticWatchingStatusLookup::new(WatchingStatus::Watching)),
        cancellation,
    )
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}
