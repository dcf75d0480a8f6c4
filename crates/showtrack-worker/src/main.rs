//! Showtrack recommendation worker entry point.

use std::error::Error;

use showtrack_core::cancellation::CancellationSignal;
use showtrack_retry::RetryExecutor;
use showtrack_store::MIGRATOR;
use showtrack_worker::config::WorkerConfig;
use showtrack_worker::routes;
use showtrack_worker::state::AppState;
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting showtrack recommendation worker");

    let config = WorkerConfig::from_env()?;
    let retry = RetryExecutor::new(config.retry);
    tracing::info!(
        max_attempts = retry.policy().max_attempts,
        base_delay_secs = retry.policy().base_delay.as_secs(),
        max_delay_secs = retry.policy().max_delay.as_secs(),
        isolation = %config.isolation,
        "retry policy configured"
    );

    // Create database connection pool and bring the schema up to date.
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    MIGRATOR.run(&pool).await?;

    let cancellation = CancellationSignal::new();
    let app_state = AppState::postgres(pool, retry, config.isolation, cancellation.clone());

    let app = routes::app(app_state).layer(TraceLayer::new_for_http());

    let addr = config.bind_address()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancellation))
        .await?;

    tracing::info!("Worker stopped");
    Ok(())
}

/// Resolves on Ctrl-C, then cancels handlers that are waiting to retry so
/// in-flight requests finish promptly.
async fn shutdown_signal(cancellation: CancellationSignal) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received; cancelling pending retries");
    cancellation.cancel();
}
