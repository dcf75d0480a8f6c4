//! Worker configuration read from the environment.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use showtrack_recommendations::application::recommendation_logs::RecommendationLogIsolation;
use showtrack_retry::RetryPolicy;

use crate::error::AppError;

/// Runtime settings for the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    /// PostgreSQL connection string (`DATABASE_URL`, required).
    pub database_url: String,
    /// Interface to bind (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// Port to bind (`PORT`, default `3000`).
    pub port: u16,
    /// Pool size (`DATABASE_MAX_CONNECTIONS`, default 10).
    pub max_connections: u32,
    /// Retry budget for event handling (`RETRY_MAX_ATTEMPTS`,
    /// `RETRY_BASE_DELAY_SECS`, `RETRY_MAX_DELAY_SECS`).
    pub retry: RetryPolicy,
    /// Whether recommendation-log failures are swallowed or retried
    /// (`RECOMMENDATION_LOG_ISOLATION`: `isolated` (default) or `retried`).
    pub isolation: RecommendationLogIsolation,
}

impl WorkerConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| {
            AppError::Config("DATABASE_URL environment variable must be set".into())
        })?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", 3000_u16)?;
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10_u32)?;

        let defaults = RetryPolicy::default();
        let retry = RetryPolicy::default()
            .with_max_attempts(parse_or(&lookup, "RETRY_MAX_ATTEMPTS", defaults.max_attempts)?)
            .with_base_delay(Duration::from_secs(parse_or(
                &lookup,
                "RETRY_BASE_DELAY_SECS",
                defaults.base_delay.as_secs(),
            )?))
            .with_max_delay(Duration::from_secs(parse_or(
                &lookup,
                "RETRY_MAX_DELAY_SECS",
                defaults.max_delay.as_secs(),
            )?));

        if retry.max_attempts == 0 {
            return Err(AppError::Config(
                "RETRY_MAX_ATTEMPTS must be at least 1".into(),
            ));
        }

        let isolation = parse_or(
            &lookup,
            "RECOMMENDATION_LOG_ISOLATION",
            RecommendationLogIsolation::default(),
        )?;

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
            retry,
            isolation,
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a valid address.
    pub fn bind_address(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid: {e}"))),
        None => Ok(default),
    }
}
