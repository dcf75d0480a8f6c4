//! Showtrack Store — PostgreSQL adapters for the core persistence traits.

pub mod pg_recommendation_log_repository;
pub mod pg_watching_status_lookup;

use showtrack_core::error::DomainError;
use sqlx::migrate::Migrator;

/// Embedded schema migrations from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Maps a database failure onto the domain's infrastructure error.
pub(crate) fn infrastructure(context: &str, err: &sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("{context}: {err}"))
}
