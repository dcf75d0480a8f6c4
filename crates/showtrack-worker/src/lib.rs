//! Showtrack worker — HTTP delivery surface for recommendation-tracking
//! events.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
