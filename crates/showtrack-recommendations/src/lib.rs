//! Showtrack — recommendation-tracking bounded context.
//!
//! Consumes episode-watched and review-created events and marks the
//! matching recommendation logs as watched.

pub mod application;
pub mod domain;
