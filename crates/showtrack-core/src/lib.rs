//! Showtrack Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the retry
//! executor, the event handlers, and the persistence adapters depend on.
//! It contains no infrastructure code.

pub mod cancellation;
pub mod clock;
pub mod error;
pub mod event;
pub mod handler;
pub mod recommendation;
pub mod repository;
pub mod sleeper;
