//! Application layer: event handlers and the recommendation-log update they
//! share.

pub mod event_handlers;
pub mod recommendation_logs;
