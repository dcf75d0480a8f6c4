//! Domain types for the recommendation-tracking context.

pub mod events;
