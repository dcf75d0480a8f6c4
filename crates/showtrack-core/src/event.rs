//! Domain event abstractions.

/// Trait that all domain events implement.
///
/// Events are immutable facts produced by an external publisher. They are
/// delivered once per handler invocation and discarded after handling.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name (used for logging and routing).
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;
}
