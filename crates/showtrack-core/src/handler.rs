//! Event handler abstraction.

use async_trait::async_trait;

use crate::cancellation::CancellationSignal;
use crate::error::DomainError;
use crate::event::DomainEvent;

/// Handles one delivered domain event of type `E`.
///
/// The delivery layer calls `handle` once per event. Handlers are stateless
/// and may be invoked concurrently for different events. Only terminal
/// errors (see [`DomainError::is_terminal`]) are expected to escape; the
/// caller decides whether to dead-letter or requeue the event.
#[async_trait]
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    /// Process a single event.
    async fn handle(&self, event: &E, cancel: &CancellationSignal) -> Result<(), DomainError>;
}
