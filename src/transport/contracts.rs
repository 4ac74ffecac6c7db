use thiserror::Error;

use crate::protocol::CorrelationId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("transport channel closed")]
    ChannelClosed,
    #[error("payload is not valid JSON: {0}")]
    InvalidPayload(String),
    #[error("failed to start transport runtime: {0}")]
    Runtime(String),
}

/// Outbound side of the event channel.
///
/// Inbound traffic does not pass through this trait: the adapter pushes
/// server events into the app event channel on its own.
pub trait ClientSocket {
    /// Fire-and-forget emission. `payload` is already-serialized JSON.
    fn emit(&mut self, event: &str, payload: &str) -> Result<(), TransportError>;

    /// Emission the server answers with an `ack` frame carrying the same
    /// correlation id.
    fn emit_with_ack(
        &mut self,
        event: &str,
        payload: &str,
        correlation: CorrelationId,
    ) -> Result<(), TransportError>;
}
