use crate::protocol::CorrelationId;

use super::contracts::{ClientSocket, TransportError};

/// Wraps the live socket and tracks the per-connection session
/// identifier the server assigns on each (re)connect.
///
/// The id is used only to attribute authorship of broadcast responses,
/// never for authorization. Reconnect policy belongs to the socket
/// adapter; this type just re-reads the new id once a reconnection
/// completes.
#[derive(Debug)]
pub struct TransportSession<S> {
    socket: S,
    session_id: String,
}

impl<S: ClientSocket> TransportSession<S> {
    pub fn new(socket: S) -> Self {
        Self {
            socket,
            session_id: String::new(),
        }
    }

    /// Most recent session identifier, empty before the first connect.
    pub fn current_session_id(&self) -> &str {
        &self.session_id
    }

    /// Records the identifier issued for a new connection.
    pub fn handle_connected(&mut self, session_id: String) {
        tracing::info!(session_id = %session_id, "connected to chat server");
        self.session_id = session_id;
    }

    /// The previous id stays readable until the adapter reconnects and a
    /// new one is issued.
    pub fn handle_disconnected(&mut self) {
        tracing::info!("disconnected from chat server");
    }
}

impl<S: ClientSocket> ClientSocket for TransportSession<S> {
    fn emit(&mut self, event: &str, payload: &str) -> Result<(), TransportError> {
        self.socket.emit(event, payload)
    }

    fn emit_with_ack(
        &mut self,
        event: &str,
        payload: &str,
        correlation: CorrelationId,
    ) -> Result<(), TransportError> {
        self.socket.emit_with_ack(event, payload, correlation)
    }
}
