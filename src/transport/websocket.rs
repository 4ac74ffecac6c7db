//! WebSocket adapter: owns the connection lifecycle and the JSON frame
//! envelope, forwarding inbound frames into the app event channel.

use std::sync::mpsc::Sender;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc as tokio_mpsc, watch};
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::domain::events::{AppEvent, ServerEvent};
use crate::protocol::{
    self,
    response::{ChatHistoryPage, ChatMessageResponse},
    CorrelationId,
};

use super::contracts::{ClientSocket, TransportError};

const RECONNECT_DELAY: Duration = Duration::from_secs(3);

/// One frame leaving the client. The payload is pre-serialized JSON and
/// is embedded verbatim.
#[derive(Debug, Serialize)]
struct OutboundFrame {
    event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation: Option<CorrelationId>,
    payload: Box<RawValue>,
}

/// One frame arriving from the server.
#[derive(Debug, Deserialize)]
struct InboundFrame {
    event: String,
    #[serde(default)]
    correlation: Option<CorrelationId>,
    #[serde(default)]
    payload: Value,
}

#[derive(Debug, Deserialize)]
struct ConnectedPayload {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct HistoryEnvelope {
    #[serde(default)]
    data: Option<ChatHistoryPage>,
}

/// Runs the connection on its own runtime thread. Frames to send are
/// queued through an unbounded channel and flushed while connected;
/// inbound frames become [`ServerEvent`]s on the app event channel.
pub struct WebSocketPort {
    frame_tx: tokio_mpsc::UnboundedSender<OutboundFrame>,
    stop_tx: watch::Sender<bool>,
    runtime: Option<Runtime>,
}

impl WebSocketPort {
    pub fn start(endpoint_url: String, events: Sender<AppEvent>) -> Result<Self, TransportError> {
        let runtime = Runtime::new().map_err(|error| TransportError::Runtime(error.to_string()))?;
        let (frame_tx, frame_rx) = tokio_mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = watch::channel(false);

        runtime.spawn(run_client(endpoint_url, events, frame_rx, stop_rx));

        Ok(Self {
            frame_tx,
            stop_tx,
            runtime: Some(runtime),
        })
    }

    fn send_frame(
        &mut self,
        event: &str,
        payload: &str,
        correlation: Option<CorrelationId>,
    ) -> Result<(), TransportError> {
        let payload = RawValue::from_string(payload.to_owned())
            .map_err(|error| TransportError::InvalidPayload(error.to_string()))?;

        self.frame_tx
            .send(OutboundFrame {
                event: event.to_owned(),
                correlation,
                payload,
            })
            .map_err(|_| TransportError::ChannelClosed)
    }
}

impl ClientSocket for WebSocketPort {
    fn emit(&mut self, event: &str, payload: &str) -> Result<(), TransportError> {
        self.send_frame(event, payload, None)
    }

    fn emit_with_ack(
        &mut self,
        event: &str,
        payload: &str,
        correlation: CorrelationId,
    ) -> Result<(), TransportError> {
        self.send_frame(event, payload, Some(correlation))
    }
}

impl Drop for WebSocketPort {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(true);
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

enum ConnectionEnd {
    /// Connection lost; the outer loop reconnects after a delay.
    Reconnect,
    /// Shutdown requested or the app side went away.
    Stop,
}

async fn run_client(
    url: String,
    events: Sender<AppEvent>,
    mut frame_rx: tokio_mpsc::UnboundedReceiver<OutboundFrame>,
    mut stop_rx: watch::Receiver<bool>,
) {
    loop {
        match tokio_tungstenite::connect_async(url.as_str()).await {
            Ok((stream, _)) => {
                let end = drive_connection(stream, &events, &mut frame_rx, &mut stop_rx).await;

                if events
                    .send(AppEvent::Server(ServerEvent::Disconnected))
                    .is_err()
                {
                    return;
                }

                if matches!(end, ConnectionEnd::Stop) {
                    return;
                }
            }
            Err(error) => {
                tracing::warn!(url = %url, error = %error, "chat server connection failed");
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(RECONNECT_DELAY) => {}
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    return;
                }
            }
        }
    }
}

async fn drive_connection(
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    events: &Sender<AppEvent>,
    frame_rx: &mut tokio_mpsc::UnboundedReceiver<OutboundFrame>,
    stop_rx: &mut watch::Receiver<bool>,
) -> ConnectionEnd {
    let (mut sink, mut source) = stream.split();

    loop {
        tokio::select! {
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    return ConnectionEnd::Stop;
                }
            }
            outbound = frame_rx.recv() => {
                let Some(frame) = outbound else {
                    return ConnectionEnd::Stop;
                };
                let json = match serde_json::to_string(&frame) {
                    Ok(json) => json,
                    Err(error) => {
                        tracing::error!(error = %error, "failed to serialize outbound frame");
                        continue;
                    }
                };
                if sink.send(Message::Text(json.into())).await.is_err() {
                    return ConnectionEnd::Reconnect;
                }
            }
            inbound = source.next() => {
                let message = match inbound {
                    Some(Ok(message)) => message,
                    Some(Err(error)) => {
                        tracing::warn!(error = %error, "websocket read failed");
                        return ConnectionEnd::Reconnect;
                    }
                    None => return ConnectionEnd::Reconnect,
                };

                let text = match message {
                    Message::Text(text) => text.as_str().to_owned(),
                    Message::Binary(data) => match String::from_utf8(data.to_vec()) {
                        Ok(text) => text,
                        Err(_) => continue,
                    },
                    Message::Close(_) => return ConnectionEnd::Reconnect,
                    _ => continue,
                };

                let frame: InboundFrame = match serde_json::from_str(&text) {
                    Ok(frame) => frame,
                    Err(error) => {
                        tracing::warn!(error = %error, "ignoring malformed inbound frame");
                        continue;
                    }
                };

                if let Some(event) = map_frame(frame) {
                    if events.send(AppEvent::Server(event)).is_err() {
                        return ConnectionEnd::Stop;
                    }
                }
            }
        }
    }
}

/// Maps a wire frame to the server event the app loop consumes.
fn map_frame(frame: InboundFrame) -> Option<ServerEvent> {
    match frame.event.as_str() {
        protocol::CONNECTED => {
            let payload: ConnectedPayload = match serde_json::from_value(frame.payload) {
                Ok(payload) => payload,
                Err(error) => {
                    tracing::warn!(error = %error, "connected frame without a session id");
                    return None;
                }
            };
            Some(ServerEvent::Connected {
                session_id: payload.sid,
            })
        }
        protocol::ACK => match frame.correlation {
            Some(correlation) => Some(ServerEvent::AckReceived { correlation }),
            None => {
                tracing::warn!("ack frame without a correlation id");
                None
            }
        },
        protocol::SAVE_CHAT_RESPONSE => {
            match serde_json::from_value::<ChatMessageResponse>(frame.payload) {
                Ok(response) => Some(ServerEvent::Broadcast(response)),
                Err(error) => {
                    tracing::warn!(error = %error, "ignoring malformed chat response");
                    None
                }
            }
        }
        protocol::FETCH_CHAT_RESPONSE => {
            match serde_json::from_value::<HistoryEnvelope>(frame.payload) {
                Ok(envelope) => Some(ServerEvent::HistoryReceived(
                    envelope.data.map(|page| page.chats).unwrap_or_default(),
                )),
                Err(error) => {
                    tracing::warn!(error = %error, "ignoring malformed history response");
                    None
                }
            }
        }
        other => {
            tracing::debug!(event = other, "ignoring unhandled server event");
            None
        }
    }
}
