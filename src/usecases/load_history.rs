//! One-shot history replay for the configured conversation.

use chrono::{DateTime, Utc};

use crate::domain::message::{relative_age, AuthorSide, DeliveryStatus, RenderedEntry};
use crate::protocol::{self, response::ChatRecord};
use crate::transport::contracts::{ClientSocket, TransportError};

/// Requests the stored conversation for `username`. The reply arrives
/// asynchronously as a `fetch_chat_response` frame.
pub fn load_history(
    socket: &mut dyn ClientSocket,
    username: &str,
) -> Result<(), TransportError> {
    let payload = serde_json::to_string(username)
        .map_err(|error| TransportError::InvalidPayload(error.to_string()))?;

    tracing::info!(username = %username, "requesting chat history");
    socket.emit(protocol::FETCH_CHAT_REQUEST, &payload)
}

/// Renders one replayed record. Replayed entries carry no session id,
/// so authorship is attributed by username instead.
pub fn history_entry(
    record: &ChatRecord,
    local_username: &str,
    now: DateTime<Utc>,
) -> RenderedEntry {
    let side = if record.from_username == local_username {
        AuthorSide::Outgoing
    } else {
        AuthorSide::Incoming
    };

    let timestamp = record.updated.unwrap_or(record.created);

    RenderedEntry {
        author: record.from_username.clone(),
        text: record.text.clone(),
        age_label: relative_age(timestamp, now),
        side,
        status: DeliveryStatus::Delivered,
    }
}
