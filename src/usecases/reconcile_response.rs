//! Reconciliation of broadcast responses into feed entries.
//!
//! The server fans `save_chat_response` out to every connected client,
//! the sender included, so this is the single place a message becomes
//! visible. Local echo does not exist; a message the server never
//! broadcast never appears.

use chrono::{DateTime, Utc};

use crate::domain::message::{
    relative_age, AuthorSide, DeliveryStatus, RenderedEntry, AUTHOR_PLACEHOLDER,
};
use crate::protocol::response::ChatMessageResponse;

/// Turns a broadcast response into a renderable feed entry.
///
/// Returns `None` for responses carrying neither a status message nor
/// an error message; those are malformed and skipped. Failed saves are
/// still rendered, marked as failed.
pub fn reconcile(
    response: &ChatMessageResponse,
    local_session_id: &str,
    now: DateTime<Utc>,
) -> Option<RenderedEntry> {
    if response.is_empty() {
        tracing::warn!("skipping chat response without any message field");
        return None;
    }

    let record = if response.success {
        response.data.as_ref()
    } else {
        None
    };

    let author = record
        .map(|record| record.from_username.clone())
        .unwrap_or_else(|| AUTHOR_PLACEHOLDER.to_owned());

    let text = record
        .map(|record| record.text.as_str())
        .filter(|text| !text.is_empty())
        .or(response.message.as_deref())
        .or(response.error_message.as_deref())?
        .to_owned();

    let timestamp = record
        .map(|record| record.updated.unwrap_or(record.created))
        .unwrap_or(now);

    let side = if !local_session_id.is_empty() && response.server_sid == local_session_id {
        AuthorSide::Outgoing
    } else {
        AuthorSide::Incoming
    };

    let status = if response.success {
        DeliveryStatus::Delivered
    } else {
        DeliveryStatus::Failed
    };

    Some(RenderedEntry {
        author,
        text,
        age_label: relative_age(timestamp, now),
        side,
        status,
    })
}
