use chrono::{DateTime, Utc};
use serde::Deserialize;

/// The persisted message record carried inside a successful response.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ChatRecord {
    pub from_username: String,
    pub text: String,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

/// Payload of the `save_chat_response` broadcast, fanned out to every
/// connected client including the sender.
///
/// Exactly one of `message`/`error_message` is meaningful per response;
/// `data` is present only when `success` is true. `server_sid` is the
/// session identifier the server attributes the event to.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ChatMessageResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub data: Option<ChatRecord>,
    #[serde(default)]
    pub server_sid: String,
}

impl ChatMessageResponse {
    /// Responses lacking both message fields are treated as malformed
    /// and never rendered.
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.error_message.is_none()
    }
}

/// One page of history replay carried by `fetch_chat_response`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ChatHistoryPage {
    #[serde(default)]
    pub chats: Vec<ChatRecord>,
}
