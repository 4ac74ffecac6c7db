//! Wire protocol: event names, payload validation, request/response types.

pub mod payload;
pub mod request;
pub mod response;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Event names shared with the server.
pub const SAVE_CHAT_REQUEST: &str = "save_chat_request";
pub const SAVE_CHAT_RESPONSE: &str = "save_chat_response";
pub const FETCH_CHAT_REQUEST: &str = "fetch_chat_request";
pub const FETCH_CHAT_RESPONSE: &str = "fetch_chat_response";
pub const ACK: &str = "ack";
pub const CONNECTED: &str = "connected";

/// Identifier correlating a request with its direct acknowledgment.
/// Scoped to one connection; assigned by the client, echoed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(pub u64);

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
