use crate::protocol::{
    response::{ChatMessageResponse, ChatRecord},
    CorrelationId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
    Server(ServerEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }
}

/// Events pushed into the loop by the transport adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    Connected { session_id: String },
    Disconnected,
    AckReceived { correlation: CorrelationId },
    Broadcast(ChatMessageResponse),
    HistoryReceived(Vec<ChatRecord>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityStatus {
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectivityStatus {
    pub fn as_label(&self) -> &'static str {
        match self {
            ConnectivityStatus::Connecting => "connecting",
            ConnectivityStatus::Connected => "connected",
            ConnectivityStatus::Disconnected => "disconnected",
        }
    }
}
