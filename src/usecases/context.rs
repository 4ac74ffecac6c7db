use crate::infra::config::AppConfig;

/// Resolved application context, passed explicitly to everything that
/// needs configuration. No part of the app reads shared mutable config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatContext {
    pub config: AppConfig,
}

impl ChatContext {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}
