use serde::Deserialize;

use crate::infra::config::{AppConfig, ChatConfig, DeliveryConfig, LogConfig, ServerConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub server: Option<FileServerConfig>,
    pub chat: Option<FileChatConfig>,
    pub delivery: Option<FileDeliveryConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(server) = self.server {
            server.merge_into(&mut config.server);
        }

        if let Some(chat) = self.chat {
            chat.merge_into(&mut config.chat);
        }

        if let Some(delivery) = self.delivery {
            delivery.merge_into(&mut config.delivery);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl FileServerConfig {
    fn merge_into(self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }

        if let Some(port) = self.port {
            config.port = port;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileChatConfig {
    pub from_username: Option<String>,
    pub to_username: Option<String>,
}

impl FileChatConfig {
    fn merge_into(self, config: &mut ChatConfig) {
        if let Some(from_username) = self.from_username {
            config.from_username = from_username;
        }

        if let Some(to_username) = self.to_username {
            config.to_username = to_username;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileDeliveryConfig {
    pub ack_timeout_ms: Option<u64>,
}

impl FileDeliveryConfig {
    fn merge_into(self, config: &mut DeliveryConfig) {
        if let Some(timeout_ms) = self.ack_timeout_ms {
            config.ack_timeout_ms = timeout_ms;
        }
    }
}
