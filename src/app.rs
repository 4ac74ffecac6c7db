use std::sync::mpsc;

use anyhow::Result;
use chrono::Duration;

use crate::{
    cli::{Cli, Command},
    infra::{config::ChatConfig, error::AppError},
    transport::websocket::WebSocketPort,
    ui,
    usecases::{bootstrap, shell::ChatShellOrchestrator},
};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command_or_default() {
        Command::Run => {
            let mut context = bootstrap::bootstrap(cli.config.as_deref())?;
            apply_chat_overrides(&mut context.config.chat, cli.from, cli.to);

            let (event_tx, event_rx) = mpsc::channel();
            let socket = WebSocketPort::start(context.config.server.endpoint_url(), event_tx)
                .map_err(AppError::TransportStart)?;

            let mut orchestrator = ChatShellOrchestrator::new(
                socket,
                context.config.chat.clone(),
                Duration::milliseconds(context.config.delivery.ack_timeout_ms as i64),
            );
            let mut event_source = ui::CompositeEventSource::new(event_rx);

            ui::shell::start(&context, &mut event_source, &mut orchestrator)?;
        }
    }

    Ok(())
}

/// Command-line usernames win over the config file.
fn apply_chat_overrides(chat: &mut ChatConfig, from: Option<String>, to: Option<String>) {
    if let Some(from_username) = from {
        chat.from_username = from_username;
    }

    if let Some(to_username) = to {
        chat.to_username = to_username;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_usernames_override_configured_ones() {
        let mut chat = ChatConfig {
            from_username: "file-from".to_owned(),
            to_username: "file-to".to_owned(),
        };

        apply_chat_overrides(&mut chat, Some("edet".to_owned()), None);

        assert_eq!(chat.from_username, "edet");
        assert_eq!(chat.to_username, "file-to");
    }

    #[test]
    fn absent_overrides_keep_the_config_values() {
        let mut chat = ChatConfig::default();

        apply_chat_overrides(&mut chat, None, None);

        assert_eq!(chat, ChatConfig::default());
    }
}
