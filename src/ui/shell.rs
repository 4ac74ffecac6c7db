use anyhow::Result;

use crate::usecases::{
    context::ChatContext,
    contracts::{AppEventSource, ShellOrchestrator},
};

use super::{terminal::TerminalSession, view};

pub fn start(
    context: &ChatContext,
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    tracing::info!(
        log_level = %context.config.logging.level,
        endpoint = %context.config.server.endpoint_url(),
        "starting chat shell"
    );

    let mut terminal = TerminalSession::new()?;

    while orchestrator.state().is_running() {
        terminal.draw(|frame| view::render(frame, orchestrator.state()))?;

        if let Some(event) = event_source.next_event()? {
            orchestrator.handle_event(event)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use crate::{
        domain::events::AppEvent,
        infra::config::ChatConfig,
        protocol::CorrelationId,
        transport::contracts::{ClientSocket, TransportError},
        ui::event_source::MockEventSource,
        usecases::shell::ChatShellOrchestrator,
    };

    use super::*;

    struct NullSocket;

    impl ClientSocket for NullSocket {
        fn emit(&mut self, _event: &str, _payload: &str) -> Result<(), TransportError> {
            Ok(())
        }

        fn emit_with_ack(
            &mut self,
            _event: &str,
            _payload: &str,
            _correlation: CorrelationId,
        ) -> Result<(), TransportError> {
            Ok(())
        }
    }

    #[test]
    fn mock_source_produces_quit_event() {
        let mut source = MockEventSource::from(vec![AppEvent::QuitRequested]);
        let event = source.next_event().expect("must read mock event");

        assert_eq!(event, Some(AppEvent::QuitRequested));
    }

    #[test]
    fn orchestrator_stops_on_quit_from_source() {
        let mut source = MockEventSource::from(vec![AppEvent::QuitRequested]);
        let mut orchestrator = ChatShellOrchestrator::new(
            NullSocket,
            ChatConfig::default(),
            Duration::seconds(10),
        );

        if let Some(event) = source.next_event().expect("must read mock event") {
            orchestrator
                .handle_event(event)
                .expect("must handle quit event");
        }

        assert!(!orchestrator.state().is_running());
    }
}
