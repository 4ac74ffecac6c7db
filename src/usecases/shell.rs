//! Event-loop orchestration: the single place every app event lands.
//!
//! Broadcast responses in particular are handled in exactly one match
//! arm, so no amount of reconnects or submissions can register a second
//! consumer for the same server event.

use anyhow::Result;
use chrono::{Duration, Utc};

use crate::{
    domain::{
        events::{AppEvent, ConnectivityStatus, KeyInput, ServerEvent},
        shell_state::ShellState,
    },
    infra::config::ChatConfig,
    protocol::{
        request::ComposeForm,
        response::{ChatMessageResponse, ChatRecord},
    },
    transport::{contracts::ClientSocket, session::TransportSession},
    usecases::{
        load_history::{history_entry, load_history},
        reconcile_response::reconcile,
        submit_message::{MessageSubmitter, SubmitOutcome},
    },
};

use super::contracts::ShellOrchestrator;

pub struct ChatShellOrchestrator<S: ClientSocket> {
    state: ShellState,
    session: TransportSession<S>,
    submitter: MessageSubmitter,
    chat: ChatConfig,
    history_requested: bool,
}

impl<S: ClientSocket> ChatShellOrchestrator<S> {
    pub fn new(socket: S, chat: ChatConfig, ack_timeout: Duration) -> Self {
        Self {
            state: ShellState::default(),
            session: TransportSession::new(socket),
            submitter: MessageSubmitter::new(ack_timeout),
            chat,
            history_requested: false,
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Result<()> {
        match key.key.as_str() {
            "enter" => self.submit_current_input()?,
            "backspace" => self.state.compose_mut().delete_char_before(),
            "left" => self.state.compose_mut().move_cursor_left(),
            "right" => self.state.compose_mut().move_cursor_right(),
            "home" => self.state.compose_mut().move_cursor_home(),
            "end" => self.state.compose_mut().move_cursor_end(),
            other => {
                if !key.ctrl {
                    if let Some(ch) = single_char(other) {
                        self.state.compose_mut().insert_char(ch);
                    }
                }
            }
        }

        Ok(())
    }

    fn submit_current_input(&mut self) -> Result<()> {
        if !self.state.compose().is_submit_enabled() {
            return Ok(());
        }
        if self.state.compose().text().trim().is_empty() {
            return Ok(());
        }

        let form = ComposeForm {
            to_username: self.chat.to_username.clone(),
            from_username: self.chat.from_username.clone(),
            text: self.state.compose().text().to_owned(),
            attachments: vec![],
        };

        match self.submitter.submit(&mut self.session, &form, Utc::now())? {
            SubmitOutcome::Submitted(_) => {
                // Input stays visible until the ack clears it; only the
                // submit control locks while the delivery is pending.
                self.state.compose_mut().disable_submit();
            }
            SubmitOutcome::Rejected(_) => {}
        }

        Ok(())
    }

    fn handle_server_event(&mut self, event: ServerEvent) -> Result<()> {
        match event {
            ServerEvent::Connected { session_id } => {
                self.session.handle_connected(session_id);
                self.state
                    .set_connectivity_status(ConnectivityStatus::Connected);

                if !self.history_requested {
                    load_history(&mut self.session, &self.chat.from_username)?;
                    self.history_requested = true;
                }
            }
            ServerEvent::Disconnected => {
                self.session.handle_disconnected();
                self.state
                    .set_connectivity_status(ConnectivityStatus::Disconnected);
            }
            ServerEvent::AckReceived { correlation } => {
                if self.submitter.acknowledge(correlation) {
                    let compose = self.state.compose_mut();
                    compose.clear();
                    compose.enable_submit();
                    compose.focus();
                } else {
                    tracing::warn!(correlation = %correlation, "ack for unknown submission");
                }
            }
            ServerEvent::Broadcast(response) => self.handle_broadcast(response),
            ServerEvent::HistoryReceived(records) => self.handle_history(records),
        }

        Ok(())
    }

    fn handle_broadcast(&mut self, response: ChatMessageResponse) {
        let local_sid = self.session.current_session_id().to_owned();
        if let Some(entry) = reconcile(&response, &local_sid, Utc::now()) {
            self.state.feed_mut().append(entry);
        }
    }

    fn handle_history(&mut self, mut records: Vec<ChatRecord>) {
        records.sort_by_key(|record| record.created);

        let now = Utc::now();
        for record in &records {
            let entry = history_entry(record, &self.chat.from_username, now);
            self.state.feed_mut().append(entry);
        }

        tracing::info!(count = records.len(), "chat history loaded");
    }

    fn resolve_overdue(&mut self) {
        for correlation in self.submitter.expire_overdue(Utc::now()) {
            tracing::warn!(correlation = %correlation, "delivery unconfirmed before deadline");
            let compose = self.state.compose_mut();
            compose.enable_submit();
            compose.focus();
        }
    }
}

impl<S: ClientSocket> ShellOrchestrator for ChatShellOrchestrator<S> {
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => self.resolve_overdue(),
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::InputKey(key) => self.handle_key(key)?,
            AppEvent::Server(server_event) => self.handle_server_event(server_event)?,
        }

        Ok(())
    }
}

fn single_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    let first = chars.next()?;
    chars.next().is_none().then_some(first)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use chrono::TimeZone;

    use crate::{
        domain::message::{AuthorSide, DeliveryStatus},
        protocol::CorrelationId,
        transport::contracts::TransportError,
    };

    use super::*;

    type Emissions = Rc<RefCell<Vec<(String, String, Option<CorrelationId>)>>>;

    #[derive(Clone, Default)]
    struct SharedSocket {
        emitted: Emissions,
    }

    impl ClientSocket for SharedSocket {
        fn emit(&mut self, event: &str, payload: &str) -> Result<(), TransportError> {
            self.emitted
                .borrow_mut()
                .push((event.to_owned(), payload.to_owned(), None));
            Ok(())
        }

        fn emit_with_ack(
            &mut self,
            event: &str,
            payload: &str,
            correlation: CorrelationId,
        ) -> Result<(), TransportError> {
            self.emitted
                .borrow_mut()
                .push((event.to_owned(), payload.to_owned(), Some(correlation)));
            Ok(())
        }
    }

    fn chat_config() -> ChatConfig {
        ChatConfig {
            from_username: "edet".to_owned(),
            to_username: "bob".to_owned(),
        }
    }

    fn orchestrator(
        ack_timeout: Duration,
    ) -> (ChatShellOrchestrator<SharedSocket>, Emissions) {
        let socket = SharedSocket::default();
        let emitted = socket.emitted.clone();
        (
            ChatShellOrchestrator::new(socket, chat_config(), ack_timeout),
            emitted,
        )
    }

    fn type_text(orchestrator: &mut ChatShellOrchestrator<SharedSocket>, text: &str) {
        for ch in text.chars() {
            orchestrator
                .handle_event(AppEvent::InputKey(KeyInput::new(ch.to_string(), false)))
                .expect("key must be handled");
        }
    }

    fn connect(orchestrator: &mut ChatShellOrchestrator<SharedSocket>, sid: &str) {
        orchestrator
            .handle_event(AppEvent::Server(ServerEvent::Connected {
                session_id: sid.to_owned(),
            }))
            .expect("connect must be handled");
    }

    #[test]
    fn stops_on_quit_event() {
        let (mut orchestrator, _) = orchestrator(Duration::seconds(10));

        orchestrator
            .handle_event(AppEvent::QuitRequested)
            .expect("event must be handled");

        assert!(!orchestrator.state().is_running());
    }

    #[test]
    fn connect_requests_history_exactly_once() {
        let (mut orchestrator, emitted) = orchestrator(Duration::seconds(10));

        connect(&mut orchestrator, "sid-1");
        orchestrator
            .handle_event(AppEvent::Server(ServerEvent::Disconnected))
            .expect("disconnect must be handled");
        connect(&mut orchestrator, "sid-2");

        let history_requests = emitted
            .borrow()
            .iter()
            .filter(|(event, _, _)| event == "fetch_chat_request")
            .count();
        assert_eq!(history_requests, 1);
        assert_eq!(
            orchestrator.state().connectivity_status(),
            ConnectivityStatus::Connected
        );
    }

    #[test]
    fn enter_submits_the_composed_text_and_locks_the_control() {
        let (mut orchestrator, emitted) = orchestrator(Duration::seconds(10));
        connect(&mut orchestrator, "sid-1");
        type_text(&mut orchestrator, "hi");

        orchestrator
            .handle_event(AppEvent::InputKey(KeyInput::new("enter", false)))
            .expect("enter must be handled");

        let emitted = emitted.borrow();
        let request = emitted
            .iter()
            .find(|(event, _, _)| event == "save_chat_request")
            .expect("request must be emitted");
        assert!(request.1.contains("\"text\":\"hi\""));
        assert!(request.1.contains("\"from_username\":\"edet\""));
        assert!(request.2.is_some());
        assert!(!orchestrator.state().compose().is_submit_enabled());
        // Text is not cleared until the server acknowledges receipt.
        assert_eq!(orchestrator.state().compose().text(), "hi");
    }

    #[test]
    fn enter_with_empty_input_emits_nothing() {
        let (mut orchestrator, emitted) = orchestrator(Duration::seconds(10));
        connect(&mut orchestrator, "sid-1");

        orchestrator
            .handle_event(AppEvent::InputKey(KeyInput::new("enter", false)))
            .expect("enter must be handled");

        assert!(emitted
            .borrow()
            .iter()
            .all(|(event, _, _)| event != "save_chat_request"));
        assert!(orchestrator.state().compose().is_submit_enabled());
    }

    #[test]
    fn enter_while_locked_emits_nothing() {
        let (mut orchestrator, emitted) = orchestrator(Duration::seconds(10));
        connect(&mut orchestrator, "sid-1");
        type_text(&mut orchestrator, "hi");

        orchestrator
            .handle_event(AppEvent::InputKey(KeyInput::new("enter", false)))
            .expect("first enter must be handled");
        orchestrator
            .handle_event(AppEvent::InputKey(KeyInput::new("enter", false)))
            .expect("second enter must be handled");

        let submissions = emitted
            .borrow()
            .iter()
            .filter(|(event, _, _)| event == "save_chat_request")
            .count();
        assert_eq!(submissions, 1);
    }

    #[test]
    fn ack_clears_the_input_and_unlocks_the_control() {
        let (mut orchestrator, emitted) = orchestrator(Duration::seconds(10));
        connect(&mut orchestrator, "sid-1");
        type_text(&mut orchestrator, "hi");
        orchestrator
            .handle_event(AppEvent::InputKey(KeyInput::new("enter", false)))
            .expect("enter must be handled");

        let correlation = emitted
            .borrow()
            .iter()
            .find_map(|(_, _, correlation)| *correlation)
            .expect("submission must carry a correlation id");

        orchestrator
            .handle_event(AppEvent::Server(ServerEvent::AckReceived { correlation }))
            .expect("ack must be handled");

        assert!(orchestrator.state().compose().is_empty());
        assert!(orchestrator.state().compose().is_submit_enabled());
        assert!(orchestrator.state().compose().is_focused());
        // The ack confirms receipt only; nothing is rendered yet.
        assert!(orchestrator.state().feed().entries().is_empty());
    }

    #[test]
    fn overdue_delivery_unlocks_the_control_on_tick() {
        let (mut orchestrator, _) = orchestrator(Duration::milliseconds(0));
        connect(&mut orchestrator, "sid-1");
        type_text(&mut orchestrator, "hi");
        orchestrator
            .handle_event(AppEvent::InputKey(KeyInput::new("enter", false)))
            .expect("enter must be handled");
        assert!(!orchestrator.state().compose().is_submit_enabled());

        orchestrator
            .handle_event(AppEvent::Tick)
            .expect("tick must be handled");

        assert!(orchestrator.state().compose().is_submit_enabled());
    }

    #[test]
    fn own_broadcast_lands_as_an_outgoing_entry() {
        let (mut orchestrator, _) = orchestrator(Duration::seconds(10));
        connect(&mut orchestrator, "sid-1");

        let response = ChatMessageResponse {
            success: true,
            message: Some("Chat saved successfully".to_owned()),
            error_message: None,
            data: Some(ChatRecord {
                from_username: "edet".to_owned(),
                text: "hi".to_owned(),
                created: Utc::now(),
                updated: None,
            }),
            server_sid: "sid-1".to_owned(),
        };

        orchestrator
            .handle_event(AppEvent::Server(ServerEvent::Broadcast(response)))
            .expect("broadcast must be handled");

        let entries = orchestrator.state().feed().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].side, AuthorSide::Outgoing);
        assert_eq!(entries[0].text, "hi");
    }

    #[test]
    fn one_broadcast_renders_one_entry_after_repeated_submissions() {
        let (mut orchestrator, emitted) = orchestrator(Duration::seconds(10));
        connect(&mut orchestrator, "sid-1");

        for text in ["hi", "there"] {
            type_text(&mut orchestrator, text);
            orchestrator
                .handle_event(AppEvent::InputKey(KeyInput::new("enter", false)))
                .expect("enter must be handled");
            let correlation = emitted
                .borrow()
                .iter()
                .rev()
                .find_map(|(_, _, correlation)| *correlation)
                .expect("submission must carry a correlation id");
            orchestrator
                .handle_event(AppEvent::Server(ServerEvent::AckReceived { correlation }))
                .expect("ack must be handled");
        }

        let response = ChatMessageResponse {
            success: true,
            message: Some("Chat saved successfully".to_owned()),
            error_message: None,
            data: Some(ChatRecord {
                from_username: "edet".to_owned(),
                text: "hi".to_owned(),
                created: Utc::now(),
                updated: None,
            }),
            server_sid: "sid-1".to_owned(),
        };

        orchestrator
            .handle_event(AppEvent::Server(ServerEvent::Broadcast(response)))
            .expect("broadcast must be handled");

        assert_eq!(orchestrator.state().feed().entries().len(), 1);
    }

    #[test]
    fn failed_broadcast_lands_as_a_failed_entry() {
        let (mut orchestrator, _) = orchestrator(Duration::seconds(10));
        connect(&mut orchestrator, "sid-1");

        let response = ChatMessageResponse {
            success: false,
            message: None,
            error_message: Some("rate limited".to_owned()),
            data: None,
            server_sid: "sid-1".to_owned(),
        };

        orchestrator
            .handle_event(AppEvent::Server(ServerEvent::Broadcast(response)))
            .expect("broadcast must be handled");

        let entries = orchestrator.state().feed().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, DeliveryStatus::Failed);
    }

    #[test]
    fn history_is_rendered_oldest_first() {
        let (mut orchestrator, _) = orchestrator(Duration::seconds(10));
        connect(&mut orchestrator, "sid-1");

        let older = Utc.with_ymd_and_hms(2026, 8, 22, 9, 0, 0).single().unwrap();
        let newer = Utc.with_ymd_and_hms(2026, 8, 22, 9, 5, 0).single().unwrap();
        let records = vec![
            ChatRecord {
                from_username: "edet".to_owned(),
                text: "second".to_owned(),
                created: newer,
                updated: None,
            },
            ChatRecord {
                from_username: "bob".to_owned(),
                text: "first".to_owned(),
                created: older,
                updated: None,
            },
        ];

        orchestrator
            .handle_event(AppEvent::Server(ServerEvent::HistoryReceived(records)))
            .expect("history must be handled");

        let entries = orchestrator.state().feed().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "first");
        assert_eq!(entries[0].side, AuthorSide::Incoming);
        assert_eq!(entries[1].text, "second");
        assert_eq!(entries[1].side, AuthorSide::Outgoing);
    }

    #[test]
    fn editing_keys_move_the_cursor_and_delete() {
        let (mut orchestrator, _) = orchestrator(Duration::seconds(10));
        type_text(&mut orchestrator, "hey");

        orchestrator
            .handle_event(AppEvent::InputKey(KeyInput::new("backspace", false)))
            .expect("backspace must be handled");
        assert_eq!(orchestrator.state().compose().text(), "he");

        orchestrator
            .handle_event(AppEvent::InputKey(KeyInput::new("home", false)))
            .expect("home must be handled");
        assert_eq!(orchestrator.state().compose().cursor_position(), 0);

        orchestrator
            .handle_event(AppEvent::InputKey(KeyInput::new("end", false)))
            .expect("end must be handled");
        assert_eq!(orchestrator.state().compose().cursor_position(), 2);
    }
}
