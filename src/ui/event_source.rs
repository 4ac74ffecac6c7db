use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::{
    domain::events::{AppEvent, KeyInput},
    usecases::contracts::AppEventSource,
};

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Merges the two event producers into one ordered stream: server
/// events pushed by the transport adapter, then terminal input. A poll
/// window with no input yields a tick so deadlines still advance.
pub struct CompositeEventSource {
    server_rx: Receiver<AppEvent>,
    transport_gone: bool,
}

impl CompositeEventSource {
    pub fn new(server_rx: Receiver<AppEvent>) -> Self {
        Self {
            server_rx,
            transport_gone: false,
        }
    }

    fn next_server_event(&mut self) -> Option<AppEvent> {
        match self.server_rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if !self.transport_gone {
                    self.transport_gone = true;
                    tracing::warn!("transport event channel closed");
                }
                None
            }
        }
    }
}

impl AppEventSource for CompositeEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        if let Some(event) = self.next_server_event() {
            return Ok(Some(event));
        }

        if !event::poll(EVENT_POLL_TIMEOUT)? {
            return Ok(Some(AppEvent::Tick));
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }

            return Ok(map_key(key.code, key.modifiers));
        }

        Ok(None)
    }
}

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<AppEvent> {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    // Esc and ctrl-c quit; plain letters belong to the compose field.
    if code == KeyCode::Esc || (code == KeyCode::Char('c') && ctrl) {
        return Some(AppEvent::QuitRequested);
    }

    let key = match code {
        KeyCode::Enter => "enter".to_owned(),
        KeyCode::Backspace => "backspace".to_owned(),
        KeyCode::Left => "left".to_owned(),
        KeyCode::Right => "right".to_owned(),
        KeyCode::Home => "home".to_owned(),
        KeyCode::End => "end".to_owned(),
        KeyCode::Char(ch) => ch.to_string(),
        _ => return None,
    };

    Some(AppEvent::InputKey(KeyInput::new(key, ctrl)))
}

#[cfg(test)]
pub struct MockEventSource {
    queue: std::collections::VecDeque<AppEvent>,
}

#[cfg(test)]
impl MockEventSource {
    pub fn from(events: Vec<AppEvent>) -> Self {
        Self {
            queue: events.into(),
        }
    }
}

#[cfg(test)]
impl AppEventSource for MockEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.queue.pop_front())
    }
}
