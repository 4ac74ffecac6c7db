//! UI layer: terminal rendering and input handling.

mod compose_input;
mod event_source;
pub mod shell;
mod styles;
mod terminal;
mod view;

pub(crate) use event_source::CompositeEventSource;
