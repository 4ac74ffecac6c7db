//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

/// Style for the author of a message sent from this client.
pub fn outgoing_author_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

/// Style for the author of a message received from the peer.
pub fn incoming_author_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Style for message text content.
pub fn message_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for entries whose save the server reported as failed.
pub fn failed_text_style() -> Style {
    Style::default().fg(Color::Red)
}

/// Style for the relative-age suffix.
pub fn age_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for the input prompt symbol.
pub fn input_prompt_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Style for typed input text.
pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for the placeholder shown in an empty input.
pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Border style while the compose control accepts a submission.
pub fn input_ready_border_style() -> Style {
    Style::default().fg(Color::White)
}

/// Border style while a delivery is pending and the control is locked.
pub fn input_locked_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
