//! Compose field rendering.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::compose_state::ComposeState;

use super::styles;

/// Placeholder text shown while the input is empty.
const PLACEHOLDER_TEXT: &str = "Type a message...";

/// Prompt symbol shown before the input text.
const PROMPT_SYMBOL: &str = "> ";

/// Renders the compose field. The border and title reflect whether the
/// submit control is currently locked by a pending delivery.
pub fn render_compose_input(frame: &mut Frame<'_>, area: Rect, compose: &ComposeState) {
    let (title, border_style) = if compose.is_submit_enabled() {
        ("Message", styles::input_ready_border_style())
    } else {
        ("Message (sending...)", styles::input_locked_border_style())
    };

    let paragraph = Paragraph::new(build_input_line(compose)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(paragraph, area);

    if compose.is_focused() {
        let cursor_x = area
            .x
            .saturating_add(1)
            .saturating_add(PROMPT_SYMBOL.width() as u16)
            .saturating_add(cursor_display_offset(compose).min(u16::MAX as usize) as u16);
        let cursor_y = area.y.saturating_add(1);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn build_input_line(compose: &ComposeState) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style());

    if compose.is_empty() {
        Line::from(vec![
            prompt,
            Span::styled(PLACEHOLDER_TEXT.to_owned(), styles::input_placeholder_style()),
        ])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(compose.text().to_owned(), styles::input_text_style()),
        ])
    }
}

/// Display-cell offset of the cursor within the typed text. Wide
/// characters occupy two cells, so the char index alone is not enough.
fn cursor_display_offset(compose: &ComposeState) -> usize {
    let prefix: String = compose
        .text()
        .chars()
        .take(compose.cursor_position())
        .collect();
    prefix.width()
}
