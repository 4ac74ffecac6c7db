use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::{message::RenderedEntry, shell_state::ShellState};

use super::compose_input::render_compose_input;
use super::styles;

pub fn render(frame: &mut Frame<'_>, state: &ShellState) {
    let [feed_area, input_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    render_feed_panel(frame, feed_area, state);
    render_compose_input(frame, input_area, state.compose());

    let status = Paragraph::new(status_line(state));
    frame.render_widget(status, status_area);
}

fn render_feed_panel(frame: &mut Frame<'_>, area: ratatui::layout::Rect, state: &ShellState) {
    let feed = state.feed();
    let block = Block::default().title("Chat").borders(Borders::ALL);

    if feed.is_empty() {
        let panel = Paragraph::new("No messages yet").block(block);
        frame.render_widget(panel, area);
        return;
    }

    let items: Vec<ListItem<'static>> = feed
        .entries()
        .iter()
        .map(|entry| ListItem::new(entry_line(entry)))
        .collect();

    // Inner height = area height - 2 (borders).
    let viewport_height = area.height.saturating_sub(2) as usize;

    let list = List::new(items).block(block);
    let mut list_state = ListState::default();
    *list_state.offset_mut() = feed.scroll_offset(viewport_height);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn entry_line(entry: &RenderedEntry) -> Line<'static> {
    let author_style = if entry.is_outgoing() {
        styles::outgoing_author_style()
    } else {
        styles::incoming_author_style()
    };

    let text_style = if entry.is_failed() {
        styles::failed_text_style()
    } else {
        styles::message_text_style()
    };

    Line::from(vec![
        Span::styled(entry.author.clone(), author_style),
        Span::raw(": "),
        Span::styled(entry.text.clone(), text_style),
        Span::raw("  "),
        Span::styled(entry.age_label.clone(), styles::age_style()),
    ])
}

fn status_line(state: &ShellState) -> String {
    let connectivity = state.connectivity_status().as_label();
    let submit_hint = if state.compose().is_submit_enabled() {
        "Enter: send"
    } else {
        "waiting for server..."
    };
    format!("connectivity: {connectivity} | {submit_hint} | Esc: quit")
}
