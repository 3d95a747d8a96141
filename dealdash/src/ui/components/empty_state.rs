//! Shared empty state component for consistent "no data" messages.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::theme::Palette;

/// Render an empty state message with consistent styling.
///
/// Used when a list has no data to display.
///
/// # Arguments
/// * `title` - The block title (e.g., "Deals", "Session Logs")
/// * `message` - The message to display (e.g., "No deals match your filters")
/// * `hint` - Optional hint text below the message, usually the action key
pub fn render_empty_state(
    f: &mut Frame,
    area: Rect,
    palette: &Palette,
    title: &str,
    message: &str,
    hint: Option<&str>,
) {
    render_message(f, area, palette, title, message, palette.loading_style(), hint);
}

/// Render an error message in place of a list.
pub fn render_error_state(
    f: &mut Frame,
    area: Rect,
    palette: &Palette,
    title: &str,
    message: &str,
    hint: Option<&str>,
) {
    render_message(f, area, palette, title, message, palette.error_style(), hint);
}

/// Render a loading state message with consistent styling.
pub fn render_loading_state(f: &mut Frame, area: Rect, palette: &Palette, title: &str, message: &str) {
    render_message(f, area, palette, title, message, palette.loading_style(), None);
}

fn render_message(
    f: &mut Frame,
    area: Rect,
    palette: &Palette,
    title: &str,
    message: &str,
    message_style: Style,
    hint: Option<&str>,
) {
    let mut lines = vec![Line::from(""), Line::from(Span::styled(message, message_style))];

    if let Some(hint_text) = hint {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            hint_text,
            palette.help_text_style(),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(paragraph, area);
}
