//! Shared help bar component for consistent bottom navigation hints.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::Palette;

/// Render a standard help bar with the given text.
pub fn render_help_bar(f: &mut Frame, area: Rect, palette: &Palette, text: &str) {
    let help = Paragraph::new(text)
        .style(palette.help_text_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, area);
}
