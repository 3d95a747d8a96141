//! Shared popup/modal base component.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Padding},
    Frame,
};

use crate::ui::layouts;

/// Title and key hints drawn on a popup's border.
pub struct PopupChrome<'a> {
    pub title: &'a str,
    /// Shown centered on the bottom border.
    pub footer: Option<&'a str>,
    pub border_style: Style,
}

/// Clear a centered area, draw the bordered frame and return the inner
/// area for content.
///
/// `size` is (width_percent, height_percent) of `parent_area`.
pub fn render_popup_frame(
    f: &mut Frame,
    parent_area: Rect,
    size: (u16, u16),
    chrome: PopupChrome<'_>,
) -> Rect {
    let area = layouts::centered_popup(size.0, size.1, parent_area);
    f.render_widget(Clear, area);

    let mut block = Block::default()
        .title(Line::from(chrome.title).alignment(Alignment::Center))
        .borders(Borders::ALL)
        .border_style(chrome.border_style)
        .padding(Padding::horizontal(1));
    if let Some(footer) = chrome.footer {
        block = block.title_bottom(Line::from(footer).alignment(Alignment::Center));
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    inner
}
