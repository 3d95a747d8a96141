use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
    Frame,
};

use super::popup::{self, PopupChrome};
use crate::preferences::ViewMode;
use crate::state::AppState;
use crate::ui::{layouts, screens::Screen, theme::Palette};

pub fn render_help_popup(f: &mut Frame, state: &AppState, palette: &Palette) {
    let inner = popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::LARGE,
        PopupChrome {
            title: " Help ",
            footer: Some(" ? or Esc to close "),
            border_style: palette.accent_border_style(),
        },
    );

    let items: Vec<ListItem> = help_items(state)
        .into_iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), palette.header_style()),
                Span::raw(description),
            ]))
        })
        .collect();

    let list = List::new(items).style(palette.text_style());

    f.render_widget(list, inner);
}

fn help_items(state: &AppState) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    match state.current_screen() {
        Screen::Deals => {
            items.push(("↑/k ↓/j", "Move selection"));
            if state.view.view_mode == ViewMode::Grid {
                items.push(("←/h →/l", "Move across columns"));
                items.push(("T", "Back to top"));
            } else {
                items.push(("1-5", "Sort by title, price, normal, savings, rating"));
                items.push(("[ / ]", "Previous / next page"));
            }
            items.push(("Enter", "Open deal details"));
            items.push(("f/Space", "Toggle favorite"));
            items.push(("o", "Open deal in browser"));
            items.push(("*", "Show only favorites"));
            items.push(("v", "Switch table / grid"));
            items.push(("t", "Switch light / dark theme"));
            items.push(("r", "Refresh (retry after an error)"));
            items.push(("", ""));
            items.push(("--- Filters ---", ""));
            items.push(("/", "Edit filters"));
            items.push(("Tab/↓ BackTab/↑", "Next / previous field"));
            items.push(("←/→", "Change value"));
            items.push(("Type", "Edit title search"));
            items.push(("Enter", "Apply filters"));
            items.push(("Ctrl+r", "Clear filters"));
            items.push(("Esc", "Leave filters"));
            items.push(("c", "Clear filters"));
        }
        Screen::Logs(..) => {
            items.push(("↑/k", "Scroll up (older logs)"));
            items.push(("↓/j", "Scroll down (newer logs)"));
            items.push(("Page Up", "Scroll up one page"));
            items.push(("Page Down", "Scroll down one page"));
            items.push(("g then g", "Scroll to oldest logs"));
            items.push(("G", "Scroll to newest logs"));
            items.push(("h/←/Esc", "Back to deals"));
        }
    }

    items.push(("", ""));
    items.push(("--- Global ---", ""));
    items.push(("g then l", "Go to logs"));
    items.push(("g then g", "Navigate to top of list"));
    items.push(("G", "Navigate to bottom of list"));
    items.push(("?", "Toggle this help"));
    items.push(("q", "Quit application"));

    items
}
