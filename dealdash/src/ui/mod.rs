pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;
pub mod utils;

use crate::log_buffer::LogBuffer;
use crate::state::AppState;
use ratatui::Frame;
use screens::*;
use theme::Palette;

/// Pure render dispatcher - routes to appropriate screen renderer
/// Reads state only; the grid's scroll cell is the one render-time update.
pub fn render_app(f: &mut Frame, state: &AppState, log_buffer: &LogBuffer) {
    let palette = Palette::for_theme(state.view.theme);

    match state.current_screen() {
        Screen::Deals => deals_screen::render(f, state, palette),
        Screen::Logs(logs_state) => logs_screen::render(f, logs_state, log_buffer, palette),
    }

    // Render help popup on top if visible
    if state.help_visible {
        components::help_popup::render_help_popup(f, state, palette);
    }
}
