use ratatui::prelude::*;

use crate::commands::{handlers, AppCommand};
use crate::preferences::ViewMode;
use crate::state::{AppState, InputMode, LoadingState};
use crate::ui::{
    components::{deal_grid, deal_table, detail_popup, empty_state, filter_sidebar, header, help_bar},
    layouts,
    theme::{Palette, SIDEBAR_WIDTH},
};

pub fn render(f: &mut Frame, state: &AppState, palette: &Palette) {
    let (header_area, sidebar_area, main_area, help_area) =
        layouts::screen_layout_with_sidebar(f.area(), SIDEBAR_WIDTH);

    header::render_header(f, header_area, state, palette);
    filter_sidebar::render_filter_sidebar(f, sidebar_area, state, palette);
    render_content(f, main_area, state, palette);
    help_bar::render_help_bar(f, help_area, palette, help_text(state));

    if let Some(detail) = &state.deals.detail {
        let favorite = state.favorites.contains(&detail.deal.game_id);
        detail_popup::render_detail_popup(f, detail, favorite, palette);
    }
}

fn render_content(f: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let machine = &state.deals.machine;

    if let Some(message) = machine.error() {
        empty_state::render_error_state(f, area, palette, "Deals", message, Some("Press r or Enter to retry"));
        return;
    }

    if state.visible_deals().is_empty() {
        if matches!(machine.loading, LoadingState::Loading(..) | LoadingState::NotStarted) {
            empty_state::render_loading_state(f, area, palette, "Deals", "Loading deals...");
            return;
        }
        let (message, hint) = match handlers::empty_state_action(state) {
            Some(AppCommand::ToggleShowOnlyFavorites) => (
                "No favorites yet",
                "Press Enter to show all deals",
            ),
            _ => (
                "No deals match your filters",
                "Press Enter to clear filters",
            ),
        };
        empty_state::render_empty_state(f, area, palette, "Deals", message, Some(hint));
        return;
    }

    match state.view.view_mode {
        ViewMode::Table => deal_table::render_deal_table(f, area, state, palette),
        ViewMode::Grid => deal_grid::render_deal_grid(f, area, state, palette),
    }
}

fn help_text(state: &AppState) -> &'static str {
    match (&state.deals.input_mode, state.view.view_mode) {
        (InputMode::Filter, _) => "Tab: next field | ←/→: change | Enter: apply | Ctrl+r: clear | Esc: close",
        (InputMode::Detail, _) => "o: open deal | f: favorite | Esc: close",
        (InputMode::Normal, ViewMode::Table) => {
            "j/k: move | Enter: details | f: favorite | /: filters | 1-5: sort | [ ]: page | v: grid | ?: help"
        }
        (InputMode::Normal, ViewMode::Grid) => {
            "hjkl: move | Enter: details | f: favorite | /: filters | T: top | v: table | ?: help"
        }
    }
}
