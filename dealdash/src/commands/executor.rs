use crate::background::{data_loader::DataLoader, BackgroundTaskManager, TaskKey};
use crate::events::{AppCommand, SideEffect};
use crate::preferences::{Preferences, ViewMode};
use crate::state::filter::FilterForm;
use crate::state::projection::{ColumnSort, GRID_COLUMNS};
use crate::state::*;
use crate::ui::screens::Screen;
use cheapshark_api::{redirect_url, DealFilter};
use throbber_widgets_tui::ThrobberState;

const LOG_PAGE_SIZE: usize = 20;

/// Execute a command: update state, then run its side effect on the task manager
pub fn execute_command(
    command: AppCommand,
    state: &mut AppState,
    preferences: &Preferences,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    if let Some(effect) = execute_command_sync(command, state, preferences) {
        run_side_effect(effect, task_manager, data_loader);
    }
}

fn run_side_effect(
    effect: SideEffect,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    let data_loader = data_loader.clone();
    match effect {
        SideEffect::FetchDeals(ticket) => {
            task_manager.spawn_load_task(TaskKey::Deals, async move {
                data_loader.load_deals(ticket).await;
            });
        }
        SideEffect::FetchStores => {
            task_manager.spawn_load_task(TaskKey::Stores, async move {
                data_loader.load_stores().await;
            });
        }
        SideEffect::FetchGameDetail { game_id } => {
            task_manager.spawn_load_task(TaskKey::GameDetail, async move {
                data_loader.load_game_detail(game_id).await;
            });
        }
        SideEffect::OpenUrl(url) => {
            tracing::info!("Opening {}", url);
            if let Err(e) = open::that_detached(&url) {
                tracing::error!("Failed to open browser: {}", e);
            }
        }
    }
}

/// Apply a command to state and return the side effect it asks for
///
/// Preference writes happen here; network and browser work is only
/// described by the returned effect. Tests call this directly.
pub fn execute_command_sync(
    command: AppCommand,
    state: &mut AppState,
    preferences: &Preferences,
) -> Option<SideEffect> {
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    let effect = match command {
        // Simple state updates
        AppCommand::Quit => {
            state.should_quit = true;
            None
        }
        AppCommand::ToggleHelp => {
            state.help_visible = !state.help_visible;
            None
        }
        AppCommand::SetPendingKey(c) => {
            state.pending_key = Some(c);
            None
        }
        AppCommand::ClearPendingKey => {
            state.pending_key = None;
            None
        }

        // Selection
        AppCommand::SelectNext => {
            select_vertical(state, true);
            None
        }
        AppCommand::SelectPrevious => {
            select_vertical(state, false);
            None
        }
        AppCommand::SelectLeft => {
            state.deals.grid.selected = state.deals.grid.selected.saturating_sub(1);
            None
        }
        AppCommand::SelectRight => {
            let len = state.visible_deals().len();
            if state.deals.grid.selected + 1 < len {
                state.deals.grid.selected += 1;
            }
            None
        }
        AppCommand::NavigateToTop => {
            if let Some(s) = state.logs_state_mut() {
                s.scroll_offset = s.total_entries.saturating_sub(1);
            } else {
                select_edge(state, false);
            }
            None
        }
        AppCommand::NavigateToBottom => {
            if let Some(s) = state.logs_state_mut() {
                s.scroll_offset = 0;
            } else {
                select_edge(state, true);
            }
            None
        }

        // Navigation
        AppCommand::NavigateBack => {
            if state.deals.detail.is_some() {
                close_detail(state);
            } else {
                state.navigate_back();
            }
            None
        }

        // Data loading
        AppCommand::LoadStores => {
            state.stores_loading = LoadingState::Loading(ThrobberState::default());
            Some(SideEffect::FetchStores)
        }
        AppCommand::RefreshDeals => {
            let ticket = state.deals.machine.refresh();
            Some(SideEffect::FetchDeals(ticket))
        }
        AppCommand::RetryDeals => {
            if state.deals.machine.error().is_some() {
                tracing::info!("Retrying deals with cleared filters");
                Some(clear_filters(state))
            } else {
                None
            }
        }

        // Deal detail
        AppCommand::OpenDetail => match state.selected_deal().cloned() {
            Some(deal) => {
                let game_id = deal.game_id.clone();
                let store_name = state.store_name(&deal.store_id).map(str::to_string);
                tracing::debug!("Opening detail for {}", deal.title);
                state.deals.detail = Some(DetailState {
                    deal,
                    store_name,
                    loading: LoadingState::Loading(ThrobberState::default()),
                    game: None,
                });
                state.deals.input_mode = InputMode::Detail;
                Some(SideEffect::FetchGameDetail { game_id })
            }
            None => None,
        },
        AppCommand::CloseDetail => {
            close_detail(state);
            None
        }
        AppCommand::OpenDealInBrowser => {
            let deal = match &state.deals.detail {
                Some(detail) => Some(&detail.deal),
                None => state.selected_deal(),
            };
            deal.map(|d| SideEffect::OpenUrl(redirect_url(&d.deal_id)))
        }

        // Favorites
        AppCommand::ToggleFavorite => {
            let game_id = match &state.deals.detail {
                Some(detail) => Some(detail.deal.game_id.clone()),
                None => state.selected_deal().map(|d| d.game_id.clone()),
            };
            if let Some(game_id) = game_id {
                let added = state.favorites.toggle(&game_id);
                tracing::debug!(game_id, added, "Toggled favorite");
                if let Err(e) = preferences.save_favorites(&state.favorites) {
                    tracing::error!("Failed to save favorites: {}", e);
                }
                state.clamp_selection();
            }
            None
        }
        AppCommand::ToggleShowOnlyFavorites => {
            state.show_only_favorites = !state.show_only_favorites;
            state.deals.reset_selection();
            None
        }

        // Filter sidebar
        AppCommand::EnterFilterMode => {
            state.deals.input_mode = InputMode::Filter;
            None
        }
        AppCommand::ExitFilterMode => {
            state.deals.input_mode = InputMode::Normal;
            None
        }
        AppCommand::FocusFilterField { forward } => {
            if forward {
                state.deals.form.focus_next();
            } else {
                state.deals.form.focus_prev();
            }
            None
        }
        AppCommand::AdjustFilterField { forward } => {
            let stores = state.active_stores();
            state.deals.form.adjust(forward, &stores);
            None
        }
        AppCommand::AppendTitleChar(c) => {
            state.deals.form.push_title_char(c);
            None
        }
        AppCommand::DeleteTitleChar => {
            state.deals.form.pop_title_char();
            None
        }
        AppCommand::ApplyFilters => {
            let ticket = state.deals.machine.commit(state.deals.form.to_filter());
            state.deals.input_mode = InputMode::Normal;
            state.deals.reset_selection();
            Some(SideEffect::FetchDeals(ticket))
        }
        AppCommand::ClearFilters => Some(clear_filters(state)),

        // Table view
        AppCommand::SortByColumn(column) => {
            let sort = ColumnSort::toggle(state.deals.table.sort, column);
            tracing::debug!(?sort, "Sorting table");
            state.deals.table.sort = Some(sort);
            state.deals.table.reset();
            None
        }
        AppCommand::PreviousPage => {
            let table = &mut state.deals.table;
            if table.page > 0 {
                table.page -= 1;
                table.table_state.borrow_mut().select(Some(0));
            }
            None
        }
        AppCommand::NextPage => {
            let pages = state.table_page_count();
            let table = &mut state.deals.table;
            if table.page + 1 < pages {
                table.page += 1;
                table.table_state.borrow_mut().select(Some(0));
            }
            None
        }

        // Grid view
        AppCommand::BackToTop => {
            state.deals.grid.reset();
            None
        }

        // View toggles
        AppCommand::ToggleViewMode => {
            state.view.view_mode = state.view.view_mode.toggle();
            state.deals.reset_selection();
            if let Err(e) = preferences.save_view_mode(state.view.view_mode) {
                tracing::error!("Failed to save view mode: {}", e);
            }
            None
        }
        AppCommand::ToggleTheme => {
            state.view.theme = state.view.theme.toggle();
            if let Err(e) = preferences.save_theme(state.view.theme) {
                tracing::error!("Failed to save theme: {}", e);
            }
            None
        }

        // Log screen (no logging here to avoid feedback loop)
        AppCommand::NavigateToLogs => {
            state.navigate_to(Screen::Logs(LogsState::default()));
            None
        }
        AppCommand::ScrollLogsUp => {
            if let Some(s) = state.logs_state_mut() {
                // Up goes back in time
                if s.scroll_offset < s.total_entries.saturating_sub(1) {
                    s.scroll_offset += 1;
                }
            }
            None
        }
        AppCommand::ScrollLogsDown => {
            if let Some(s) = state.logs_state_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(1);
            }
            None
        }
        AppCommand::ScrollLogsPageUp => {
            if let Some(s) = state.logs_state_mut() {
                s.scroll_offset =
                    (s.scroll_offset + LOG_PAGE_SIZE).min(s.total_entries.saturating_sub(1));
            }
            None
        }
        AppCommand::ScrollLogsPageDown => {
            if let Some(s) = state.logs_state_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(LOG_PAGE_SIZE);
            }
            None
        }
        AppCommand::ScrollLogsToTop => {
            if let Some(s) = state.logs_state_mut() {
                s.scroll_offset = s.total_entries.saturating_sub(1);
            }
            None
        }
        AppCommand::ScrollLogsToBottom => {
            if let Some(s) = state.logs_state_mut() {
                s.scroll_offset = 0;
            }
            None
        }
    };

    // Clear pending key after any command except SetPendingKey
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }

    effect
}

fn close_detail(state: &mut AppState) {
    state.deals.detail = None;
    state.deals.input_mode = InputMode::Normal;
}

/// Reset the form and commit the empty filter.
fn clear_filters(state: &mut AppState) -> SideEffect {
    state.deals.form = FilterForm::default();
    state.deals.input_mode = InputMode::Normal;
    state.deals.reset_selection();
    SideEffect::FetchDeals(state.deals.machine.commit(DealFilter::new()))
}

/// Jump to the first or last deal of the current view.
fn select_edge(state: &mut AppState, last: bool) {
    match state.view.view_mode {
        ViewMode::Table => {
            let rows = state.table_page().len();
            let row = if last { rows.saturating_sub(1) } else { 0 };
            state.deals.table.table_state.borrow_mut().select(Some(row));
        }
        ViewMode::Grid => {
            let len = state.visible_deals().len();
            state.deals.grid.selected = if last { len.saturating_sub(1) } else { 0 };
        }
    }
}

fn select_vertical(state: &mut AppState, down: bool) {
    match state.view.view_mode {
        ViewMode::Table => {
            let rows = state.table_page().len();
            if rows == 0 {
                return;
            }
            let mut table_state = state.deals.table.table_state.borrow_mut();
            let current = table_state.selected().unwrap_or(0);
            let next = if down {
                (current + 1) % rows
            } else if current == 0 {
                rows - 1
            } else {
                current - 1
            };
            table_state.select(Some(next));
        }
        ViewMode::Grid => {
            let len = state.visible_deals().len();
            let grid = &mut state.deals.grid;
            if down {
                if grid.selected + GRID_COLUMNS < len {
                    grid.selected += GRID_COLUMNS;
                }
            } else {
                grid.selected = grid.selected.saturating_sub(GRID_COLUMNS);
            }
        }
    }
}
