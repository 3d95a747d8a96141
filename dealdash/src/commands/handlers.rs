use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::preferences::ViewMode;
use crate::state::projection::SortColumn;
use crate::state::*;
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    // Priority 1: Help popup captures everything
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Priority 2: Logs screen
    if let Screen::Logs(_) = state.current_screen() {
        return handle_logs_keys(key, state);
    }

    // Priority 3: Detail popup
    if state.deals.input_mode == InputMode::Detail {
        return match key {
            Key::Esc | Key::Enter => Some(AppCommand::CloseDetail),
            Key::Char('f') => Some(AppCommand::ToggleFavorite),
            Key::Char('o') => Some(AppCommand::OpenDealInBrowser),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Priority 4: Filter sidebar
    if state.deals.input_mode == InputMode::Filter {
        return handle_filter_keys(event);
    }

    // Handle multi-key sequences
    if let Some(pending) = state.pending_key {
        return match (pending, key) {
            // 'g' followed by 'g' -> first deal
            ('g', Key::Char('g')) => Some(AppCommand::NavigateToTop),
            // 'g' followed by 'l' -> go to logs
            ('g', Key::Char('l')) => Some(AppCommand::NavigateToLogs),
            // Any other key clears the pending key
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    handle_deals_keys(key, state)
}

fn handle_logs_keys(key: Key, state: &AppState) -> Option<AppCommand> {
    if state.pending_key == Some('g') {
        return match key {
            Key::Char('g') => Some(AppCommand::ScrollLogsToTop),
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    match key {
        Key::Up | Key::Char('k') => Some(AppCommand::ScrollLogsUp),
        Key::Down | Key::Char('j') => Some(AppCommand::ScrollLogsDown),
        Key::PageUp => Some(AppCommand::ScrollLogsPageUp),
        Key::PageDown => Some(AppCommand::ScrollLogsPageDown),
        Key::Char('g') => Some(AppCommand::SetPendingKey('g')),
        Key::Char('G') => Some(AppCommand::ScrollLogsToBottom),
        Key::Left | Key::Char('h') | Key::Esc => Some(AppCommand::NavigateBack),
        Key::Char('?') => Some(AppCommand::ToggleHelp),
        Key::Char('q') => Some(AppCommand::Quit),
        _ => None,
    }
}

fn handle_filter_keys(event: KeyEvent) -> Option<AppCommand> {
    match event.key {
        Key::Char('r') if event.ctrl => Some(AppCommand::ClearFilters),
        Key::Tab | Key::Down => Some(AppCommand::FocusFilterField { forward: true }),
        Key::BackTab | Key::Up => Some(AppCommand::FocusFilterField { forward: false }),
        Key::Right => Some(AppCommand::AdjustFilterField { forward: true }),
        Key::Left => Some(AppCommand::AdjustFilterField { forward: false }),
        Key::Enter => Some(AppCommand::ApplyFilters),
        Key::Esc => Some(AppCommand::ExitFilterMode),
        Key::Backspace => Some(AppCommand::DeleteTitleChar),
        Key::Char(c) if !event.ctrl => Some(AppCommand::AppendTitleChar(c)),
        _ => None,
    }
}

fn handle_deals_keys(key: Key, state: &AppState) -> Option<AppCommand> {
    let grid = state.view.view_mode == ViewMode::Grid;
    let failed = state.deals.machine.error().is_some();

    match key {
        Key::Char('?') => Some(AppCommand::ToggleHelp),
        Key::Char('q') => Some(AppCommand::Quit),

        // Multi-key sequence initiator: 'g' sets pending key
        Key::Char('g') => Some(AppCommand::SetPendingKey('g')),
        Key::Char('G') => Some(AppCommand::NavigateToBottom),

        Key::Up | Key::Char('k') => Some(AppCommand::SelectPrevious),
        Key::Down | Key::Char('j') => Some(AppCommand::SelectNext),
        Key::Left | Key::Char('h') if grid => Some(AppCommand::SelectLeft),
        Key::Right | Key::Char('l') if grid => Some(AppCommand::SelectRight),

        Key::Enter => empty_state_action(state).or(Some(AppCommand::OpenDetail)),
        Key::Char('f') | Key::Char(' ') => Some(AppCommand::ToggleFavorite),
        Key::Char('o') => Some(AppCommand::OpenDealInBrowser),
        Key::Char('*') => Some(AppCommand::ToggleShowOnlyFavorites),

        Key::Char('v') => Some(AppCommand::ToggleViewMode),
        Key::Char('t') => Some(AppCommand::ToggleTheme),

        Key::Char('/') => Some(AppCommand::EnterFilterMode),
        Key::Char('c') => Some(AppCommand::ClearFilters),
        Key::Char('r') if failed => Some(AppCommand::RetryDeals),
        Key::Char('r') => Some(AppCommand::RefreshDeals),

        Key::Char(c @ '1'..='5') if !grid => SortColumn::from_digit(c).map(AppCommand::SortByColumn),
        Key::Char('[') if !grid => Some(AppCommand::PreviousPage),
        Key::Char(']') if !grid => Some(AppCommand::NextPage),
        Key::Char('T') if grid => Some(AppCommand::BackToTop),

        _ => None,
    }
}

/// Action offered by the empty-state panel, when one is showing.
pub fn empty_state_action(state: &AppState) -> Option<AppCommand> {
    if state.deals.machine.is_fetching() {
        return None;
    }
    if state.deals.machine.error().is_some() {
        return Some(AppCommand::RetryDeals);
    }
    if !state.visible_deals().is_empty() {
        return None;
    }
    if state.show_only_favorites {
        Some(AppCommand::ToggleShowOnlyFavorites)
    } else {
        Some(AppCommand::ClearFilters)
    }
}
