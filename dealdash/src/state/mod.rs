pub mod favorites;
pub mod filter;
pub mod projection;
pub mod reducer;

use crate::preferences::{Preferences, ViewMode, ViewPreferences};
use crate::ui::screens::Screen;
use cheapshark_api::{Deal, GameDetail, Store};
use favorites::FavoriteSet;
use filter::{FilterForm, FilterMachine};
use projection::ColumnSort;
use ratatui::widgets::TableState;
use std::cell::{Cell, RefCell};
use throbber_widgets_tui::ThrobberState;

/// Shown for every failed deals fetch, whatever the cause.
pub const DEALS_ERROR_MESSAGE: &str = "Failed to load deals. Try again later.";
pub const DETAIL_ERROR_MESSAGE: &str = "Could not load game details. Try again later.";

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

impl LoadingState {
    fn throbber_mut(&mut self) -> Option<&mut ThrobberState> {
        match self {
            LoadingState::Loading(throbber_state) => Some(throbber_state),
            _ => None,
        }
    }
}

/// Represents input mode of the deals screen
#[derive(Default, Debug, Clone, PartialEq)]
pub enum InputMode {
    #[default]
    Normal,
    Filter,
    Detail,
}

#[derive(Debug, Clone)]
pub struct TableView {
    pub sort: Option<ColumnSort>,
    pub page: usize,
    /// Selection within the current page.
    pub table_state: RefCell<TableState>,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            sort: None,
            page: 0,
            table_state: RefCell::new(TableState::default().with_selected(0)),
        }
    }
}

impl TableView {
    pub fn reset(&mut self) {
        self.page = 0;
        self.table_state = RefCell::new(TableState::default().with_selected(0));
    }

    pub fn selected(&self) -> usize {
        self.table_state.borrow().selected().unwrap_or(0)
    }
}

#[derive(Default, Debug, Clone)]
pub struct GridView {
    pub selected: usize,
    /// Lines scrolled; updated while rendering.
    pub scroll_offset: Cell<usize>,
}

impl GridView {
    pub fn reset(&mut self) {
        self.selected = 0;
        self.scroll_offset.set(0);
    }
}

#[derive(Debug, Clone)]
pub struct DetailState {
    pub deal: Deal,
    pub store_name: Option<String>,
    pub loading: LoadingState,
    pub game: Option<GameDetail>,
}

#[derive(Default, Debug, Clone)]
pub struct DealsState {
    pub machine: FilterMachine,
    pub form: FilterForm,
    pub input_mode: InputMode,
    pub table: TableView,
    pub grid: GridView,
    pub detail: Option<DetailState>,
}

impl DealsState {
    pub fn reset_selection(&mut self) {
        self.table.reset();
        self.grid.reset();
    }
}

#[derive(Default, Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub total_entries: usize,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub history: Vec<Screen>,

    pub deals: DealsState,
    pub stores: Vec<Store>,
    pub stores_loading: LoadingState,
    pub favorites: FavoriteSet,
    pub show_only_favorites: bool,
    pub view: ViewPreferences,

    // UI state
    pub help_visible: bool,
    pub pending_key: Option<char>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            history: vec![Screen::Deals],

            deals: DealsState::default(),
            stores: Vec::new(),
            stores_loading: LoadingState::default(),
            favorites: FavoriteSet::new(),
            show_only_favorites: false,
            view: ViewPreferences::default(),

            help_visible: false,
            pending_key: None,

            should_quit: false,
        }
    }

    /// Initial state with persisted preferences applied.
    pub fn from_preferences(preferences: &Preferences) -> Self {
        Self {
            favorites: preferences.load_favorites(),
            view: preferences.load_view_preferences(),
            ..Self::new()
        }
    }

    /// Get the current screen (last in navigation stack)
    pub fn current_screen(&self) -> &Screen {
        self.history.last().unwrap_or(&Screen::Deals)
    }

    /// Get mutable reference to current screen
    pub fn current_screen_mut(&mut self) -> Option<&mut Screen> {
        self.history.last_mut()
    }

    /// Navigate to a new screen (push to stack)
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to new screen, stack depth: {} -> {}",
            self.history.len(),
            self.history.len() + 1
        );
        self.history.push(screen);
    }

    /// Navigate back (pop from stack)
    /// Returns true if navigation succeeded, false if already at root
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() > 1 {
            tracing::debug!(
                "Navigating back, stack depth: {} -> {}",
                self.history.len(),
                self.history.len() - 1
            );
            self.history.pop();
            true
        } else {
            tracing::debug!("Cannot navigate back, already at root screen");
            false
        }
    }

    pub fn logs_state_mut(&mut self) -> Option<&mut LogsState> {
        match self.current_screen_mut() {
            Some(Screen::Logs(logs_state)) => Some(logs_state),
            _ => None,
        }
    }

    /// Deals after the favorites projection, in collection order.
    pub fn visible_deals(&self) -> Vec<&Deal> {
        projection::project(
            self.deals.machine.deals(),
            &self.favorites,
            self.show_only_favorites,
        )
    }

    /// Deals in table order: projected, then sorted by the active column.
    pub fn table_deals(&self) -> Vec<&Deal> {
        projection::sort_deals(self.visible_deals(), self.deals.table.sort)
    }

    pub fn table_page_count(&self) -> usize {
        projection::page_count(self.visible_deals().len())
    }

    /// Rows on the current table page.
    pub fn table_page(&self) -> Vec<&Deal> {
        let deals = self.table_deals();
        projection::page_slice(&deals, self.deals.table.page).to_vec()
    }

    pub fn selected_deal(&self) -> Option<&Deal> {
        match self.view.view_mode {
            ViewMode::Table => {
                let row = self.deals.table.selected();
                self.table_page().get(row).copied()
            }
            ViewMode::Grid => self.visible_deals().get(self.deals.grid.selected).copied(),
        }
    }

    pub fn store_name(&self, store_id: &str) -> Option<&str> {
        self.stores
            .iter()
            .find(|s| s.store_id == store_id)
            .map(|s| s.store_name.as_str())
    }

    /// Stores offered in the filter sidebar.
    pub fn active_stores(&self) -> Vec<Store> {
        self.stores.iter().filter(|s| s.active()).cloned().collect()
    }

    /// Keep selections inside the visible list after it shrinks.
    pub fn clamp_selection(&mut self) {
        let visible = self.visible_deals().len();
        let pages = projection::page_count(visible);
        let table = &mut self.deals.table;
        if table.page >= pages {
            table.page = pages - 1;
        }
        let rows = visible
            .saturating_sub(table.page * projection::PAGE_SIZE)
            .min(projection::PAGE_SIZE);
        let selected = table.selected();
        if rows > 0 && selected >= rows {
            table.table_state.borrow_mut().select(Some(rows - 1));
        }

        let grid = &mut self.deals.grid;
        if visible == 0 {
            grid.selected = 0;
        } else if grid.selected >= visible {
            grid.selected = visible - 1;
        }
    }

    /// Advance every running spinner.
    pub fn tick(&mut self) {
        if let Some(throbber_state) = self.deals.machine.loading.throbber_mut() {
            throbber_state.calc_next();
        }
        if let Some(throbber_state) = self.stores_loading.throbber_mut() {
            throbber_state.calc_next();
        }
        if let Some(detail) = self.deals.detail.as_mut() {
            if let Some(throbber_state) = detail.loading.throbber_mut() {
                throbber_state.calc_next();
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
