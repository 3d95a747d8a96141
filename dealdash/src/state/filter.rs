//! Pending filter edits and the committed-filter fetch lifecycle.
//!
//! Editing the form never fetches. Only `FilterMachine::commit` starts a
//! fetch, and only the result of the latest commit is ever applied.

use super::LoadingState;
use cheapshark_api::{Deal, DealFilter, SortKey, Store};
use throbber_widgets_tui::ThrobberState;

pub const PRICE_MIN: u32 = 0;
pub const PRICE_MAX: u32 = 50;
pub const PRICE_STEP: u32 = 1;
pub const SAVINGS_MIN: u32 = 0;
pub const SAVINGS_MAX: u32 = 100;
pub const SAVINGS_STEP: u32 = 5;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    #[default]
    Store,
    LowerPrice,
    UpperPrice,
    MinSavings,
    SortBy,
    Title,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Store,
        FilterField::LowerPrice,
        FilterField::UpperPrice,
        FilterField::MinSavings,
        FilterField::SortBy,
        FilterField::Title,
    ];

    pub fn next(self) -> Self {
        let index = self.index();
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let index = self.index();
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Store => "Store",
            FilterField::LowerPrice => "Min price",
            FilterField::UpperPrice => "Max price",
            FilterField::MinSavings => "Min savings",
            FilterField::SortBy => "Sort by",
            FilterField::Title => "Title",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// Filter values being edited in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterForm {
    /// `None` means all stores.
    pub store_id: Option<String>,
    pub lower_price: u32,
    pub upper_price: u32,
    pub min_savings: u32,
    pub sort_by: Option<SortKey>,
    pub title: String,
    pub focused: FilterField,
}

impl Default for FilterForm {
    fn default() -> Self {
        Self {
            store_id: None,
            lower_price: PRICE_MIN,
            upper_price: PRICE_MAX,
            min_savings: SAVINGS_MIN,
            sort_by: None,
            title: String::new(),
            focused: FilterField::default(),
        }
    }
}

impl FilterForm {
    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Step the focused field. `stores` are the selectable (active) stores.
    pub fn adjust(&mut self, forward: bool, stores: &[Store]) {
        match self.focused {
            FilterField::Store => self.cycle_store(forward, stores),
            FilterField::LowerPrice => {
                self.lower_price = step(self.lower_price, PRICE_STEP, forward)
                    .clamp(PRICE_MIN, self.upper_price);
            }
            FilterField::UpperPrice => {
                self.upper_price = step(self.upper_price, PRICE_STEP, forward)
                    .clamp(self.lower_price, PRICE_MAX);
            }
            FilterField::MinSavings => {
                self.min_savings =
                    step(self.min_savings, SAVINGS_STEP, forward).clamp(SAVINGS_MIN, SAVINGS_MAX);
            }
            FilterField::SortBy => self.cycle_sort(forward),
            FilterField::Title => {}
        }
    }

    pub fn push_title_char(&mut self, c: char) {
        self.focused = FilterField::Title;
        self.title.push(c);
    }

    pub fn pop_title_char(&mut self) {
        self.title.pop();
    }

    /// Reconcile pending edits into a filter. Values at their neutral
    /// setting are left out.
    pub fn to_filter(&self) -> DealFilter {
        let mut filter = DealFilter::new();
        if let Some(store_id) = &self.store_id {
            filter = filter.store_id(store_id.clone());
        }
        if self.lower_price > PRICE_MIN {
            filter = filter.lower_price(self.lower_price);
        }
        if self.upper_price < PRICE_MAX {
            filter = filter.upper_price(self.upper_price);
        }
        if self.min_savings > SAVINGS_MIN {
            filter = filter.min_savings(self.min_savings);
        }
        if let Some(sort_by) = self.sort_by {
            filter = filter.sort_by(sort_by);
        }
        let title = self.title.trim();
        if !title.is_empty() {
            filter = filter.title(title);
        }
        filter
    }

    fn cycle_store(&mut self, forward: bool, stores: &[Store]) {
        // Position 0 is "All stores", 1..=n the stores in order.
        let count = stores.len() + 1;
        let current = self
            .store_id
            .as_ref()
            .and_then(|id| stores.iter().position(|s| &s.store_id == id))
            .map(|i| i + 1)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        self.store_id = next
            .checked_sub(1)
            .map(|i| stores[i].store_id.clone());
    }

    fn cycle_sort(&mut self, forward: bool) {
        let count = SortKey::ALL.len() + 1;
        let current = self
            .sort_by
            .and_then(|key| SortKey::ALL.iter().position(|k| *k == key))
            .map(|i| i + 1)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        self.sort_by = next.checked_sub(1).map(|i| SortKey::ALL[i]);
    }
}

fn step(value: u32, by: u32, forward: bool) -> u32 {
    if forward {
        value.saturating_add(by)
    } else {
        value.saturating_sub(by)
    }
}

/// Issued by a commit; identifies the fetch its result must answer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub filter: DealFilter,
}

/// Committed filter, raw deals and fetch phase.
///
/// `LoadingState::Loading` is a fetch in flight, `Loaded` is idle and
/// `Error` is a failed fetch.
#[derive(Default, Debug, Clone)]
pub struct FilterMachine {
    committed: Option<DealFilter>,
    deals: Vec<Deal>,
    generation: u64,
    pub loading: LoadingState,
}

impl FilterMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(&mut self, filter: DealFilter) -> FetchTicket {
        self.generation += 1;
        self.committed = Some(filter.clone());
        self.loading = LoadingState::Loading(ThrobberState::default());
        tracing::info!(generation = self.generation, filter = ?filter, "Committed deal filter");
        FetchTicket {
            generation: self.generation,
            filter,
        }
    }

    /// Re-issue the committed filter, or an empty one if nothing was
    /// committed yet.
    pub fn refresh(&mut self) -> FetchTicket {
        let filter = self.committed.clone().unwrap_or_default();
        self.commit(filter)
    }

    /// Returns `false` if the result belongs to a superseded commit.
    pub fn resolve_success(&mut self, generation: u64, deals: Vec<Deal>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.deals = deals;
        self.loading = LoadingState::Loaded;
        true
    }

    /// Returns `false` if the failure belongs to a superseded commit.
    pub fn resolve_failure(&mut self, generation: u64, message: impl Into<String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.deals.clear();
        self.loading = LoadingState::Error(message.into());
        true
    }

    pub fn committed(&self) -> Option<&DealFilter> {
        self.committed.as_ref()
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.loading, LoadingState::Loading(_))
    }

    pub fn error(&self) -> Option<&str> {
        match &self.loading {
            LoadingState::Error(message) => Some(message),
            _ => None,
        }
    }
}
