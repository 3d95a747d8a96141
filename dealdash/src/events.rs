use crate::state::filter::FetchTicket;
use crate::state::projection::SortColumn;
use cheapshark_api::{Deal, ErrorKind, GameDetail, Store};

/// Commands to execute (user actions → state changes and background tasks)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    SelectNext,
    SelectPrevious,
    SelectLeft,
    SelectRight,
    NavigateToTop,
    NavigateToBottom,

    // Navigation
    NavigateBack,

    // Data loading
    LoadStores,
    RefreshDeals,
    RetryDeals,

    // Deal detail
    OpenDetail,
    CloseDetail,
    OpenDealInBrowser,

    // Favorites
    ToggleFavorite,
    ToggleShowOnlyFavorites,

    // Filter sidebar
    EnterFilterMode,
    ExitFilterMode,
    FocusFilterField { forward: bool },
    AdjustFilterField { forward: bool },
    AppendTitleChar(char),
    DeleteTitleChar,
    ApplyFilters,
    ClearFilters,

    // Table view
    SortByColumn(SortColumn),
    PreviousPage,
    NextPage,

    // Grid view
    BackToTop,

    // View toggles
    ToggleViewMode,
    ToggleTheme,
    ToggleHelp,

    // Log screen
    NavigateToLogs,
    ScrollLogsUp,
    ScrollLogsDown,
    ScrollLogsPageUp,
    ScrollLogsPageDown,
    ScrollLogsToTop,
    ScrollLogsToBottom,

    // Key sequence state
    SetPendingKey(char),
    ClearPendingKey,

    // System
    Quit,
}

/// Events from background tasks (responses to commands)
#[derive(Debug, Clone)]
pub enum DataEvent {
    // Deals, tagged with the commit generation they answer
    DealsLoaded {
        generation: u64,
        deals: Vec<Deal>,
    },
    DealsLoadFailed {
        generation: u64,
        kind: ErrorKind,
        error: String,
    },

    // Stores
    StoresLoaded {
        stores: Vec<Store>,
    },
    StoresLoadFailed {
        error: String,
    },

    // Game detail
    GameDetailLoaded {
        game_id: String,
        detail: Box<GameDetail>,
    },
    GameDetailLoadFailed {
        game_id: String,
        error: String,
    },
}

/// Work a command asks the runtime to do outside the state.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    FetchDeals(FetchTicket),
    FetchStores,
    FetchGameDetail { game_id: String },
    OpenUrl(String),
}
