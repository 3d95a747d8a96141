use crate::app_core::{AppCore, DataEventHandler};
use crate::commands::executor;
use crate::events::{AppCommand, DataEvent, SideEffect};
use crate::input::{Key, KeyEvent};
use crate::preferences::MemoryStore;
use crate::preferences::{Preferences, Theme};
use crate::state::filter::FetchTicket;
use crate::state::AppState;
use crate::ui::screens::Screen;
use cheapshark_api::endpoints::stores::StoreImages;
use cheapshark_api::{Deal, Store};
use std::sync::Arc;

/// Mock data event handler for tests (no real async tasks)
///
/// Commands run through execute_command_sync against an in-memory
/// preference store; side effects are recorded instead of performed.
pub struct MockDataHandler {
    preferences: Preferences,
    effects: Vec<SideEffect>,
}

impl MockDataHandler {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            preferences,
            effects: Vec::new(),
        }
    }

    pub fn effects(&self) -> &[SideEffect] {
        &self.effects
    }
}

impl DataEventHandler for MockDataHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        if let Some(effect) = executor::execute_command_sync(command, state, &self.preferences) {
            self.effects.push(effect);
        }
    }
}

pub struct TestApp {
    core: AppCore<MockDataHandler>,
    store: Arc<MemoryStore>,
}

impl TestApp {
    /// Create a new test app with an empty preference store
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Create a test app whose initial state is read from `store`
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        let preferences = Preferences::new(store.clone(), Theme::Dark);
        let state = AppState::from_preferences(&preferences);
        Self {
            core: AppCore::new(MockDataHandler::new(preferences), state),
            store,
        }
    }

    /// Send a single key event
    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key(KeyEvent::new(key));
    }

    /// Send a key event with modifiers
    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key(event);
    }

    /// Send multiple keys in sequence
    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Run a command without going through key handling
    pub fn execute(&mut self, command: AppCommand) {
        self.core.execute(command);
    }

    /// Inject a data event (simulate an API response)
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
    }

    /// Get read-only access to current state
    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    /// Side effects requested so far, oldest first
    pub fn effects(&self) -> &[SideEffect] {
        self.core.handler().effects()
    }

    /// Most recent deals fetch, if any
    pub fn last_deals_ticket(&self) -> Option<FetchTicket> {
        self.effects().iter().rev().find_map(|effect| match effect {
            SideEffect::FetchDeals(ticket) => Some(ticket.clone()),
            _ => None,
        })
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Assert that the app is on a specific screen type
    ///
    /// Uses discriminant comparison to check screen type without
    /// requiring full equality of state.
    pub fn assert_screen_type(&self, expected_discriminant: std::mem::Discriminant<Screen>) {
        let current = self.state().current_screen();
        assert_eq!(
            std::mem::discriminant(current),
            expected_discriminant,
            "Expected different screen. Current: {:?}",
            current
        );
    }

    /// Assert that the app should quit
    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    /// Assert that the app should NOT quit
    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Deal fixture with the fields tests usually care about
pub fn deal(deal_id: &str, game_id: &str, title: &str, sale_price: &str) -> Deal {
    Deal {
        deal_id: deal_id.to_string(),
        game_id: game_id.to_string(),
        store_id: "1".to_string(),
        title: title.to_string(),
        normal_price: "19.99".to_string(),
        sale_price: sale_price.to_string(),
        savings: "50.000000".to_string(),
        deal_rating: None,
        thumb: None,
        internal_name: None,
        metacritic_link: None,
        metacritic_score: None,
        steam_rating_text: None,
        steam_rating_percent: None,
        steam_rating_count: None,
        steam_app_id: None,
        release_date: None,
        last_change: None,
        is_on_sale: None,
    }
}

pub fn store(store_id: &str, store_name: &str) -> Store {
    Store {
        store_id: store_id.to_string(),
        store_name: store_name.to_string(),
        is_active: 1,
        images: StoreImages::default(),
    }
}
