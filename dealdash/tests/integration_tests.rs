use std::sync::Arc;

use cheapshark_api::{DealFilter, ErrorKind, GameDetail};
use dealdash::events::{DataEvent, SideEffect};
use dealdash::input::{Key, KeyEvent};
use dealdash::preferences::{MemoryStore, Theme, ViewMode, FAVORITES_KEY, THEME_KEY, VIEW_MODE_KEY};
use dealdash::state::{InputMode, DEALS_ERROR_MESSAGE};
use dealdash::testing::{deal, store, TestApp};
use dealdash::ui::screens::Screen;

/// App with the startup fetch resolved to `deals`.
fn app_with_deals(deals: Vec<cheapshark_api::Deal>) -> TestApp {
    let mut app = TestApp::new();
    app.execute(dealdash::commands::AppCommand::RefreshDeals);
    let generation = app.last_deals_ticket().unwrap().generation;
    app.send_data_event(DataEvent::DealsLoaded { generation, deals });
    app
}

fn visible_ids(app: &TestApp) -> Vec<String> {
    app.state()
        .visible_deals()
        .iter()
        .map(|d| d.deal_id.clone())
        .collect()
}

#[test]
fn test_quit_flow() {
    let mut app = TestApp::new();

    app.assert_not_quit();
    app.send_key(Key::Char('q'));
    app.assert_should_quit();
}

#[test]
fn test_help_toggle() {
    let mut app = TestApp::new();

    assert!(!app.state().help_visible);
    app.send_key(Key::Char('?'));
    assert!(app.state().help_visible);

    // Keys other than the close keys are swallowed while help is open
    app.send_key(Key::Char('v'));
    assert_eq!(app.state().view.view_mode, ViewMode::Table);

    app.send_key(Key::Esc);
    assert!(!app.state().help_visible);
}

#[test]
fn test_empty_commit_has_no_filter_parameters() {
    let mut app = TestApp::new();
    app.execute(dealdash::commands::AppCommand::RefreshDeals);

    let ticket = app.last_deals_ticket().unwrap();
    assert!(ticket.filter.is_empty());
}

#[test]
fn test_later_commit_wins_when_it_resolves_first() {
    let mut app = TestApp::new();

    // Commit A: the startup fetch
    app.execute(dealdash::commands::AppCommand::RefreshDeals);
    let a = app.last_deals_ticket().unwrap();

    // Commit B: a title search applied from the sidebar
    app.send_keys(&[Key::Char('/'), Key::Char('z'), Key::Enter]);
    let b = app.last_deals_ticket().unwrap();
    assert_ne!(a.generation, b.generation);
    assert_eq!(b.filter, DealFilter::new().title("z"));

    app.send_data_event(DataEvent::DealsLoaded {
        generation: b.generation,
        deals: vec![deal("b", "g2", "Zelda", "9.99")],
    });
    app.send_data_event(DataEvent::DealsLoaded {
        generation: a.generation,
        deals: vec![deal("a", "g1", "Celeste", "4.99")],
    });

    assert_eq!(visible_ids(&app), ["b"]);
    assert!(!app.state().deals.machine.is_fetching());
}

#[test]
fn test_store_and_savings_filter_round_trip() {
    let mut app = app_with_deals(vec![]);
    app.send_data_event(DataEvent::StoresLoaded {
        stores: vec![store("1", "Steam"), store("2", "GamersGate")],
    });

    // Store: All -> Steam; then three fields down to Min savings, 10 steps of 5%
    app.send_keys(&[Key::Char('/'), Key::Right]);
    app.send_keys(&[Key::Tab, Key::Tab, Key::Tab]);
    app.send_keys(&[Key::Right; 10]);
    app.send_key(Key::Enter);

    let ticket = app.last_deals_ticket().unwrap();
    assert_eq!(
        ticket.filter,
        DealFilter::new().store_id("1").min_savings(50u32)
    );
    assert_eq!(app.state().deals.input_mode, InputMode::Normal);

    app.send_data_event(DataEvent::DealsLoaded {
        generation: ticket.generation,
        deals: vec![deal("a", "g1", "Celeste", "4.99")],
    });

    assert_eq!(visible_ids(&app), ["a"]);
}

#[test]
fn test_editing_filters_does_not_fetch_until_applied() {
    let mut app = app_with_deals(vec![deal("a", "g1", "Celeste", "4.99")]);
    let fetches = app.effects().len();

    app.send_keys(&[Key::Char('/'), Key::Char('h'), Key::Char('i'), Key::Backspace]);
    assert_eq!(app.effects().len(), fetches);
    assert_eq!(app.state().deals.form.title, "h");

    app.send_key(Key::Esc);
    assert_eq!(app.state().deals.input_mode, InputMode::Normal);
    assert_eq!(app.effects().len(), fetches);
}

#[test]
fn test_clear_filters_from_sidebar() {
    let mut app = app_with_deals(vec![]);
    app.send_keys(&[Key::Char('/'), Key::Char('x')]);
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('r')));

    let ticket = app.last_deals_ticket().unwrap();
    assert!(ticket.filter.is_empty());
    assert!(app.state().deals.form.title.is_empty());
}

#[test]
fn test_favorite_toggle_twice_writes_twice() {
    let store = Arc::new(MemoryStore::new());
    let mut app = TestApp::with_store(store.clone());
    app.execute(dealdash::commands::AppCommand::RefreshDeals);
    let generation = app.last_deals_ticket().unwrap().generation;
    app.send_data_event(DataEvent::DealsLoaded {
        generation,
        deals: vec![deal("a", "g1", "Celeste", "4.99")],
    });

    app.send_key(Key::Char('f'));
    assert!(app.state().favorites.contains("g1"));
    app.send_key(Key::Char(' '));
    assert!(!app.state().favorites.contains("g1"));

    assert_eq!(store.write_count(FAVORITES_KEY), 2);
    assert_eq!(store.get(FAVORITES_KEY), Some("[]".to_string()));
    // Toggling never opens the detail view
    assert!(app.state().deals.detail.is_none());
}

#[test]
fn test_corrupt_favorites_load_as_empty() {
    let store = Arc::new(MemoryStore::new().with_entry(FAVORITES_KEY, "{not json"));
    let app = TestApp::with_store(store);

    assert!(app.state().favorites.is_empty());
}

#[test]
fn test_only_favorites_is_local() {
    let mut app = app_with_deals(vec![
        deal("a", "g1", "Celeste", "4.99"),
        deal("b", "g2", "Braid", "1.99"),
        deal("c", "g3", "Hades", "12.49"),
    ]);
    let fetches = app.effects().len();

    // No favorites yet: the projection is empty
    app.send_key(Key::Char('*'));
    assert!(visible_ids(&app).is_empty());
    assert_eq!(app.effects().len(), fetches);

    // Enter on the empty favorites view returns to all deals
    app.send_key(Key::Enter);
    assert!(!app.state().show_only_favorites);

    // Favorite c then a; the projection keeps collection order
    app.send_keys(&[Key::Char('G'), Key::Char('f'), Key::Char('g'), Key::Char('g'), Key::Char('f')]);
    app.send_key(Key::Char('*'));
    assert_eq!(visible_ids(&app), ["a", "c"]);
    assert_eq!(app.effects().len(), fetches);
}

#[test]
fn test_view_and_theme_persist_across_sessions() {
    let store = Arc::new(MemoryStore::new());
    let mut app = TestApp::with_store(store.clone());

    app.send_keys(&[Key::Char('v'), Key::Char('t')]);
    assert_eq!(store.get(VIEW_MODE_KEY), Some("grid".to_string()));
    assert_eq!(store.get(THEME_KEY), Some("light".to_string()));

    let reopened = TestApp::with_store(store);
    assert_eq!(reopened.state().view.view_mode, ViewMode::Grid);
    assert_eq!(reopened.state().view.theme, Theme::Light);
}

#[test]
fn test_failure_then_retry_commits_empty_filter() {
    let mut app = TestApp::new();
    app.send_keys(&[Key::Char('/'), Key::Char('q'), Key::Enter]);
    let failed = app.last_deals_ticket().unwrap();

    app.send_data_event(DataEvent::DealsLoadFailed {
        generation: failed.generation,
        kind: ErrorKind::NetworkError,
        error: "connection refused".to_string(),
    });
    assert_eq!(app.state().deals.machine.error(), Some(DEALS_ERROR_MESSAGE));

    app.send_key(Key::Char('r'));
    let retry = app.last_deals_ticket().unwrap();
    assert!(retry.filter.is_empty());
    assert!(retry.generation > failed.generation);
    assert!(app.state().deals.machine.is_fetching());
}

#[test]
fn test_detail_flow() {
    let mut app = app_with_deals(vec![
        deal("a", "g1", "Celeste", "4.99"),
        deal("b", "g2", "Braid", "1.99"),
    ]);

    app.send_keys(&[Key::Char('j'), Key::Enter]);
    assert_eq!(app.state().deals.input_mode, InputMode::Detail);
    assert_eq!(
        app.effects().last(),
        Some(&SideEffect::FetchGameDetail {
            game_id: "g2".to_string()
        })
    );

    app.send_data_event(DataEvent::GameDetailLoaded {
        game_id: "g2".to_string(),
        detail: Box::new(GameDetail::default()),
    });
    assert!(app.state().deals.detail.as_ref().unwrap().game.is_some());

    // Navigation keys do nothing while the detail is open
    app.send_key(Key::Char('k'));
    assert_eq!(app.state().deals.table.selected(), 1);

    app.send_key(Key::Char('o'));
    assert_eq!(
        app.effects().last(),
        Some(&SideEffect::OpenUrl(
            "https://www.cheapshark.com/redirect?dealID=b".to_string()
        ))
    );

    app.send_key(Key::Esc);
    assert!(app.state().deals.detail.is_none());
    assert_eq!(app.state().deals.input_mode, InputMode::Normal);
}

#[test]
fn test_logs_screen_navigation() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('g'), Key::Char('l')]);
    app.assert_screen_type(std::mem::discriminant(&Screen::Logs(Default::default())));
    assert_eq!(app.state().pending_key, None);

    app.send_key(Key::Char('h'));
    app.assert_screen_type(std::mem::discriminant(&Screen::Deals));
}

#[test]
fn test_gg_returns_to_first_row() {
    let mut app = app_with_deals(vec![
        deal("a", "g1", "Celeste", "4.99"),
        deal("b", "g2", "Braid", "1.99"),
        deal("c", "g3", "Hades", "12.49"),
    ]);

    app.send_key(Key::Char('G'));
    assert_eq!(app.state().deals.table.selected(), 2);

    app.send_key(Key::Char('g'));
    assert_eq!(app.state().pending_key, Some('g'));
    app.send_key(Key::Char('g'));
    assert_eq!(app.state().deals.table.selected(), 0);
    assert_eq!(app.state().pending_key, None);
}
