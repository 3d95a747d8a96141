use super::{AppState, LoadingState, DEALS_ERROR_MESSAGE, DETAIL_ERROR_MESSAGE};
use crate::events::DataEvent;

/// Pure state transition function for data events
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        DataEvent::DealsLoaded { generation, deals } => {
            let count = deals.len();
            if state.deals.machine.resolve_success(generation, deals) {
                tracing::info!(generation, count, "Deals loaded");
                state.deals.reset_selection();
            } else {
                tracing::debug!(
                    generation,
                    current = state.deals.machine.generation(),
                    "Discarding deals from superseded fetch"
                );
            }
        }

        DataEvent::DealsLoadFailed {
            generation,
            kind,
            error,
        } => {
            if state
                .deals
                .machine
                .resolve_failure(generation, DEALS_ERROR_MESSAGE)
            {
                tracing::error!(generation, ?kind, error = %error, "Failed to load deals");
                state.deals.reset_selection();
            } else {
                tracing::debug!(generation, ?kind, "Discarding failure from superseded fetch");
            }
        }

        DataEvent::StoresLoaded { stores } => {
            tracing::info!("Loaded {} stores", stores.len());
            state.stores = stores;
            state.stores_loading = LoadingState::Loaded;
        }

        DataEvent::StoresLoadFailed { error } => {
            tracing::error!("Failed to load stores: {}", error);
            state.stores.clear();
            state.stores_loading = LoadingState::Error(error);
        }

        DataEvent::GameDetailLoaded { game_id, detail } => match state.deals.detail.as_mut() {
            Some(open) if open.deal.game_id == game_id => {
                open.game = Some(*detail);
                open.loading = LoadingState::Loaded;
            }
            _ => tracing::debug!(game_id, "Ignoring game detail for closed popup"),
        },

        DataEvent::GameDetailLoadFailed { game_id, error } => {
            tracing::warn!(game_id, "Failed to load game detail: {}", error);
            if let Some(open) = state.deals.detail.as_mut() {
                if open.deal.game_id == game_id {
                    open.loading = LoadingState::Error(DETAIL_ERROR_MESSAGE.to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DetailState;
    use crate::testing::{deal, store};
    use cheapshark_api::{DealFilter, ErrorKind, GameDetail};

    fn committed_state() -> (AppState, u64) {
        let mut state = AppState::new();
        let ticket = state.deals.machine.commit(DealFilter::new());
        (state, ticket.generation)
    }

    #[test]
    fn test_deals_loaded_for_current_generation() {
        let (mut state, generation) = committed_state();

        reduce_data_event(
            &mut state,
            DataEvent::DealsLoaded {
                generation,
                deals: vec![deal("a", "g1", "Celeste", "4.99")],
            },
        );

        assert_eq!(state.deals.machine.deals().len(), 1);
        assert_eq!(state.deals.machine.loading, LoadingState::Loaded);
    }

    #[test]
    fn test_stale_deals_are_discarded() {
        let mut state = AppState::new();
        let first = state.deals.machine.commit(DealFilter::new());
        let second = state
            .deals
            .machine
            .commit(DealFilter::new().store_id("1"));

        reduce_data_event(
            &mut state,
            DataEvent::DealsLoaded {
                generation: second.generation,
                deals: vec![deal("b", "g2", "Braid", "1.99")],
            },
        );
        reduce_data_event(
            &mut state,
            DataEvent::DealsLoaded {
                generation: first.generation,
                deals: vec![deal("a", "g1", "Celeste", "4.99")],
            },
        );

        let ids: Vec<_> = state
            .deals
            .machine
            .deals()
            .iter()
            .map(|d| d.deal_id.as_str())
            .collect();
        assert_eq!(ids, ["b"]);
    }

    #[test]
    fn test_deals_failure_shows_generic_message() {
        let (mut state, generation) = committed_state();

        reduce_data_event(
            &mut state,
            DataEvent::DealsLoadFailed {
                generation,
                kind: ErrorKind::DataShapeError,
                error: "element 0 did not decode".to_string(),
            },
        );

        assert_eq!(state.deals.machine.error(), Some(DEALS_ERROR_MESSAGE));
        assert!(state.deals.machine.deals().is_empty());
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut state = AppState::new();
        let first = state.deals.machine.commit(DealFilter::new());
        let _second = state.deals.machine.commit(DealFilter::new());

        reduce_data_event(
            &mut state,
            DataEvent::DealsLoadFailed {
                generation: first.generation,
                kind: ErrorKind::NetworkError,
                error: "timed out".to_string(),
            },
        );

        assert!(state.deals.machine.is_fetching());
        assert_eq!(state.deals.machine.error(), None);
    }

    #[test]
    fn test_stores_loaded_and_failed() {
        let mut state = AppState::new();

        reduce_data_event(
            &mut state,
            DataEvent::StoresLoaded {
                stores: vec![store("1", "Steam")],
            },
        );
        assert_eq!(state.store_name("1"), Some("Steam"));

        reduce_data_event(
            &mut state,
            DataEvent::StoresLoadFailed {
                error: "offline".to_string(),
            },
        );
        assert!(state.stores.is_empty());
        assert_eq!(state.stores_loading, LoadingState::Error("offline".to_string()));
    }

    #[test]
    fn test_game_detail_applies_only_to_open_popup() {
        let mut state = AppState::new();
        state.deals.detail = Some(DetailState {
            deal: deal("a", "g1", "Celeste", "4.99"),
            store_name: None,
            loading: LoadingState::Loading(Default::default()),
            game: None,
        });

        reduce_data_event(
            &mut state,
            DataEvent::GameDetailLoaded {
                game_id: "other".to_string(),
                detail: Box::default(),
            },
        );
        assert!(state.deals.detail.as_ref().unwrap().game.is_none());

        reduce_data_event(
            &mut state,
            DataEvent::GameDetailLoaded {
                game_id: "g1".to_string(),
                detail: Box::new(GameDetail::default()),
            },
        );
        let detail = state.deals.detail.as_ref().unwrap();
        assert_eq!(detail.game, Some(GameDetail::default()));
        assert_eq!(detail.loading, LoadingState::Loaded);
    }

    #[test]
    fn test_game_detail_failure_marks_popup() {
        let mut state = AppState::new();
        state.deals.detail = Some(DetailState {
            deal: deal("a", "g1", "Celeste", "4.99"),
            store_name: None,
            loading: LoadingState::Loading(Default::default()),
            game: None,
        });

        reduce_data_event(
            &mut state,
            DataEvent::GameDetailLoadFailed {
                game_id: "g1".to_string(),
                error: "offline".to_string(),
            },
        );

        assert_eq!(
            state.deals.detail.as_ref().unwrap().loading,
            LoadingState::Error(DETAIL_ERROR_MESSAGE.to_string())
        );
    }
}
