use crate::endpoints::{
    deals::{DealFilter, ListDeals},
    games::GetGame,
    stores::ListStores,
};

pub struct DealRepository;

impl DealRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self, filter: DealFilter) -> ListDeals {
        ListDeals::new(filter)
    }
}

pub struct StoreRepository;

impl StoreRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListStores {
        ListStores::new()
    }
}

pub struct GameRepository;

impl GameRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn get(&self, game_id: impl Into<String>) -> GetGame {
        GetGame::new(game_id)
    }
}
