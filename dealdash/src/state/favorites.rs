use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Game ids the user has marked as favorites.
///
/// Kept sorted so the persisted list does not depend on toggle order.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(BTreeSet<String>);

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, game_id: &str) -> bool {
        self.0.contains(game_id)
    }

    /// Flip membership. Returns `true` if the game is now a favorite.
    pub fn toggle(&mut self, game_id: &str) -> bool {
        if self.0.remove(game_id) {
            false
        } else {
            self.0.insert(game_id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl<S: Into<String>> FromIterator<S> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
