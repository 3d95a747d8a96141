//! Persisted user preferences: theme, view mode and favorites.
//!
//! Each preference lives under its own key and is read once at startup.
//! A missing or unreadable value falls back to its default without
//! affecting the other keys.

mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, PreferenceError};

use crate::state::favorites::FavoriteSet;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub const THEME_KEY: &str = "game-deals-theme";
pub const VIEW_MODE_KEY: &str = "game-deals-view-mode";
pub const FAVORITES_KEY: &str = "game-deals-favorites";

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Table,
    Grid,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Table => ViewMode::Grid,
            ViewMode::Grid => ViewMode::Table,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Table => "table",
            ViewMode::Grid => "grid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue(String);

impl fmt::Display for UnknownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value '{}'", self.0)
    }
}

impl FromStr for Theme {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

impl FromStr for ViewMode {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "table" => Ok(ViewMode::Table),
            "grid" => Ok(ViewMode::Grid),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

/// Settings handed to the rendering layer.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewPreferences {
    pub theme: Theme,
    pub view_mode: ViewMode,
}

/// Typed access to the three preference keys.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
    default_theme: Theme,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>, default_theme: Theme) -> Self {
        Self {
            store,
            default_theme,
        }
    }

    pub fn load_view_preferences(&self) -> ViewPreferences {
        ViewPreferences {
            theme: self.load_theme(),
            view_mode: self.load_view_mode(),
        }
    }

    pub fn load_theme(&self) -> Theme {
        self.load_parsed(THEME_KEY).unwrap_or(self.default_theme)
    }

    pub fn load_view_mode(&self) -> ViewMode {
        self.load_parsed(VIEW_MODE_KEY).unwrap_or_default()
    }

    pub fn load_favorites(&self) -> FavoriteSet {
        let Some(raw) = self.load_raw(FAVORITES_KEY) else {
            return FavoriteSet::new();
        };
        match FavoriteSet::from_json(&raw) {
            Ok(favorites) => {
                tracing::debug!(count = favorites.len(), "Loaded favorites");
                favorites
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored favorites are corrupt, starting empty");
                FavoriteSet::new()
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<(), PreferenceError> {
        self.store.save(THEME_KEY, theme.as_str())
    }

    pub fn save_view_mode(&self, view_mode: ViewMode) -> Result<(), PreferenceError> {
        self.store.save(VIEW_MODE_KEY, view_mode.as_str())
    }

    pub fn save_favorites(&self, favorites: &FavoriteSet) -> Result<(), PreferenceError> {
        let json = favorites.to_json()?;
        self.store.save(FAVORITES_KEY, &json)
    }

    fn load_raw(&self, key: &str) -> Option<String> {
        match self.store.load(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read preference");
                None
            }
        }
    }

    fn load_parsed<T>(&self, key: &str) -> Option<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self.load_raw(key)?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring unparsable preference");
                None
            }
        }
    }
}
