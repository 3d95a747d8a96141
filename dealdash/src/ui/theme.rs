//! Centralized palettes, layout constants and style functions.
//!
//! Every color a screen uses comes from the active [`Palette`], chosen from
//! the persisted theme and passed down explicitly.

use ratatui::style::{Color, Modifier, Style};

use crate::preferences::Theme;

// =============================================================================
// Palettes
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Body text
    pub text: Color,
    /// Help text and secondary information
    pub muted: Color,
    /// Screen titles and accent borders
    pub accent: Color,
    /// Table headers and key labels
    pub header: Color,
    /// Background for selected rows and cards
    pub selection_bg: Color,
    /// Savings, good ratings, favorites
    pub positive: Color,
    /// Loading messages, middling ratings
    pub warning: Color,
    /// Errors, poor ratings
    pub danger: Color,
    /// Focused filter field background
    pub field_bg: Color,
}

pub const DARK: Palette = Palette {
    text: Color::White,
    muted: Color::Gray,
    accent: Color::Cyan,
    header: Color::Yellow,
    selection_bg: Color::DarkGray,
    positive: Color::Green,
    warning: Color::Yellow,
    danger: Color::Red,
    field_bg: Color::DarkGray,
};

pub const LIGHT: Palette = Palette {
    text: Color::Black,
    muted: Color::DarkGray,
    accent: Color::Blue,
    header: Color::Magenta,
    selection_bg: Color::Gray,
    positive: Color::Green,
    warning: Color::Indexed(130),
    danger: Color::Red,
    field_bg: Color::Gray,
};

impl Palette {
    pub fn for_theme(theme: Theme) -> &'static Palette {
        match theme {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }

    /// Style for selected/highlighted rows in tables and cards
    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn help_text_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn loading_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.danger)
            .add_modifier(Modifier::BOLD)
    }

    pub fn savings_style(&self) -> Style {
        Style::default()
            .fg(self.positive)
            .add_modifier(Modifier::BOLD)
    }

    pub fn field_focused_style(&self) -> Style {
        Style::default()
            .bg(self.field_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_border_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn info_border_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Color for a deal rating out of 10.
    pub fn rating_color(&self, rating: Option<f64>) -> Color {
        match rating {
            Some(r) if r >= 8.0 => self.positive,
            Some(r) if r >= 5.0 => self.warning,
            Some(_) => self.danger,
            None => self.muted,
        }
    }
}

// =============================================================================
// Layout Constants
// =============================================================================

/// Standard margin around screen content
pub const SCREEN_MARGIN: u16 = 1;

/// Height of the title/header area
pub const TITLE_HEIGHT: u16 = 1;

/// Height of the help bar at the bottom
pub const HELP_BAR_HEIGHT: u16 = 3;

/// Width of the filter sidebar
pub const SIDEBAR_WIDTH: u16 = 30;

/// Height of one grid card, borders included
pub const CARD_HEIGHT: u16 = crate::state::projection::CARD_HEIGHT as u16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_follows_theme() {
        assert_eq!(Palette::for_theme(Theme::Dark), &DARK);
        assert_eq!(Palette::for_theme(Theme::Light), &LIGHT);
    }

    #[test]
    fn test_rating_color_thresholds() {
        assert_eq!(DARK.rating_color(Some(9.1)), DARK.positive);
        assert_eq!(DARK.rating_color(Some(5.0)), DARK.warning);
        assert_eq!(DARK.rating_color(Some(2.0)), DARK.danger);
        assert_eq!(DARK.rating_color(None), DARK.muted);
    }
}
