//! Display formatting for prices, percentages, ratings and dates.
//!
//! One fixed locale: US dollars with two decimals, `MM/DD/YYYY` dates.
//! Values that do not parse are shown as the API returned them.

use chrono::{DateTime, Utc};

/// `"14.99"` -> `"$14.99"`; anything unparsable is returned unchanged.
pub fn fmt_price(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => format!("${:.2}", value),
        _ => raw.to_string(),
    }
}

/// `"66.733422"` -> `"67%"`.
pub fn fmt_savings(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => format!("{:.0}%", value),
        _ => raw.to_string(),
    }
}

pub fn fmt_rating(rating: Option<f64>) -> String {
    match rating {
        Some(value) => format!("{:.1}/10", value),
        None => "N/A".to_string(),
    }
}

pub fn fmt_discount(discount: Option<i64>) -> String {
    match discount {
        Some(percent) => format!("-{}%", percent),
        None => "N/A".to_string(),
    }
}

pub fn fmt_date(date: DateTime<Utc>) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
