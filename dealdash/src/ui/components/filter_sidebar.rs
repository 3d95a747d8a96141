//! Filter sidebar: the pending form, one line per field.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::state::filter::{FilterField, FilterForm, PRICE_MAX};
use crate::state::{AppState, InputMode, LoadingState};
use crate::ui::theme::Palette;

pub fn render_filter_sidebar(f: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let editing = state.deals.input_mode == InputMode::Filter;
    let form = &state.deals.form;

    let mut lines = Vec::new();
    for field in FilterField::ALL {
        let focused = editing && form.focused == field;
        lines.push(Line::from(Span::styled(
            field.label(),
            palette.help_text_style(),
        )));
        let value_style = if focused {
            palette.field_focused_style()
        } else {
            palette.text_style()
        };
        let marker = if focused { "▸ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, palette.header_style()),
            Span::styled(field_value(field, form, state, editing), value_style),
        ]));
    }

    if let LoadingState::Error(_) = state.stores_loading {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Could not load stores",
            palette.error_style(),
        )));
    }

    lines.push(Line::from(""));
    if editing {
        lines.push(Line::from(Span::styled(
            "Enter apply · Ctrl+r clear · Esc close",
            palette.help_text_style(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "/ edit · c clear",
            palette.help_text_style(),
        )));
    }

    let border_style = if editing {
        palette.info_border_style()
    } else {
        Style::default()
    };
    let sidebar = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Filters "),
    );

    f.render_widget(sidebar, area);
}

fn field_value(field: FilterField, form: &FilterForm, state: &AppState, editing: bool) -> String {
    match field {
        FilterField::Store => match &form.store_id {
            Some(id) => state.store_name(id).unwrap_or(id).to_string(),
            None => "All stores".to_string(),
        },
        FilterField::LowerPrice => format!("${}", form.lower_price),
        FilterField::UpperPrice if form.upper_price >= PRICE_MAX => format!("${}+", PRICE_MAX),
        FilterField::UpperPrice => format!("${}", form.upper_price),
        FilterField::MinSavings => format!("{}%", form.min_savings),
        FilterField::SortBy => form
            .sort_by
            .map(|key| key.label().to_string())
            .unwrap_or_else(|| "Default".to_string()),
        FilterField::Title if editing && form.focused == FilterField::Title => {
            format!("{}_", form.title)
        }
        FilterField::Title if form.title.is_empty() => "Any".to_string(),
        FilterField::Title => form.title.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::store;

    #[test]
    fn test_store_value_uses_name() {
        let mut state = AppState::new();
        state.stores = vec![store("1", "Steam")];
        let form = FilterForm {
            store_id: Some("1".to_string()),
            ..FilterForm::default()
        };

        assert_eq!(field_value(FilterField::Store, &form, &state, false), "Steam");
        assert_eq!(
            field_value(FilterField::Store, &FilterForm::default(), &state, false),
            "All stores"
        );
    }

    #[test]
    fn test_upper_price_at_max_is_open_ended() {
        let state = AppState::new();
        assert_eq!(
            field_value(FilterField::UpperPrice, &FilterForm::default(), &state, false),
            "$50+"
        );
    }

    #[test]
    fn test_title_shows_cursor_while_editing() {
        let state = AppState::new();
        let form = FilterForm {
            title: "hades".to_string(),
            focused: FilterField::Title,
            ..FilterForm::default()
        };
        assert_eq!(field_value(FilterField::Title, &form, &state, true), "hades_");
        assert_eq!(field_value(FilterField::Title, &form, &state, false), "hades");
    }
}
