//! Title line: app name, deal counts, active toggles and the fetch spinner.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::loading_indicator;
use crate::state::AppState;
use crate::ui::{layouts, theme::Palette};

pub fn render_header(f: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let (text_area, indicator_area) = layouts::title_with_loading(area);

    let shown = state.visible_deals().len();
    let total = state.deals.machine.deals().len();

    let mut spans = vec![
        Span::styled("Game Deals", palette.title_style()),
        Span::raw("  "),
        Span::styled(
            if state.show_only_favorites {
                format!("{} of {} deals", shown, total)
            } else {
                format!("{} deals", total)
            },
            palette.text_style(),
        ),
        Span::raw("  "),
        Span::styled(
            format!("★ {}", state.favorites.len()),
            Style::default().fg(palette.positive),
        ),
    ];

    if state.show_only_favorites {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("[favorites only]", palette.header_style()));
    }

    spans.push(Span::styled(
        format!(
            "  {} · {}",
            state.view.view_mode.as_str(),
            state.view.theme.as_str()
        ),
        palette.help_text_style(),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), text_area);
    loading_indicator::render_loading_indicator(
        f,
        indicator_area,
        palette,
        &state.deals.machine.loading,
    );
}
