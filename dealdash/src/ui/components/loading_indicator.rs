use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::state::LoadingState;
use crate::ui::theme::Palette;

/// Render a loading indicator in the top-right corner
/// Shows current loading state with color coding
pub fn render_loading_indicator(
    f: &mut Frame,
    area: Rect,
    palette: &Palette,
    loading_state: &LoadingState,
) {
    let (text, color) = match &loading_state {
        LoadingState::NotStarted => return,
        LoadingState::Loading(throbber_state) => {
            let simple = throbber_widgets_tui::Throbber::default()
                .style(palette.loading_style())
                .throbber_set(throbber_widgets_tui::BRAILLE_EIGHT);
            f.render_stateful_widget(simple, area, &mut throbber_state.clone());
            return;
        }
        LoadingState::Loaded => ("✓", palette.positive),
        LoadingState::Error(_) => ("x", palette.danger),
    };

    let indicator =
        Paragraph::new(Span::styled(text, Style::default().fg(color))).alignment(Alignment::Right);

    f.render_widget(indicator, area);
}
