//! Deal detail view: prices, discount, rating, and the game's historical low.

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use super::popup::{self, PopupChrome};
use crate::state::{DetailState, LoadingState};
use crate::ui::{layouts, theme::Palette, utils};
use cheapshark_api::store_icon_url;

pub fn render_detail_popup(f: &mut Frame, detail: &DetailState, favorite: bool, palette: &Palette) {
    let inner = popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::MEDIUM,
        PopupChrome {
            title: " Deal ",
            footer: Some(" o open deal · f favorite · Esc close "),
            border_style: palette.accent_border_style(),
        },
    );

    let paragraph = Paragraph::new(detail_lines(detail, favorite, palette)).wrap(Wrap { trim: true });
    f.render_widget(paragraph, inner);
}

fn detail_lines<'a>(detail: &'a DetailState, favorite: bool, palette: &Palette) -> Vec<Line<'a>> {
    let deal = &detail.deal;
    let rating = deal.rating_value();
    let label = |text: &'static str| Span::styled(format!("{:<16}", text), palette.help_text_style());

    let mut title = vec![Span::styled(deal.title.as_str(), palette.title_style())];
    if favorite {
        title.push(Span::styled(" ★", Style::default().fg(palette.positive)));
    }

    let mut lines = vec![
        Line::from(title),
        Line::from(""),
        Line::from(vec![
            label("Store"),
            Span::raw(
                detail
                    .store_name
                    .clone()
                    .unwrap_or_else(|| format!("Store {}", deal.store_id)),
            ),
        ]),
        Line::from(vec![
            label("Store icon"),
            Span::raw(store_icon_url(&deal.store_id).unwrap_or_else(|| "N/A".to_string())),
        ]),
        Line::from(vec![
            label("Price"),
            Span::styled(utils::fmt_price(&deal.sale_price), palette.savings_style()),
            Span::raw("  "),
            Span::styled(
                utils::fmt_price(&deal.normal_price),
                palette.help_text_style().crossed_out(),
            ),
        ]),
        Line::from(vec![
            label("Discount"),
            Span::raw(utils::fmt_discount(deal.computed_discount())),
        ]),
        Line::from(vec![
            label("Deal rating"),
            Span::styled(
                utils::fmt_rating(rating),
                Style::default().fg(palette.rating_color(rating)),
            ),
        ]),
    ];

    if let Some(steam) = deal.steam_rating_text.as_deref() {
        let percent = deal
            .steam_rating_percent
            .as_deref()
            .map(|p| format!(" ({}%)", p))
            .unwrap_or_default();
        lines.push(Line::from(vec![
            label("Steam reviews"),
            Span::raw(format!("{}{}", steam, percent)),
        ]));
    }
    if let Some(released) = deal.released_at() {
        lines.push(Line::from(vec![
            label("Released"),
            Span::raw(utils::fmt_date(released)),
        ]));
    }

    lines.push(Line::from(vec![
        label("Thumbnail"),
        Span::raw(deal.thumbnail_or_placeholder()),
    ]));
    lines.push(Line::from(""));
    lines.push(historical_low_line(detail, palette));

    lines
}

fn historical_low_line<'a>(detail: &'a DetailState, palette: &Palette) -> Line<'a> {
    let label = Span::styled(format!("{:<16}", "Historical low"), palette.help_text_style());

    let value = match &detail.loading {
        LoadingState::Error(message) => Span::styled(message.clone(), palette.error_style()),
        LoadingState::Loading(_) | LoadingState::NotStarted => {
            Span::styled("Loading...", palette.loading_style())
        }
        LoadingState::Loaded => {
            let cheapest = detail
                .game
                .as_ref()
                .and_then(|game| game.cheapest_price_ever.as_ref());
            match cheapest.and_then(|c| c.price.as_deref()) {
                Some(price) => {
                    let date = cheapest
                        .and_then(|c| c.date_utc())
                        .map(|d| format!(" on {}", utils::fmt_date(d)))
                        .unwrap_or_default();
                    Span::styled(
                        format!("{}{}", utils::fmt_price(price), date),
                        palette.text_style(),
                    )
                }
                None => Span::styled("N/A", palette.help_text_style()),
            }
        }
    };

    Line::from(vec![label, value])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::deal;
    use crate::ui::theme::DARK;
    use cheapshark_api::endpoints::games::CheapestPrice;
    use cheapshark_api::GameDetail;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn detail(loading: LoadingState, game: Option<GameDetail>) -> DetailState {
        let mut deal = deal("a", "g1", "Celeste", "4.99");
        deal.deal_rating = Some("9.1".to_string());
        DetailState {
            deal,
            store_name: Some("Steam".to_string()),
            loading,
            game,
        }
    }

    #[test]
    fn test_detail_shows_prices_and_rating() {
        let state = detail(LoadingState::Loading(Default::default()), None);
        let lines: Vec<String> = detail_lines(&state, false, &DARK)
            .iter()
            .map(text)
            .collect();

        assert!(lines.iter().any(|l| l.contains("$4.99") && l.contains("$19.99")));
        assert!(lines.iter().any(|l| l.contains("-75%")));
        assert!(lines.iter().any(|l| l.contains("9.1/10")));
        assert!(lines.iter().any(|l| l.contains(cheapshark_api::endpoints::deals::PLACEHOLDER_THUMB)));
        assert!(lines.iter().any(|l| l.contains("Loading...")));
    }

    #[test]
    fn test_historical_low_with_date() {
        let game = GameDetail {
            cheapest_price_ever: Some(CheapestPrice {
                price: Some("3.99".to_string()),
                date: Some(1_543_449_600),
            }),
            ..GameDetail::default()
        };
        let state = detail(LoadingState::Loaded, Some(game));

        assert_eq!(
            text(&historical_low_line(&state, &DARK)),
            format!("{:<16}$3.99 on 11/29/2018", "Historical low")
        );
    }

    #[test]
    fn test_historical_low_failure_shows_error() {
        let state = detail(LoadingState::Error("Could not load".to_string()), None);
        assert!(text(&historical_low_line(&state, &DARK)).ends_with("Could not load"));
    }
}
