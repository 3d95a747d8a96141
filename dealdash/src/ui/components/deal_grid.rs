//! Card grid: fixed column count, scrolled in lines to follow the selection.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::state::projection::{self, CARD_HEIGHT, GRID_COLUMNS};
use crate::state::AppState;
use crate::ui::{layouts, theme::Palette, utils};
use cheapshark_api::Deal;

pub fn render_deal_grid(f: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let deals = state.visible_deals();
    let grid = &state.deals.grid;

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Deals ({}) ", deals.len()));

    let viewport = area.height.saturating_sub(2) as usize;
    let scroll = projection::grid_scroll_offset(grid.scroll_offset.get(), grid.selected, viewport);
    grid.scroll_offset.set(scroll);

    if projection::back_to_top_visible(scroll) {
        block = block.title_bottom(
            Line::from(Span::styled(" ↑ T: back to top ", palette.header_style()))
                .alignment(Alignment::Right),
        );
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    for (row_index, row) in deals.chunks(GRID_COLUMNS).enumerate() {
        let top = row_index * CARD_HEIGHT;
        if top < scroll {
            continue;
        }
        let offset = top - scroll;
        if offset >= inner.height as usize {
            break;
        }

        let cards = layouts::grid_row(inner, inner.y + offset as u16, GRID_COLUMNS);
        for (column, deal) in row.iter().enumerate() {
            let index = row_index * GRID_COLUMNS + column;
            render_card(f, cards[column], deal, state, palette, index == grid.selected);
        }
    }
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    deal: &Deal,
    state: &AppState,
    palette: &Palette,
    selected: bool,
) {
    let favorite = state.favorites.contains(&deal.game_id);
    let rating = deal.rating_value();
    let title_width = area.width.saturating_sub(4) as usize;

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(utils::truncate(&deal.title, title_width));
    if favorite {
        block = block.title_top(
            Line::from(Span::styled("★", Style::default().fg(palette.positive)))
                .alignment(Alignment::Right),
        );
    }
    if selected {
        block = block
            .border_style(palette.info_border_style())
            .style(palette.selection_style());
    }

    let mut lines = vec![
        Line::from(Span::styled(
            format!("-{}", utils::fmt_savings(&deal.savings)),
            palette.savings_style(),
        )),
        Line::from(vec![
            Span::styled(utils::fmt_price(&deal.sale_price), palette.text_style().bold()),
            Span::raw(" "),
            Span::styled(
                utils::fmt_price(&deal.normal_price),
                palette.help_text_style().crossed_out(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Rating ", palette.help_text_style()),
            Span::styled(
                utils::fmt_rating(rating),
                Style::default().fg(palette.rating_color(rating)),
            ),
        ]),
    ];
    if let Some(steam) = deal.steam_rating_text.as_deref() {
        lines.push(Line::from(Span::styled(
            utils::truncate(steam, title_width),
            palette.help_text_style(),
        )));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}
