use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::state::projection::{SortColumn, SortDirection};
use crate::state::AppState;
use crate::ui::{theme::Palette, utils};
use cheapshark_api::Deal;

pub fn render_deal_table(f: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let page = state.table_page();
    let sort = state.deals.table.sort;

    let header_cell = |column: SortColumn, right: bool| {
        let arrow = match sort {
            Some(s) if s.column == column => match s.direction {
                SortDirection::Ascending => " ▲",
                SortDirection::Descending => " ▼",
            },
            _ => "",
        };
        let text = Text::from(format!("{}{}", column.label(), arrow));
        Cell::from(if right { text.right_aligned() } else { text })
    };

    let header = Row::new(vec![
        Cell::from("★"),
        header_cell(SortColumn::Title, false),
        Cell::from("Store"),
        header_cell(SortColumn::SalePrice, true),
        header_cell(SortColumn::NormalPrice, true),
        header_cell(SortColumn::Savings, true),
        header_cell(SortColumn::Rating, true),
    ])
    .style(palette.header_style())
    .underlined();

    let rows: Vec<Row> = page
        .iter()
        .map(|deal| deal_row(deal, state, palette))
        .collect();

    let title = format!(
        " Deals (page {}/{}) ",
        state.deals.table.page + 1,
        state.table_page_count()
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .row_highlight_style(palette.selection_style());

    f.render_stateful_widget(table, area, &mut state.deals.table.table_state.borrow_mut());
}

fn deal_row<'a>(deal: &'a Deal, state: &'a AppState, palette: &Palette) -> Row<'a> {
    let favorite = if state.favorites.contains(&deal.game_id) {
        Span::styled("★", Style::default().fg(palette.positive))
    } else {
        Span::raw(" ")
    };
    let store = state.store_name(&deal.store_id).unwrap_or("");
    let rating = deal.rating_value();

    Row::new(vec![
        Cell::from(favorite),
        Cell::from(deal.title.as_str()),
        Cell::from(store),
        Cell::from(Text::from(utils::fmt_price(&deal.sale_price)).right_aligned())
            .style(palette.savings_style()),
        Cell::from(Text::from(utils::fmt_price(&deal.normal_price)).right_aligned())
            .style(palette.help_text_style().crossed_out()),
        Cell::from(Text::from(utils::fmt_savings(&deal.savings)).right_aligned()),
        Cell::from(Text::from(utils::fmt_rating(rating)).right_aligned())
            .style(Style::default().fg(palette.rating_color(rating))),
    ])
    .style(palette.text_style())
}
