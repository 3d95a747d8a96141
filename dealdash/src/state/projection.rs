//! Local views over the raw deal collection.

use super::favorites::FavoriteSet;
use cheapshark_api::Deal;
use itertools::Itertools;
use std::cmp::Ordering;

pub const PAGE_SIZE: usize = 10;
pub const GRID_COLUMNS: usize = 3;
pub const CARD_HEIGHT: usize = 8;
/// Lines scrolled before the grid offers a way back to the top.
pub const BACK_TO_TOP_THRESHOLD: usize = 10;

/// Deals to display. With `show_only_favorites` set, keeps only favorite
/// games in their original order; otherwise passes everything through.
pub fn project<'a>(
    deals: &'a [Deal],
    favorites: &FavoriteSet,
    show_only_favorites: bool,
) -> Vec<&'a Deal> {
    deals
        .iter()
        .filter(|deal| !show_only_favorites || favorites.contains(&deal.game_id))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Title,
    SalePrice,
    NormalPrice,
    Savings,
    Rating,
}

impl SortColumn {
    pub const ALL: [SortColumn; 5] = [
        SortColumn::Title,
        SortColumn::SalePrice,
        SortColumn::NormalPrice,
        SortColumn::Savings,
        SortColumn::Rating,
    ];

    /// Column for the number keys `1`-`5`.
    pub fn from_digit(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)? as usize;
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Title => "Title",
            SortColumn::SalePrice => "Price",
            SortColumn::NormalPrice => "Normal",
            SortColumn::Savings => "Savings",
            SortColumn::Rating => "Rating",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl ColumnSort {
    /// First press on a column sorts ascending; pressing it again flips.
    pub fn toggle(current: Option<ColumnSort>, column: SortColumn) -> ColumnSort {
        match current {
            Some(sort) if sort.column == column => ColumnSort {
                column,
                direction: match sort.direction {
                    SortDirection::Ascending => SortDirection::Descending,
                    SortDirection::Descending => SortDirection::Ascending,
                },
            },
            _ => ColumnSort {
                column,
                direction: SortDirection::Ascending,
            },
        }
    }
}

/// Stable sort by a table column. Unparsable numbers sort after parsed
/// ones when ascending.
pub fn sort_deals<'a>(deals: Vec<&'a Deal>, sort: Option<ColumnSort>) -> Vec<&'a Deal> {
    let Some(sort) = sort else {
        return deals;
    };

    deals
        .into_iter()
        .sorted_by(|a, b| {
            let ordering = match sort.column {
                SortColumn::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
                SortColumn::SalePrice => cmp_numbers(a.sale_price_value(), b.sale_price_value()),
                SortColumn::NormalPrice => {
                    cmp_numbers(a.normal_price_value(), b.normal_price_value())
                }
                SortColumn::Savings => cmp_numbers(a.savings_value(), b.savings_value()),
                SortColumn::Rating => cmp_numbers(a.rating_value(), b.rating_value()),
            };
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        })
        .collect()
}

fn cmp_numbers(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE).max(1)
}

pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    let start = (page * PAGE_SIZE).min(items.len());
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// Scroll offset (in lines) that keeps the selected card's row on screen.
pub fn grid_scroll_offset(current: usize, selected: usize, viewport_height: usize) -> usize {
    let top = (selected / GRID_COLUMNS) * CARD_HEIGHT;
    let bottom = top + CARD_HEIGHT;
    if top < current {
        top
    } else if bottom > current + viewport_height {
        bottom.saturating_sub(viewport_height)
    } else {
        current
    }
}

pub fn back_to_top_visible(scroll_offset: usize) -> bool {
    scroll_offset > BACK_TO_TOP_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(id: &str, game_id: &str, title: &str, sale: &str, rating: Option<&str>) -> Deal {
        let mut value = serde_json::json!({
            "dealID": id, "gameID": game_id, "storeID": "1", "title": title,
            "normalPrice": "60.00", "salePrice": sale, "savings": "10.0"
        });
        if let Some(rating) = rating {
            value["dealRating"] = serde_json::json!(rating);
        }
        serde_json::from_value(value).unwrap()
    }

    fn ids(deals: &[&Deal]) -> Vec<String> {
        deals.iter().map(|d| d.deal_id.clone()).collect()
    }

    fn sample() -> Vec<Deal> {
        vec![
            deal("a", "g1", "Celeste", "4.99", Some("9.1")),
            deal("b", "g2", "braid", "n/a", None),
            deal("c", "g3", "Amnesia", "14.99", Some("6.0")),
            deal("d", "g1", "Celeste", "5.49", Some("8.0")),
        ]
    }

    #[test]
    fn test_project_passes_through_when_flag_off() {
        let deals = sample();
        let favorites: FavoriteSet = ["g3"].into_iter().collect();
        assert_eq!(ids(&project(&deals, &favorites, false)), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_project_keeps_favorites_in_order() {
        let deals = sample();
        let favorites: FavoriteSet = ["g3", "g1"].into_iter().collect();
        assert_eq!(ids(&project(&deals, &favorites, true)), ["a", "c", "d"]);
    }

    #[test]
    fn test_project_empty_favorites_yields_nothing() {
        let deals = sample();
        assert!(project(&deals, &FavoriteSet::new(), true).is_empty());
    }

    #[test]
    fn test_project_is_idempotent() {
        let deals = sample();
        let favorites: FavoriteSet = ["g1"].into_iter().collect();
        let once: Vec<Deal> = project(&deals, &favorites, true)
            .into_iter()
            .cloned()
            .collect();
        let twice = project(&once, &favorites, true);
        assert_eq!(ids(&twice), ["a", "d"]);
    }

    #[test]
    fn test_toggle_sort_direction() {
        let first = ColumnSort::toggle(None, SortColumn::Savings);
        assert_eq!(first.direction, SortDirection::Ascending);

        let second = ColumnSort::toggle(Some(first), SortColumn::Savings);
        assert_eq!(second.direction, SortDirection::Descending);

        let other = ColumnSort::toggle(Some(second), SortColumn::Title);
        assert_eq!(other.column, SortColumn::Title);
        assert_eq!(other.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_sort_by_price_numeric_with_unparsable_last() {
        let deals = sample();
        let sorted = sort_deals(
            deals.iter().collect(),
            Some(ColumnSort {
                column: SortColumn::SalePrice,
                direction: SortDirection::Ascending,
            }),
        );
        assert_eq!(ids(&sorted), ["a", "d", "c", "b"]);
    }

    #[test]
    fn test_sort_by_title_is_case_insensitive_and_stable() {
        let deals = sample();
        let sorted = sort_deals(
            deals.iter().collect(),
            Some(ColumnSort {
                column: SortColumn::Title,
                direction: SortDirection::Ascending,
            }),
        );
        assert_eq!(ids(&sorted), ["c", "b", "a", "d"]);
    }

    #[test]
    fn test_sort_by_rating_descending() {
        let deals = sample();
        let sorted = sort_deals(
            deals.iter().collect(),
            Some(ColumnSort {
                column: SortColumn::Rating,
                direction: SortDirection::Descending,
            }),
        );
        assert_eq!(ids(&sorted), ["b", "a", "d", "c"]);
    }

    #[test]
    fn test_sort_column_from_digit() {
        assert_eq!(SortColumn::from_digit('1'), Some(SortColumn::Title));
        assert_eq!(SortColumn::from_digit('5'), Some(SortColumn::Rating));
        assert_eq!(SortColumn::from_digit('0'), None);
        assert_eq!(SortColumn::from_digit('6'), None);
    }

    #[test]
    fn test_pagination() {
        let items: Vec<usize> = (0..23).collect();
        assert_eq!(page_count(items.len()), 3);
        assert_eq!(page_count(0), 1);
        assert_eq!(page_slice(&items, 0).len(), PAGE_SIZE);
        assert_eq!(page_slice(&items, 2), &[20, 21, 22]);
        assert!(page_slice(&items, 5).is_empty());
    }

    #[test]
    fn test_grid_scroll_follows_selection() {
        // Third row starts at line 16 and ends at 24; a 20-line viewport must scroll.
        let offset = grid_scroll_offset(0, 7, 20);
        assert_eq!(offset, 4);
        assert!(!back_to_top_visible(offset));

        let offset = grid_scroll_offset(offset, 13, 20);
        assert_eq!(offset, 20);
        assert!(back_to_top_visible(offset));

        assert_eq!(grid_scroll_offset(offset, 0, 20), 0);
    }
}
