//! Streaming row packing.
//!
//! Items arrive page by page. Rows are closed as soon as their aggregate
//! aspect ratio reaches the threshold; the open tail is either handed back
//! as a remainder (more pages may follow) or closed short (end of stream).

use smallvec::SmallVec;

use crate::row::INLINE_ROW_ITEMS;
use crate::{Item, Row};

/// Result of packing a run of items.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tiling {
    /// Closed rows, in item order.
    pub rows: Vec<Row>,

    /// Items of the still-open row, to be prepended to the next page.
    pub remainder: Vec<Item>,
}

/// Packs `items` into justified rows.
///
/// # Arguments
/// * `items` - Items in fetch order (held-back remainder first)
/// * `threshold` - Minimum aggregate aspect ratio of a complete row
/// * `more_follows` - Whether another page may still arrive
///
/// When `more_follows` is true the open tail row is returned in
/// [`Tiling::remainder`]; otherwise it is closed as an incomplete row.
pub fn tile(items: impl IntoIterator<Item = Item>, threshold: f32, more_follows: bool) -> Tiling {
    debug_assert!(threshold > 0.0, "threshold is validated by LayoutOptions");

    let mut rows = Vec::new();
    let mut open: SmallVec<[Item; INLINE_ROW_ITEMS]> = SmallVec::new();
    let mut open_ratio = 0.0_f32;

    for item in items {
        open_ratio += item.aspect_ratio();
        open.push(item);
        if open_ratio >= threshold {
            rows.push(Row::new(std::mem::take(&mut open), true));
            open_ratio = 0.0;
        }
    }

    let remainder = if open.is_empty() {
        Vec::new()
    } else if more_follows {
        open.into_vec()
    } else {
        rows.push(Row::new(open, false));
        Vec::new()
    };

    Tiling { rows, remainder }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemId;

    fn squares(ids: &[&str]) -> Vec<Item> {
        ids.iter().map(|id| Item::new(*id, 1.0).unwrap()).collect()
    }

    fn row_ids(rows: &[Row]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.ids().map(|id| id.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_terminal_short_row_is_emitted() {
        let tiling = tile(squares(&["a", "b", "c", "d", "e"]), 2.0, false);

        assert_eq!(
            row_ids(&tiling.rows),
            vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]]
        );
        assert!(tiling.remainder.is_empty());
        assert!(tiling.rows[0].is_complete());
        assert!(!tiling.rows[2].is_complete());
    }

    #[test]
    fn test_open_row_is_held_back_when_more_follows() {
        let tiling = tile(squares(&["a", "b", "c", "d", "e"]), 2.0, true);

        assert_eq!(row_ids(&tiling.rows), vec![vec!["a", "b"], vec!["c", "d"]]);
        assert_eq!(tiling.remainder.len(), 1);
        assert_eq!(tiling.remainder[0].id(), &ItemId::from("e"));
    }

    #[test]
    fn test_exact_fit_leaves_no_remainder() {
        let tiling = tile(squares(&["a", "b", "c", "d"]), 2.0, true);
        assert_eq!(tiling.rows.len(), 2);
        assert!(tiling.remainder.is_empty());
    }

    #[test]
    fn test_wide_item_closes_row_alone() {
        let items = vec![
            Item::new("pano", 6.0).unwrap(),
            Item::new("a", 1.0).unwrap(),
            Item::new("b", 1.5).unwrap(),
        ];
        let tiling = tile(items, 5.0, true);

        assert_eq!(row_ids(&tiling.rows), vec![vec!["pano"]]);
        assert_eq!(tiling.rows[0].aspect_ratio(), 6.0);
        assert_eq!(tiling.remainder.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tile(Vec::new(), 5.0, true), Tiling::default());
        assert_eq!(tile(Vec::new(), 5.0, false), Tiling::default());
    }

    #[test]
    fn test_remainder_is_repacked_with_next_page() {
        let first = tile(squares(&["a", "b", "c"]), 2.0, true);
        assert_eq!(first.rows.len(), 1);

        let merged = first.remainder.into_iter().chain(squares(&["d"]));
        let second = tile(merged, 2.0, false);
        assert_eq!(row_ids(&second.rows), vec![vec!["c", "d"]]);
    }
}
