//! Property tests for tiling and chunking across arbitrary page splits.

use std::num::NonZeroUsize;

use mosaic_layout::{chunk_rows, tile, Item, Row};
use proptest::prelude::*;

/// Aspect ratios between a tall portrait and a wide panorama.
fn aspect_ratios() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(0.25f32..8.0, 0..80)
}

fn items(ratios: &[f32]) -> Vec<Item> {
    ratios
        .iter()
        .enumerate()
        .map(|(i, ratio)| Item::new(format!("item-{i}"), *ratio).unwrap())
        .collect()
}

/// Splits `items` into pages at the given cut points.
fn paginate(items: Vec<Item>, cuts: &[usize]) -> Vec<Vec<Item>> {
    let mut cuts: Vec<usize> = cuts.iter().map(|c| c % (items.len() + 1)).collect();
    cuts.sort_unstable();
    let mut pages = Vec::new();
    let mut rest = items;
    let mut consumed = 0;
    for cut in cuts {
        let page: Vec<Item> = rest.drain(..cut - consumed).collect();
        consumed = cut;
        pages.push(page);
    }
    pages.push(rest);
    pages
}

/// Feeds pages through tile + chunk the way pagination does, returning the
/// emitted sections and whatever is still held back.
fn stream(pages: Vec<Vec<Item>>, threshold: f32, capacity: NonZeroUsize) -> (Vec<Vec<Row>>, Vec<Item>, Vec<Row>) {
    let mut item_remainder = Vec::new();
    let mut row_remainder = Vec::new();
    let mut sections = Vec::new();
    let last = pages.len() - 1;

    for (page_index, page) in pages.into_iter().enumerate() {
        let more = page_index != last;
        let merged: Vec<Item> = std::mem::take(&mut item_remainder).into_iter().chain(page).collect();
        let tiling = tile(merged, threshold, more);
        item_remainder = tiling.remainder;
        let sectioning = chunk_rows(std::mem::take(&mut row_remainder), tiling.rows, capacity, more);
        row_remainder = sectioning.row_remainder;
        sections.extend(sectioning.chunks);
    }

    (sections, item_remainder, row_remainder)
}

proptest! {
    #[test]
    fn non_terminal_rows_meet_threshold(ratios in aspect_ratios(), threshold in 0.5f32..10.0, more in any::<bool>()) {
        let tiling = tile(items(&ratios), threshold, more);
        let count = tiling.rows.len();
        for (i, row) in tiling.rows.iter().enumerate() {
            let terminal = !more && i + 1 == count;
            if !terminal {
                prop_assert!(row.aspect_ratio() >= threshold);
                prop_assert!(row.is_complete());
            }
        }
        if more {
            let held: f32 = tiling.remainder.iter().map(Item::aspect_ratio).sum();
            prop_assert!(held < threshold);
        } else {
            prop_assert!(tiling.remainder.is_empty());
        }
    }

    #[test]
    fn streaming_preserves_every_item_in_order(
        ratios in aspect_ratios(),
        cuts in prop::collection::vec(any::<usize>(), 0..6),
        threshold in 0.5f32..10.0,
        capacity in 1usize..6,
    ) {
        let source = items(&ratios);
        let expected: Vec<String> = source.iter().map(|item| item.id().to_string()).collect();
        let capacity = NonZeroUsize::new(capacity).unwrap();

        let (sections, item_remainder, row_remainder) =
            stream(paginate(source, &cuts), threshold, capacity);

        // The stream ended, so nothing may be held back.
        prop_assert!(item_remainder.is_empty());
        prop_assert!(row_remainder.is_empty());

        let seen: Vec<String> = sections
            .iter()
            .flatten()
            .flat_map(|row| row.ids().map(|id| id.to_string()))
            .collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn only_the_terminal_section_is_short(
        ratios in aspect_ratios(),
        cuts in prop::collection::vec(any::<usize>(), 0..6),
        capacity in 1usize..6,
    ) {
        let capacity = NonZeroUsize::new(capacity).unwrap();
        let (sections, _, _) = stream(paginate(items(&ratios), &cuts), 3.0, capacity);
        let count = sections.len();
        for (i, section) in sections.iter().enumerate() {
            if i + 1 < count {
                prop_assert_eq!(section.len(), capacity.get());
            } else {
                prop_assert!(!section.is_empty() && section.len() <= capacity.get());
            }
        }
    }

    #[test]
    fn mid_stream_nothing_is_lost(
        ratios in aspect_ratios(),
        threshold in 0.5f32..10.0,
        capacity in 1usize..6,
    ) {
        let source = items(&ratios);
        let expected = source.len();
        let capacity = NonZeroUsize::new(capacity).unwrap();

        let tiling = tile(source, threshold, true);
        let held_items = tiling.remainder.len();
        let sectioning = chunk_rows(Vec::new(), tiling.rows, capacity, true);

        let in_sections: usize = sectioning.chunks.iter().flatten().map(Row::len).sum();
        let in_rows: usize = sectioning.row_remainder.iter().map(Row::len).sum();
        prop_assert_eq!(in_sections + in_rows + held_items, expected);
        for chunk in &sectioning.chunks {
            prop_assert_eq!(chunk.len(), capacity.get());
        }
    }
}
