//! Builders for test items and pages.

use mosaic::{Item, Page};

/// Items with the given aspect ratios, named `{prefix}-{n}`.
///
/// # Panics
/// If any ratio is not a positive finite number.
pub fn items(prefix: &str, aspect_ratios: &[f32]) -> Vec<Item> {
    aspect_ratios
        .iter()
        .enumerate()
        .map(|(n, &ratio)| {
            Item::new(format!("{prefix}-{n}"), ratio).unwrap_or_else(|err| panic!("bad test item: {err}"))
        })
        .collect()
}

/// `count` square items named `{prefix}-{n}`.
pub fn squares(prefix: &str, count: usize) -> Vec<Item> {
    items(prefix, &vec![1.0; count])
}

pub fn page<K>(items: Vec<Item>, next_request_key: Option<K>) -> Page<K> {
    Page::new(items, next_request_key)
}

/// A page of `count` squares followed by `next`.
pub fn square_page<K>(prefix: &str, count: usize, next: Option<K>) -> Page<K> {
    Page::new(squares(prefix, count), next)
}
