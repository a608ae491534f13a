use std::num::NonZeroUsize;

use mosaic::{GalleryConfig, LayoutOptions, SectionIndex};
use mosaic_testing::prelude::*;

/// Two squares per row, 50 high at width 100.
fn config(rows_per_section: usize) -> GalleryConfig<u32> {
    GalleryConfig::new(0)
        .with_options(LayoutOptions::new(2.0, 0.0).unwrap())
        .with_rows_per_section(NonZeroUsize::new(rows_per_section).unwrap())
}

fn ids(rule: &GalleryTestRule<u32>, section: usize) -> Vec<String> {
    rule.gallery().sections()[section]
        .item_ids()
        .map(|id| id.to_string())
        .collect()
}

#[test]
fn test_first_fetch_starts_on_construction() {
    let rule = GalleryTestRule::new(config(1));

    assert!(rule.gallery().is_fetching());
    assert_eq!(rule.host().fetch_count(), 1);
    assert_eq!(rule.host().peek_fetch().map(|request| request.key), Some(0));
    assert_eq!(rule.gallery().stats().fetches_started, 1);
}

#[test]
fn test_refetches_until_viewport_is_filled() {
    let mut rule = GalleryTestRule::new(config(1));
    rule.attach(100.0, 120.0);

    rule.respond(square_page("a", 4, Some(1)));
    assert_eq!(rule.gallery().content_height(), 100.0);
    assert_eq!(rule.host().peek_fetch().map(|request| request.key), Some(1));

    rule.respond(square_page("b", 4, Some(2)));
    assert_eq!(rule.gallery().sections().len(), 4);
    assert_eq!(rule.gallery().content_height(), 200.0);
    assert_eq!(rule.host().content_height(), 200.0);
    assert!(!rule.gallery().is_fetching());
    assert_eq!(rule.host().fetch_count(), 2);
    assert_eq!(rule.gallery().request_key(), Some(&2));
}

#[test]
fn test_content_height_equal_to_container_still_refetches() {
    let mut rule = GalleryTestRule::new(config(1));
    rule.attach(100.0, 100.0);

    rule.respond(square_page("a", 4, Some(1)));

    assert!(rule.gallery().is_fetching());
    assert_eq!(rule.host().fetch_count(), 2);
}

#[test]
fn test_short_tail_is_held_back_until_next_page() {
    let mut rule = GalleryTestRule::new(config(5));
    rule.attach(100.0, 40.0);

    rule.respond(square_page("a", 3, Some(1)));

    // One complete row is held as a short section, the third item as an
    // open row. Nothing was mounted, so the next page is fetched at once.
    assert!(rule.gallery().sections().is_empty());
    assert_eq!(rule.gallery().row_remainder().len(), 1);
    assert_eq!(rule.gallery().item_remainder().len(), 1);
    assert_eq!(rule.host().peek_fetch().map(|request| request.key), Some(1));

    rule.respond(square_page("b", 7, None));

    assert_eq!(rule.gallery().sections().len(), 1);
    assert!(rule.gallery().row_remainder().is_empty());
    assert!(rule.gallery().item_remainder().is_empty());
    assert_eq!(
        ids(&rule, 0),
        vec!["a-0", "a-1", "a-2", "b-0", "b-1", "b-2", "b-3", "b-4", "b-5", "b-6"]
    );
    assert_eq!(rule.gallery().request_key(), None);
}

#[test]
fn test_final_short_section_and_row_are_emitted() {
    let mut rule = GalleryTestRule::new(config(5));
    rule.attach(100.0, 40.0);

    rule.respond(square_page("a", 3, None));

    let sections = rule.gallery().sections();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].rows().len(), 2);
    assert!(!sections[0].rows()[1].is_complete());

    // The lone square of the last row keeps the row height of its neighbours.
    let last = &sections[0].tiles()[2];
    assert_eq!(last.frame.width, 50.0);
    assert_eq!(last.frame.height, 50.0);
    assert_eq!(sections[0].height(), 100.0);
}

#[test]
fn test_capacity_one_emits_every_row() {
    let mut rule = GalleryTestRule::new(config(1));
    rule.attach(100.0, 40.0);

    rule.respond(square_page("a", 4, None));

    let sections = rule.gallery().sections();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[1].top(), 50.0);
    assert_eq!(ids(&rule, 1), vec!["a-2", "a-3"]);
}

#[test]
fn test_exhausted_stream_never_fetches_again() {
    let mut rule = GalleryTestRule::new(config(1));
    rule.attach(100.0, 400.0);

    rule.respond(square_page("a", 4, None));

    assert!(!rule.gallery().is_fetching());
    assert!(!rule.load_more());
    rule.scroll_to(0.0);
    assert_eq!(rule.host().fetch_count(), 1);
}

#[test]
fn test_last_section_entering_viewport_fetches_next_page() {
    let mut rule = GalleryTestRule::new(config(1));
    rule.attach(100.0, 40.0);
    rule.respond(square_page("a", 4, Some(1)));
    assert!(!rule.gallery().is_fetching());

    rule.scroll_to(0.0);
    assert_eq!(rule.host().fetch_count(), 1);

    rule.scroll_to(60.0);
    assert_eq!(rule.gallery().active_section(), SectionIndex::new(1));
    assert_eq!(rule.host().fetch_count(), 2);
    assert_eq!(rule.host().peek_fetch().map(|request| request.key), Some(1));

    rule.respond(square_page("b", 4, None));
    assert_eq!(rule.host().mounted_sections(rule.gallery().root()).len(), 4);
    assert_eq!(rule.host().observed_sections(rule.gallery().root()).len(), 4);
}

#[test]
fn test_at_most_one_fetch_in_flight() {
    let mut rule = GalleryTestRule::new(config(1));
    rule.attach(100.0, 40.0);

    assert!(!rule.load_more());
    assert!(!rule.load_more());
    assert_eq!(rule.host().pending_fetches(), 1);
}

#[test]
fn test_sections_are_stacked_without_gaps() {
    let mut rule = GalleryTestRule::new(GalleryConfig::new(0));
    rule.attach(300.0, 200.0);

    rule.respond(page(items("a", &[1.5, 0.75, 1.0, 2.0, 0.5, 1.25, 1.0, 1.0, 3.0, 0.8]), None));

    let sections = rule.gallery().sections();
    let mut top = 0.0;
    for section in sections {
        assert_eq!(section.top(), top);
        assert!(section.height() > 0.0);
        top = section.bottom();
    }
    assert_eq!(rule.gallery().content_height(), top);
}
