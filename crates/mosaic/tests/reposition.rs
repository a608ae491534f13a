use std::num::NonZeroUsize;

use mosaic::{GalleryConfig, LayoutOptions, LayoutOptionsUpdate, SectionIndex};
use mosaic_testing::prelude::*;

fn rule(margin: f32) -> GalleryTestRule<u32> {
    let config = GalleryConfig::new(0)
        .with_options(LayoutOptions::new(2.0, margin).unwrap())
        .with_rows_per_section(NonZeroUsize::new(1).unwrap());
    let mut rule = GalleryTestRule::new(config);
    rule.attach(100.0, 40.0);
    rule.respond(square_page("a", 4, None));
    // Swallow the observer's initial measurement.
    rule.resize(100.0);
    rule
}

fn placements(rule: &GalleryTestRule<u32>) -> usize {
    rule.host()
        .calls()
        .iter()
        .filter(|call| matches!(call, HostCall::PlaceSection { .. }))
        .count()
}

#[test]
fn test_resize_relays_every_section() {
    let mut rule = rule(0.0);
    let rows_before: Vec<Vec<String>> = rule
        .gallery()
        .sections()
        .iter()
        .map(|section| section.item_ids().map(|id| id.to_string()).collect())
        .collect();

    rule.resize(200.0);
    assert_eq!(rule.gallery().width(), 100.0);
    assert!(rule.advance_frame());

    let sections = rule.gallery().sections();
    assert_eq!(rule.gallery().width(), 200.0);
    assert_eq!(sections[0].height(), 100.0);
    assert_eq!(sections[1].top(), 100.0);
    assert_eq!(sections[1].tiles()[1].frame.x, 100.0);
    assert_eq!(rule.gallery().content_height(), 200.0);
    assert_eq!(rule.host().content_height(), 200.0);
    assert_eq!(placements(&rule), 2);

    let rows_after: Vec<Vec<String>> = sections
        .iter()
        .map(|section| section.item_ids().map(|id| id.to_string()).collect())
        .collect();
    assert_eq!(rows_before, rows_after);
    assert_eq!(rule.host().fetch_count(), 1);
}

#[test]
fn test_resizes_before_a_frame_coalesce() {
    let mut rule = rule(0.0);

    rule.resize(150.0);
    rule.resize(200.0);
    assert_eq!(rule.host().frame_requests(), 1);

    assert!(rule.advance_frame());
    assert!(!rule.advance_frame());
    assert_eq!(rule.gallery().width(), 200.0);
    assert_eq!(placements(&rule), 2);
}

#[test]
fn test_same_width_is_a_noop() {
    let mut rule = rule(0.0);

    rule.resize(100.0);
    assert!(rule.advance_frame());

    assert_eq!(placements(&rule), 0);
    assert_eq!(rule.host().last_scroll_target(), None);
}

#[test]
fn test_active_section_is_scrolled_back_into_view() {
    let mut rule = rule(0.0);
    rule.scroll_to(60.0);
    assert_eq!(rule.gallery().active_section(), SectionIndex::new(1));

    rule.resize(50.0);
    rule.advance_frame();

    assert_eq!(rule.host().last_scroll_target(), Some(SectionIndex::new(1)));
    assert_eq!(rule.gallery().sections()[1].top(), 25.0);
}

#[test]
fn test_width_too_narrow_for_margins_leaves_layout_untouched() {
    let mut rule = rule(3.0);
    let heights: Vec<f32> = rule.gallery().sections().iter().map(|s| s.height()).collect();
    assert_eq!(heights, vec![51.5, 51.5]);

    rule.resize(2.0);
    rule.advance_frame();

    assert_eq!(rule.gallery().width(), 100.0);
    let after: Vec<f32> = rule.gallery().sections().iter().map(|s| s.height()).collect();
    assert_eq!(after, heights);
    assert_eq!(placements(&rule), 0);
    assert_eq!(rule.host().errors().len(), 1);
}

#[test]
fn test_options_change_applies_on_next_reposition() {
    let mut rule = rule(0.0);
    rule.gallery_mut()
        .update_options(LayoutOptionsUpdate::new().margin(10.0))
        .unwrap();
    assert_eq!(rule.gallery().sections()[0].height(), 50.0);

    rule.resize(210.0);
    rule.advance_frame();

    // (210 - 10) / 2 + 10
    assert_eq!(rule.gallery().sections()[0].height(), 110.0);
}

#[test]
fn test_resizing_back_restores_geometry() {
    let mut rule = rule(3.0);
    let geometry = |rule: &GalleryTestRule<u32>| -> Vec<(f32, f32)> {
        rule.gallery()
            .sections()
            .iter()
            .map(|section| (section.top(), section.height()))
            .collect()
    };
    let before = geometry(&rule);

    rule.resize(260.0);
    rule.advance_frame();
    assert_ne!(geometry(&rule), before);

    rule.resize(100.0);
    rule.advance_frame();
    assert_eq!(geometry(&rule), before);
}
