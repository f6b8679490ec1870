//! Integration tests for AccordionController
//!
//! These tests drive the controller against an in-memory page and cover:
//! - Single-open coordination between items
//! - Open-immediately / close-on-finish timing
//! - Reduced motion and missing animation support
//! - Reversing a transition mid-flight

mod common;

use common::FakePage;
use wm_accordion::{
    AccordionController, AccordionOptions, BodyFrame, ItemState, TransitionDirection,
    MIN_CLOSE_DURATION_MS, OPEN_DURATION_MS,
};

fn controller(page: FakePage) -> AccordionController<FakePage> {
    AccordionController::new(page, AccordionOptions::default())
}

/// Complete the item's running transition
fn finish(controller: &mut AccordionController<FakePage>, item: usize) -> bool {
    match controller.active_token(item) {
        Some(token) => controller.finish(item, token),
        None => false,
    }
}

// =============================================================================
// Single-open coordination
// =============================================================================

#[test]
fn test_open_marks_item_open_immediately() {
    let mut accordion = controller(FakePage::new(3));

    accordion.toggle(0);

    assert!(accordion.is_open(0));
    assert!(accordion.host().open[0]);
    assert_eq!(accordion.state(0), Some(ItemState::Opening));

    let transition = accordion.host().last_started(0).unwrap();
    assert_eq!(transition.direction, TransitionDirection::Open);
    assert_eq!(transition.from, BodyFrame::collapsed());
    assert_eq!(transition.to, BodyFrame::expanded(120.0));
    assert_eq!(transition.duration_ms, OPEN_DURATION_MS);

    assert!(finish(&mut accordion, 0));
    assert_eq!(accordion.state(0), Some(ItemState::Open));
    assert_eq!(accordion.host().cleared, vec![0]);
}

#[test]
fn test_opening_one_item_closes_the_other_on_finish() {
    let mut accordion = controller(FakePage::new(3));
    accordion.toggle(1);
    finish(&mut accordion, 1);
    accordion.host_mut().rendered[1] = 120.0;

    accordion.toggle(0);

    // A is open synchronously, B keeps its flag while it closes
    assert!(accordion.is_open(0));
    assert!(accordion.host().open[0]);
    assert_eq!(accordion.state(1), Some(ItemState::Closing));
    assert!(accordion.host().open[1]);

    let closing = accordion.host().last_started(1).unwrap();
    assert_eq!(closing.direction, TransitionDirection::Close);
    assert_eq!(closing.from, BodyFrame::expanded(120.0));
    assert_eq!(closing.to, BodyFrame::collapsed());

    assert!(finish(&mut accordion, 1));
    assert!(!accordion.is_open(1));
    assert!(!accordion.host().open[1]);

    finish(&mut accordion, 0);
    assert_eq!(accordion.open_items().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn test_toggle_open_item_closes_only_that_item() {
    let mut accordion = controller(FakePage::new(2));
    accordion.toggle(0);
    finish(&mut accordion, 0);

    accordion.toggle(0);
    assert_eq!(accordion.state(0), Some(ItemState::Closing));
    assert_eq!(accordion.state(1), Some(ItemState::Closed));
    assert_eq!(accordion.active_count(), 1);

    finish(&mut accordion, 0);
    assert_eq!(accordion.open_items().count(), 0);
}

#[test]
fn test_multi_open_when_single_open_disabled() {
    let options = AccordionOptions {
        single_open: false,
        ..Default::default()
    };
    let mut accordion = AccordionController::new(FakePage::new(2), options);

    accordion.toggle(0);
    accordion.toggle(1);
    finish(&mut accordion, 0);
    finish(&mut accordion, 1);

    assert_eq!(accordion.open_items().collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn test_initially_open_item_is_closed_by_another() {
    let mut page = FakePage::new(2);
    page.open[1] = true;
    page.rendered[1] = 80.0;
    let mut accordion = controller(page);
    assert_eq!(accordion.state(1), Some(ItemState::Open));

    accordion.toggle(0);
    assert_eq!(accordion.state(1), Some(ItemState::Closing));
    finish(&mut accordion, 1);
    assert_eq!(accordion.state(1), Some(ItemState::Closed));
}

// =============================================================================
// Reduced motion and missing support
// =============================================================================

#[test]
fn test_reduced_motion_changes_state_without_transitions() {
    let mut page = FakePage::new(2);
    page.reduced_motion = true;
    let mut accordion = controller(page);

    accordion.toggle(0);
    assert_eq!(accordion.state(0), Some(ItemState::Open));

    accordion.toggle(1);
    assert_eq!(accordion.state(0), Some(ItemState::Closed));
    assert!(!accordion.host().open[0]);
    assert_eq!(accordion.state(1), Some(ItemState::Open));

    accordion.toggle(1);
    assert_eq!(accordion.state(1), Some(ItemState::Closed));

    assert!(accordion.host().started.is_empty());
    assert_eq!(accordion.active_count(), 0);
}

#[test]
fn test_no_animation_support_toggles_synchronously() {
    let mut page = FakePage::new(1);
    page.animations = false;
    let mut accordion = controller(page);

    accordion.toggle(0);
    assert_eq!(accordion.state(0), Some(ItemState::Open));

    accordion.toggle(0);
    assert!(!accordion.is_open(0));
    assert!(!accordion.host().open[0]);
}

#[test]
fn test_item_without_body_toggles_instantly() {
    let mut page = FakePage::new(2);
    page.bodies[0] = false;
    let mut accordion = controller(page);

    accordion.toggle(0);
    assert_eq!(accordion.state(0), Some(ItemState::Open));
    assert!(accordion.host().started.is_empty());

    accordion.toggle(0);
    assert_eq!(accordion.state(0), Some(ItemState::Closed));
    assert!(accordion.host().cleared.is_empty());
}

// =============================================================================
// Interrupted transitions
// =============================================================================

#[test]
fn test_toggle_while_opening_reverses_from_current_height() {
    let mut accordion = controller(FakePage::new(1));
    accordion.toggle(0);
    let first = accordion.active_token(0).unwrap();

    accordion.host_mut().rendered[0] = 40.0;
    accordion.toggle(0);

    assert_eq!(accordion.host().cancelled, vec![(0, first)]);
    assert_eq!(accordion.state(0), Some(ItemState::Closing));
    let closing = accordion.host().last_started(0).unwrap();
    assert!((closing.from.height_px - 40.0).abs() < 0.001);

    // Stale completion of the cancelled open is ignored
    assert!(!accordion.finish(0, first));
    assert_eq!(accordion.state(0), Some(ItemState::Closing));
}

#[test]
fn test_toggle_while_closing_reopens_from_current_height() {
    let mut accordion = controller(FakePage::new(1));
    accordion.toggle(0);
    finish(&mut accordion, 0);
    accordion.host_mut().rendered[0] = 120.0;
    accordion.toggle(0);

    accordion.host_mut().rendered[0] = 30.0;
    accordion.toggle(0);

    assert_eq!(accordion.state(0), Some(ItemState::Opening));
    assert!(accordion.host().open[0]);
    let opening = accordion.host().last_started(0).unwrap();
    assert_eq!(opening.direction, TransitionDirection::Open);
    assert!((opening.from.height_px - 30.0).abs() < 0.001);
    assert!((opening.from.opacity - 0.25).abs() < 0.001);

    finish(&mut accordion, 0);
    assert_eq!(accordion.state(0), Some(ItemState::Open));
}

#[test]
fn test_one_active_transition_per_item() {
    let mut accordion = controller(FakePage::new(1));
    for _ in 0..5 {
        accordion.toggle(0);
        assert_eq!(accordion.active_count(), 1);
    }
    assert_eq!(accordion.host().cancelled.len(), 4);
}

#[test]
fn test_custom_duration_clamps_close() {
    let options = AccordionOptions {
        duration_ms: 100,
        ..Default::default()
    };
    let mut accordion = AccordionController::new(FakePage::new(1), options);

    accordion.toggle(0);
    assert_eq!(accordion.host().last_started(0).unwrap().duration_ms, 100);
    finish(&mut accordion, 0);

    accordion.toggle(0);
    assert_eq!(
        accordion.host().last_started(0).unwrap().duration_ms,
        MIN_CLOSE_DURATION_MS
    );
}

// =============================================================================
// Teardown
// =============================================================================

#[test]
fn test_finish_all_settles_running_transitions() {
    let mut accordion = controller(FakePage::new(3));
    accordion.toggle(1);
    finish(&mut accordion, 1);
    accordion.host_mut().rendered[1] = 120.0;
    accordion.toggle(0);

    let opening = accordion.active_token(0).unwrap();
    let closing = accordion.active_token(1).unwrap();
    assert_eq!(accordion.active_count(), 2);

    accordion.finish_all();

    assert_eq!(accordion.active_count(), 0);
    assert_eq!(accordion.host().cancelled, vec![(0, opening), (1, closing)]);
    assert_eq!(accordion.host().cleared[1..], [0, 1]);

    // Each item lands where its transition was headed
    assert_eq!(accordion.state(0), Some(ItemState::Open));
    assert!(accordion.host().open[0]);
    assert_eq!(accordion.state(1), Some(ItemState::Closed));
    assert!(!accordion.host().open[1]);

    // Late callbacks from the cancelled transitions change nothing
    assert!(!accordion.finish(0, opening));
    assert!(!accordion.finish(1, closing));
}

#[test]
fn test_finish_all_without_transitions_is_a_no_op() {
    let mut accordion = controller(FakePage::new(2));
    accordion.finish_all();

    assert!(accordion.host().cancelled.is_empty());
    assert!(accordion.host().cleared.is_empty());
    assert_eq!(accordion.open_items().count(), 0);
}
