#![allow(clippy::float_cmp)]

use super::*;
use crate::surface::Surface;

const VIEWPORT_H: f64 = 1000.0;
const HALF: f64 = 35.0;

fn snap() -> Snapshot {
    Surface::new(4, 4).snapshot()
}

/// Start a drag owned by pointer 1, grabbing the control at its top edge.
fn dragging() -> ClearGesture {
    let mut g = ClearGesture::new();
    assert!(g.begin(1, 90.0, 90.0, snap()));
    g
}

// =============================================================
// Phase transitions
// =============================================================

#[test]
fn starts_idle() {
    let g = ClearGesture::new();
    assert_eq!(g.phase(), ClearPhase::Idle);
    assert!(g.is_idle());
    assert!(g.saved().is_none());
}

#[test]
fn begin_enters_dragging_and_saves_snapshot() {
    let g = dragging();
    assert_eq!(g.phase(), ClearPhase::Dragging);
    assert!(g.saved().is_some());
}

#[test]
fn begin_is_rejected_while_dragging() {
    let mut g = dragging();
    assert!(!g.begin(2, 90.0, 90.0, snap()));
    assert_eq!(g.phase(), ClearPhase::Dragging);
}

#[test]
fn begin_is_rejected_while_settling() {
    let mut g = dragging();
    g.release(1, 900.0, VIEWPORT_H, 0.0);
    assert!(!g.begin(1, 90.0, 90.0, snap()));
}

#[test]
fn release_past_threshold_commits() {
    let mut g = dragging();
    assert_eq!(g.release(1, 900.0, VIEWPORT_H, 0.0), Some(Resolution::Committed));
    assert_eq!(g.phase(), ClearPhase::Committing);
}

#[test]
fn release_below_threshold_cancels() {
    let mut g = dragging();
    assert_eq!(g.release(1, 500.0, VIEWPORT_H, 0.0), Some(Resolution::Cancelled));
    assert_eq!(g.phase(), ClearPhase::Cancelling);
}

#[test]
fn threshold_boundary_is_inclusive() {
    // Exactly 85% of the viewport height commits.
    let mut g = dragging();
    assert_eq!(g.release(1, 850.0, VIEWPORT_H, 0.0), Some(Resolution::Committed));
}

#[test]
fn just_below_threshold_cancels() {
    let mut g = dragging();
    assert_eq!(g.release(1, 849.9, VIEWPORT_H, 0.0), Some(Resolution::Cancelled));
}

#[test]
fn abort_mid_drag_equals_sub_threshold_release() {
    let mut g = dragging();
    assert_eq!(g.abort(1, 0.0), Some(Resolution::Cancelled));
    assert_eq!(g.phase(), ClearPhase::Cancelling);
}

// =============================================================
// Ownership
// =============================================================

#[test]
fn drag_from_other_pointer_is_ignored() {
    let mut g = dragging();
    assert!(g.drag(2, 400.0, VIEWPORT_H, HALF).is_none());
}

#[test]
fn release_from_other_pointer_is_ignored() {
    let mut g = dragging();
    assert!(g.release(2, 900.0, VIEWPORT_H, 0.0).is_none());
    assert_eq!(g.phase(), ClearPhase::Dragging);
}

#[test]
fn abort_from_other_pointer_is_ignored() {
    let mut g = dragging();
    assert!(g.abort(2, 0.0).is_none());
}

#[test]
fn drag_while_idle_is_ignored() {
    let mut g = ClearGesture::new();
    assert!(g.drag(1, 400.0, VIEWPORT_H, HALF).is_none());
}

#[test]
fn release_while_idle_is_ignored() {
    let mut g = ClearGesture::new();
    assert!(g.release(1, 900.0, VIEWPORT_H, 0.0).is_none());
}

// =============================================================
// Drag geometry
// =============================================================

#[test]
fn downward_drag_moves_the_control() {
    let mut g = dragging();
    let update = g.drag(1, 300.0, VIEWPORT_H, HALF).unwrap();
    let movement = update.movement.unwrap();
    // Grabbed at the top edge, so the control top tracks the pointer.
    assert_eq!(movement.control_top, 300.0);
    assert_eq!(movement.clear_to_y, 300.0 + HALF);
    assert!(!update.delete_ready);
}

#[test]
fn grab_offset_is_preserved() {
    let mut g = ClearGesture::new();
    // Control top at 90, grabbed 25px into the control.
    g.begin(1, 115.0, 90.0, snap());
    let update = g.drag(1, 415.0, VIEWPORT_H, HALF).unwrap();
    assert_eq!(update.movement.unwrap().control_top, 390.0);
}

#[test]
fn upward_drag_does_not_move_the_control() {
    let mut g = dragging();
    let update = g.drag(1, 50.0, VIEWPORT_H, HALF).unwrap();
    assert!(update.movement.is_none());
}

#[test]
fn delete_ready_tracks_the_accept_zone() {
    let mut g = dragging();
    assert!(!g.drag(1, 849.0, VIEWPORT_H, HALF).unwrap().delete_ready);
    assert!(g.drag(1, 850.0, VIEWPORT_H, HALF).unwrap().delete_ready);
    // Dragging back out of the zone clears the flag.
    assert!(!g.drag(1, 700.0, VIEWPORT_H, HALF).unwrap().delete_ready);
}

#[test]
fn commit_threshold_scales_with_viewport() {
    assert_eq!(commit_threshold(1000.0), 850.0);
    assert_eq!(commit_threshold(640.0), 544.0);
}

// =============================================================
// Settling
// =============================================================

#[test]
fn commit_settles_after_its_delay() {
    let mut g = dragging();
    g.release(1, 900.0, VIEWPORT_H, 1000.0);
    assert!(g.tick(1000.0).is_none());
    assert!(g.tick(1599.0).is_none());
    assert_eq!(g.tick(1600.0), Some(Resolution::Committed));
    assert!(g.is_idle());
    assert!(g.saved().is_none());
}

#[test]
fn cancel_settles_after_its_delay() {
    let mut g = dragging();
    g.release(1, 100.0, VIEWPORT_H, 1000.0);
    assert!(g.tick(1299.0).is_none());
    assert_eq!(g.tick(1300.0), Some(Resolution::Cancelled));
    assert!(g.is_idle());
}

#[test]
fn tick_fires_once() {
    let mut g = dragging();
    g.release(1, 900.0, VIEWPORT_H, 0.0);
    assert_eq!(g.tick(10_000.0), Some(Resolution::Committed));
    assert!(g.tick(10_000.0).is_none());
}

#[test]
fn tick_while_idle_is_a_no_op() {
    let mut g = ClearGesture::new();
    assert!(g.tick(999_999.0).is_none());
}

#[test]
fn snapshot_is_held_through_settling() {
    // The cancel path restores from the snapshot at release; the gesture only
    // drops it once fully resolved.
    let mut g = dragging();
    g.release(1, 100.0, VIEWPORT_H, 0.0);
    assert!(g.saved().is_some());
    g.tick(300.0);
    assert!(g.saved().is_none());
}

#[test]
fn new_gesture_can_start_after_settling() {
    let mut g = dragging();
    g.release(1, 900.0, VIEWPORT_H, 0.0);
    g.tick(600.0);
    assert!(g.begin(5, 90.0, 90.0, snap()));
}
