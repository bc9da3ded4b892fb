#![allow(clippy::float_cmp)]

use super::*;

fn red() -> Color {
    Color::new(0xFF, 0, 0)
}

fn blue() -> Color {
    Color::new(0, 0, 0xFF)
}

fn begin_touch(tracker: &mut SessionTracker, id: PointerId, ts: f64) -> bool {
    tracker.begin(id, 0.0, 0.0, red(), PointerKind::Touch, ts)
}

// =============================================================
// PointerKind
// =============================================================

#[test]
fn default_kind_is_touch() {
    assert_eq!(PointerKind::default(), PointerKind::Touch);
}

#[test]
fn touch_and_mouse_share_the_long_debounce() {
    assert_eq!(PointerKind::Touch.color_debounce_ms(), 100.0);
    assert_eq!(PointerKind::Mouse.color_debounce_ms(), 100.0);
}

#[test]
fn pen_debounce_is_shorter() {
    assert!(PointerKind::Pen.color_debounce_ms() < PointerKind::Touch.color_debounce_ms());
}

#[test]
fn pen_skips_capture() {
    assert!(!PointerKind::Pen.wants_capture());
    assert!(PointerKind::Touch.wants_capture());
    assert!(PointerKind::Mouse.wants_capture());
}

#[test]
fn kind_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&PointerKind::Pen).unwrap(), "\"pen\"");
}

// =============================================================
// begin / debounce
// =============================================================

#[test]
fn begin_creates_a_session() {
    let mut t = SessionTracker::new();
    assert!(t.begin(1, 10.0, 20.0, red(), PointerKind::Touch, 0.0));
    let s = t.session(1).unwrap();
    assert_eq!(s.last_x, 10.0);
    assert_eq!(s.last_y, 20.0);
    assert_eq!(s.color, red());
    assert!(s.is_drawing);
}

#[test]
fn begin_is_rejected_inside_touch_debounce() {
    let mut t = SessionTracker::new();
    t.note_color_change(1000.0);
    assert!(!begin_touch(&mut t, 1, 1099.0));
    assert_eq!(t.active_count(), 0);
}

#[test]
fn begin_succeeds_once_touch_debounce_elapses() {
    let mut t = SessionTracker::new();
    t.note_color_change(1000.0);
    assert!(begin_touch(&mut t, 1, 1100.0));
}

#[test]
fn pen_begin_succeeds_inside_touch_window() {
    let mut t = SessionTracker::new();
    t.note_color_change(1000.0);
    // 50ms later: still inside the touch window, past the pen window.
    assert!(t.begin(1, 0.0, 0.0, red(), PointerKind::Pen, 1050.0));
}

#[test]
fn pen_begin_rejected_inside_pen_window() {
    let mut t = SessionTracker::new();
    t.note_color_change(1000.0);
    assert!(!t.begin(1, 0.0, 0.0, red(), PointerKind::Pen, 1010.0));
}

#[test]
fn begin_without_color_change_is_never_debounced() {
    let mut t = SessionTracker::new();
    assert!(begin_touch(&mut t, 1, 0.0));
}

#[test]
fn duplicate_begin_for_live_pointer_is_rejected() {
    let mut t = SessionTracker::new();
    assert!(t.begin(1, 0.0, 0.0, red(), PointerKind::Touch, 0.0));
    assert!(!t.begin(1, 50.0, 50.0, blue(), PointerKind::Touch, 10.0));
    // Original session state is untouched.
    assert_eq!(t.session(1).unwrap().color, red());
}

// =============================================================
// advance
// =============================================================

#[test]
fn advance_returns_previous_position_and_locked_color() {
    let mut t = SessionTracker::new();
    t.begin(1, 10.0, 10.0, red(), PointerKind::Touch, 0.0);
    let step = t.advance(1, 50.0, 50.0, 16.0).unwrap();
    assert_eq!(step.from_x, 10.0);
    assert_eq!(step.from_y, 10.0);
    assert_eq!(step.color, red());
}

#[test]
fn advance_updates_last_position() {
    let mut t = SessionTracker::new();
    t.begin(1, 10.0, 10.0, red(), PointerKind::Touch, 0.0);
    t.advance(1, 50.0, 50.0, 16.0);
    let step = t.advance(1, 60.0, 50.0, 32.0).unwrap();
    assert_eq!(step.from_x, 50.0);
    assert_eq!(step.from_y, 50.0);
}

#[test]
fn advance_without_session_is_none() {
    let mut t = SessionTracker::new();
    assert!(t.advance(7, 1.0, 1.0, 0.0).is_none());
}

#[test]
fn sessions_are_color_isolated() {
    let mut t = SessionTracker::new();
    t.begin(1, 0.0, 0.0, red(), PointerKind::Touch, 0.0);
    t.begin(2, 0.0, 10.0, blue(), PointerKind::Touch, 0.0);

    // Interleave movement; each step carries its own session's color.
    let s1 = t.advance(1, 5.0, 0.0, 8.0).unwrap();
    let s2 = t.advance(2, 5.0, 10.0, 8.0).unwrap();
    let s1b = t.advance(1, 10.0, 0.0, 16.0).unwrap();
    let s2b = t.advance(2, 10.0, 10.0, 16.0).unwrap();
    assert_eq!(s1.color, red());
    assert_eq!(s1b.color, red());
    assert_eq!(s2.color, blue());
    assert_eq!(s2b.color, blue());
}

#[test]
fn sessions_are_position_isolated() {
    let mut t = SessionTracker::new();
    t.begin(1, 0.0, 0.0, red(), PointerKind::Touch, 0.0);
    t.begin(2, 100.0, 100.0, blue(), PointerKind::Touch, 0.0);
    t.advance(1, 10.0, 0.0, 8.0);
    let s2 = t.advance(2, 110.0, 100.0, 8.0).unwrap();
    assert_eq!(s2.from_x, 100.0);
    assert_eq!(s2.from_y, 100.0);
}

// =============================================================
// Speed window
// =============================================================

#[test]
fn first_step_reports_zero_speed() {
    let mut t = SessionTracker::new();
    t.begin(1, 0.0, 0.0, red(), PointerKind::Touch, 0.0);
    let step = t.advance(1, 10.0, 0.0, 10.0).unwrap();
    assert_eq!(step.speed, 0.0);
}

#[test]
fn speed_is_distance_over_window_span() {
    let mut t = SessionTracker::new();
    t.begin(1, 0.0, 0.0, red(), PointerKind::Touch, 0.0);
    t.advance(1, 10.0, 0.0, 10.0); // sample at t=10, d=10
    let step = t.advance(1, 30.0, 0.0, 60.0).unwrap(); // sample at t=60, d=20
    // Window spans 10..60 (50ms) holding distances 10 + 20.
    assert_eq!(step.speed, 30.0 / 50.0);
}

#[test]
fn samples_older_than_window_are_evicted() {
    let mut t = SessionTracker::new();
    t.begin(1, 0.0, 0.0, red(), PointerKind::Touch, 0.0);
    t.advance(1, 1000.0, 0.0, 10.0); // huge early step
    t.advance(1, 1010.0, 0.0, 150.0);
    let step = t.advance(1, 1030.0, 0.0, 200.0).unwrap();
    // The 1000px step at t=10 left the 100ms window; only the 10px and 20px
    // steps at t=150/t=200 remain, spanning 50ms.
    assert_eq!(step.speed, 30.0 / 50.0);
}

#[test]
fn stationary_pointer_reports_zero_speed() {
    let mut t = SessionTracker::new();
    t.begin(1, 5.0, 5.0, red(), PointerKind::Touch, 0.0);
    t.advance(1, 5.0, 5.0, 10.0);
    let step = t.advance(1, 5.0, 5.0, 50.0).unwrap();
    assert_eq!(step.speed, 0.0);
}

// =============================================================
// end / release_all
// =============================================================

#[test]
fn end_removes_the_session() {
    let mut t = SessionTracker::new();
    begin_touch(&mut t, 1, 0.0);
    let ended = t.end(1).unwrap();
    assert_eq!(ended.id, 1);
    assert!(ended.had_capture);
    assert!(!t.is_active(1));
}

#[test]
fn end_is_idempotent() {
    let mut t = SessionTracker::new();
    begin_touch(&mut t, 1, 0.0);
    assert!(t.end(1).is_some());
    assert!(t.end(1).is_none());
    assert!(t.end(42).is_none());
}

#[test]
fn pen_session_reports_no_capture_on_end() {
    let mut t = SessionTracker::new();
    t.begin(1, 0.0, 0.0, red(), PointerKind::Pen, 0.0);
    assert!(!t.end(1).unwrap().had_capture);
}

#[test]
fn release_all_ends_every_session() {
    let mut t = SessionTracker::new();
    begin_touch(&mut t, 1, 0.0);
    begin_touch(&mut t, 2, 0.0);
    t.begin(3, 0.0, 0.0, red(), PointerKind::Pen, 0.0);

    let ended = t.release_all();
    assert_eq!(ended.len(), 3);
    assert_eq!(t.active_count(), 0);
    assert_eq!(
        ended.iter().map(|e| (e.id, e.had_capture)).collect::<Vec<_>>(),
        vec![(1, true), (2, true), (3, false)]
    );
}

#[test]
fn release_all_on_empty_tracker_is_a_no_op() {
    let mut t = SessionTracker::new();
    assert!(t.release_all().is_empty());
}

#[test]
fn advance_after_release_all_is_none() {
    let mut t = SessionTracker::new();
    begin_touch(&mut t, 1, 0.0);
    t.release_all();
    assert!(t.advance(1, 5.0, 5.0, 10.0).is_none());
}
