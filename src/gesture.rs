//! The drag-to-clear gesture: a phase machine for the trash control.
//!
//! Clearing the pad is deliberately a drag, not a tap — a child must pull the
//! control into the accept zone at the bottom of the screen before anything
//! destructive happens. While dragging, the engine previews the erase by
//! clearing the surface down to the control's position; releasing at or past
//! the commit threshold wipes everything, releasing above it restores the
//! saved snapshot and bounces the control home.
//!
//! The machine here is geometry and phases only. It knows nothing about
//! rendering or CSS; the engine translates its outputs into surface mutations
//! and [`crate::engine::Action`]s for the shell. Post-release settling (the
//! page-turn transition after a commit, the bounce after a cancel) is a
//! fire-once deadline resolved by [`ClearGesture::tick`].

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::consts::{CANCEL_SETTLE_MS, COMMIT_SETTLE_MS, COMMIT_THRESHOLD_FRAC};
use crate::session::PointerId;
use crate::surface::Snapshot;

/// Where the gesture currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearPhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The control is being dragged; the surface shows a derived preview.
    Dragging,
    /// Commit confirmed; waiting out the page-turn transition.
    Committing,
    /// Drag abandoned; waiting out the bounce-back.
    Cancelling,
}

/// Pointer Y at or past this line commits. The boundary itself commits.
#[must_use]
pub fn commit_threshold(viewport_height: f64) -> f64 {
    viewport_height * COMMIT_THRESHOLD_FRAC
}

/// What a mid-drag pointer move changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    /// Whether the pointer sits in the accept zone right now.
    pub delete_ready: bool,
    /// New control top and preview extent, when the control actually moved.
    /// Upward drags never move the control, but `delete_ready` still tracks
    /// the raw pointer.
    pub movement: Option<DragMovement>,
}

/// Downward movement of the control during a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragMovement {
    /// Control top in viewport coordinates.
    pub control_top: f64,
    /// Preview boundary: the surface is cleared from its top down to here
    /// (the control's vertical center).
    pub clear_to_y: f64,
}

/// Terminal outcome of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Committed,
    Cancelled,
}

/// The drag-confirm state machine bound to the clear control.
#[derive(Debug, Default)]
pub struct ClearGesture {
    phase: ClearPhase,
    owner: Option<PointerId>,
    start_control_top: f64,
    grab_offset_y: f64,
    saved: Option<Snapshot>,
    deadline: Option<(f64, Resolution)>,
}

impl ClearGesture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> ClearPhase {
        self.phase
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == ClearPhase::Idle
    }

    /// The snapshot captured at drag start, while the gesture holds one.
    #[must_use]
    pub fn saved(&self) -> Option<&Snapshot> {
        self.saved.as_ref()
    }

    /// Start a drag. Only legal from `Idle`; anything else (a second
    /// pointer-down mid-drag, a down during settling) is silently ignored.
    ///
    /// `control_top` is the control's current on-screen top; `pointer_y` the
    /// grabbing pointer's position; `saved` the surface snapshot backing the
    /// live preview.
    pub fn begin(
        &mut self,
        id: PointerId,
        pointer_y: f64,
        control_top: f64,
        saved: Snapshot,
    ) -> bool {
        if self.phase != ClearPhase::Idle {
            return false;
        }
        self.phase = ClearPhase::Dragging;
        self.owner = Some(id);
        self.start_control_top = control_top;
        self.grab_offset_y = pointer_y - control_top;
        self.saved = Some(saved);
        true
    }

    /// Advance the drag to a new pointer position.
    ///
    /// Returns `None` for events that don't belong to the active drag (wrong
    /// phase or a different pointer).
    pub fn drag(
        &mut self,
        id: PointerId,
        pointer_y: f64,
        viewport_height: f64,
        control_half_height: f64,
    ) -> Option<DragUpdate> {
        if self.phase != ClearPhase::Dragging || self.owner != Some(id) {
            return None;
        }
        let delete_ready = pointer_y >= commit_threshold(viewport_height);
        let new_top = pointer_y - self.grab_offset_y;
        let movement = (new_top > self.start_control_top).then(|| DragMovement {
            control_top: new_top,
            clear_to_y: new_top + control_half_height,
        });
        Some(DragUpdate { delete_ready, movement })
    }

    /// Resolve the drag on pointer-up. The threshold is evaluated against the
    /// raw pointer Y, not the control's rendered position, so a fast flick
    /// commits even when the visual hasn't caught up.
    pub fn release(
        &mut self,
        id: PointerId,
        pointer_y: f64,
        viewport_height: f64,
        ts_ms: f64,
    ) -> Option<Resolution> {
        if self.phase != ClearPhase::Dragging || self.owner != Some(id) {
            return None;
        }
        if pointer_y >= commit_threshold(viewport_height) {
            self.resolve(Resolution::Committed, ts_ms)
        } else {
            self.resolve(Resolution::Cancelled, ts_ms)
        }
    }

    /// Resolve a pointer-cancel mid-drag. Identical end state to a
    /// sub-threshold release; the control must never stick half-dragged.
    pub fn abort(&mut self, id: PointerId, ts_ms: f64) -> Option<Resolution> {
        if self.phase != ClearPhase::Dragging || self.owner != Some(id) {
            return None;
        }
        self.resolve(Resolution::Cancelled, ts_ms)
    }

    fn resolve(&mut self, resolution: Resolution, ts_ms: f64) -> Option<Resolution> {
        let (phase, settle_ms) = match resolution {
            Resolution::Committed => (ClearPhase::Committing, COMMIT_SETTLE_MS),
            Resolution::Cancelled => (ClearPhase::Cancelling, CANCEL_SETTLE_MS),
        };
        self.phase = phase;
        self.owner = None;
        self.deadline = Some((ts_ms + settle_ms, resolution));
        Some(resolution)
    }

    /// Fire the settle deadline if due, returning how the gesture resolved.
    /// The gesture drops its snapshot and returns to `Idle` here.
    pub fn tick(&mut self, ts_ms: f64) -> Option<Resolution> {
        let (deadline, resolution) = self.deadline?;
        if ts_ms < deadline {
            return None;
        }
        self.deadline = None;
        self.saved = None;
        self.phase = ClearPhase::Idle;
        Some(resolution)
    }
}
