//! Pointer sessions: one live drawing state per finger/pen/mouse contact.
//!
//! Each concurrent contact gets its own [`PointerSession`] keyed by the
//! platform pointer id. A session locks in the current color at creation, so
//! palette changes mid-stroke never recolor strokes already in flight, and two
//! fingers drawing in different colors never cross-contaminate. The tracker
//! also owns the color-change debounce that keeps a palette tap from leaking a
//! stray stroke onto the canvas.
//!
//! All timing is event-carried: callers pass the event timestamp in
//! milliseconds (DOM `event.timeStamp` shape). The tracker never reads a
//! wall clock, which keeps debounce and speed behavior deterministic in tests.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::{COLOR_DEBOUNCE_PEN_MS, COLOR_DEBOUNCE_TOUCH_MS, SPEED_WINDOW_MS};

/// Platform pointer identifier, unique per active contact.
pub type PointerId = i32;

/// The kind of input device behind a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Touch,
    /// Stylus input. Pens skip pointer capture (capture interferes with
    /// Apple Pencil event delivery) and get a much shorter color debounce.
    Pen,
    Mouse,
}

impl PointerKind {
    /// Debounce window applied after a color change before this kind of
    /// pointer may start a new session.
    #[must_use]
    pub fn color_debounce_ms(self) -> f64 {
        match self {
            Self::Touch | Self::Mouse => COLOR_DEBOUNCE_TOUCH_MS,
            Self::Pen => COLOR_DEBOUNCE_PEN_MS,
        }
    }

    /// Whether the surface should claim pointer capture for this kind.
    #[must_use]
    pub fn wants_capture(self) -> bool {
        !matches!(self, Self::Pen)
    }
}

/// Live state of one contact currently producing a stroke.
#[derive(Debug, Clone)]
pub struct PointerSession {
    pub last_x: f64,
    pub last_y: f64,
    /// Color locked in at session start. Never re-read from the live palette.
    pub color: Color,
    pub is_drawing: bool,
    pub started_at_ms: f64,
    /// Recent `(timestamp, step distance)` samples inside the rolling window.
    samples: VecDeque<(f64, f64)>,
    captured: bool,
}

impl PointerSession {
    fn new(x: f64, y: f64, color: Color, ts_ms: f64, captured: bool) -> Self {
        Self {
            last_x: x,
            last_y: y,
            color,
            is_drawing: true,
            started_at_ms: ts_ms,
            samples: VecDeque::new(),
            captured,
        }
    }

    /// Record a movement step and return the current speed in px/ms.
    ///
    /// Speed is the sum of step distances inside the rolling window divided by
    /// the window's span. A window with a single sample has no span yet and
    /// reports zero.
    fn record_step(&mut self, distance: f64, ts_ms: f64) -> f64 {
        self.samples.push_back((ts_ms, distance));
        while let Some(&(oldest, _)) = self.samples.front() {
            if ts_ms - oldest > SPEED_WINDOW_MS {
                self.samples.pop_front();
            } else {
                break;
            }
        }

        let span = self.samples.front().map_or(0.0, |&(oldest, _)| ts_ms - oldest);
        if span <= 0.0 {
            return 0.0;
        }
        let total: f64 = self.samples.iter().map(|&(_, d)| d).sum();
        total / span
    }
}

/// Outcome of ending a session, so the caller can release capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndedSession {
    pub id: PointerId,
    pub had_capture: bool,
}

/// Owns every active pointer session. One tracker per drawing surface.
#[derive(Debug, Default)]
pub struct SessionTracker {
    sessions: HashMap<PointerId, PointerSession>,
    last_color_change_ms: Option<f64>,
}

impl SessionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the palette changed the current color at `ts_ms`, opening
    /// the debounce window for new sessions.
    pub fn note_color_change(&mut self, ts_ms: f64) {
        self.last_color_change_ms = Some(ts_ms);
    }

    /// Whether a pointer-down of `kind` at `ts_ms` falls inside the debounce
    /// window that follows a color change.
    #[must_use]
    pub fn is_debounced(&self, kind: PointerKind, ts_ms: f64) -> bool {
        self.last_color_change_ms
            .is_some_and(|changed| ts_ms - changed < kind.color_debounce_ms())
    }

    /// Start a session for `id`, locking in `color`.
    ///
    /// Returns `false` without side effects when suppressed by the debounce
    /// window or when a session for `id` already exists (a down event for a
    /// live contact is a platform duplicate, not a new stroke).
    pub fn begin(
        &mut self,
        id: PointerId,
        x: f64,
        y: f64,
        color: Color,
        kind: PointerKind,
        ts_ms: f64,
    ) -> bool {
        if self.is_debounced(kind, ts_ms) || self.sessions.contains_key(&id) {
            return false;
        }
        self.sessions
            .insert(id, PointerSession::new(x, y, color, ts_ms, kind.wants_capture()));
        true
    }

    /// Advance the session for `id` to `(x, y)`.
    ///
    /// Returns the movement step `(from_x, from_y, color, speed)` to render,
    /// or `None` when no drawing session exists for `id`.
    pub fn advance(&mut self, id: PointerId, x: f64, y: f64, ts_ms: f64) -> Option<MovementStep> {
        let session = self.sessions.get_mut(&id)?;
        if !session.is_drawing {
            return None;
        }
        let from_x = session.last_x;
        let from_y = session.last_y;
        let distance = ((x - from_x).powi(2) + (y - from_y).powi(2)).sqrt();
        let speed = session.record_step(distance, ts_ms);
        session.last_x = x;
        session.last_y = y;
        Some(MovementStep { from_x, from_y, color: session.color, speed })
    }

    /// End the session for `id`. Idempotent; a miss is a no-op, never an error.
    pub fn end(&mut self, id: PointerId) -> Option<EndedSession> {
        self.sessions
            .remove(&id)
            .map(|session| EndedSession { id, had_capture: session.captured })
    }

    /// Force-end every session, returning them so the caller can flush
    /// pointer captures. Used when an external control claims pointer focus.
    pub fn release_all(&mut self) -> Vec<EndedSession> {
        let mut ended: Vec<EndedSession> = self
            .sessions
            .drain()
            .map(|(id, session)| EndedSession { id, had_capture: session.captured })
            .collect();
        ended.sort_by_key(|e| e.id);
        ended
    }

    #[must_use]
    pub fn is_active(&self, id: PointerId) -> bool {
        self.sessions.contains_key(&id)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// The session for `id`, if one is live.
    #[must_use]
    pub fn session(&self, id: PointerId) -> Option<&PointerSession> {
        self.sessions.get(&id)
    }
}

/// One rendered step of a stroke: where it starts, its locked color, and the
/// speed the sound collaborator wants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementStep {
    pub from_x: f64,
    pub from_y: f64,
    pub color: Color,
    pub speed: f64,
}
