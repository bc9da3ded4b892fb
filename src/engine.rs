//! The drawing engine: all pad logic, plus the browser-facing wrapper.
//!
//! [`EngineCore`] owns the whole state of one drawing surface — pixel
//! surfaces, pointer sessions, undo history, and the clear gesture — and is
//! pure Rust, testable natively. Input handlers return [`Action`]s for the
//! host shell to process: sound cues, undo-button state, clear-control
//! visuals. One core per surface; there is no cross-instance state.
//!
//! [`Engine`] wraps a core around an [`HtmlCanvasElement`]. It services the
//! pointer-capture and render actions itself and passes everything else
//! through to the shell.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::color::Color;
use crate::consts::{
    ACCEPT_ZONE_FRAC, CONTROL_HALF_HEIGHT_PX, CONTROL_TOP_LANDSCAPE_PX, CONTROL_TOP_PORTRAIT_PX,
};
use crate::gesture::{ClearGesture, Resolution};
use crate::present;
use crate::session::{EndedSession, PointerId, PointerKind, SessionTracker};
use crate::surface::SurfaceSet;
use crate::undo::UndoStack;

/// Actions returned from input handlers for the host to process.
///
/// Serializable so a JS shell can consume them as plain objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// A stroke moved; `speed` is in pixels per millisecond. Feeds the sound
    /// collaborator (see [`crate::sound::SoundPlan`]).
    StrokeActivity { speed: f64 },
    /// A stroke (or all strokes) ended; halt the pencil sound.
    StrokeEnded,
    /// Undo availability flipped; enable/disable the undo button.
    UndoStateChanged { can_undo: bool },
    /// Claim exclusive event delivery for this pointer on the surface.
    CapturePointer { id: PointerId },
    /// Release a previously claimed pointer.
    ReleasePointer { id: PointerId },
    /// Reveal the accept-zone indicator at the bottom of the viewport.
    ShowAcceptZone { height_px: f64 },
    HideAcceptZone,
    /// Move the clear control to this top offset, with no transition.
    MoveControl { top_px: f64 },
    /// Toggle the control's about-to-delete styling.
    SetDeleteReady { ready: bool },
    /// Animate the control back to its resting offset with the bounce easing.
    BounceControlHome { top_px: f64 },
    /// Snap the control back to its resting offset (post-commit, and after
    /// orientation changes).
    ResetControl { top_px: f64 },
    /// A clear drag began; drawing is suspended.
    ClearStarted,
    /// The clear committed; run the page-turn transition.
    ClearCommitted,
    /// The visible surface changed; repaint.
    RenderNeeded,
}

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser
/// dependencies.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub surfaces: SurfaceSet,
    pub sessions: SessionTracker,
    pub undo: UndoStack,
    pub gesture: ClearGesture,
    pub color: Color,
    pub viewport_width: f64,
    pub viewport_height: f64,
    last_portrait: Option<bool>,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Viewport ---

    /// Update viewport dimensions, recompositing the surfaces through the
    /// backing store so no drawing is lost to the resize.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport_width = width;
        self.viewport_height = height;
        self.surfaces.resize(to_px(width), to_px(height));

        let portrait = height >= width;
        let flipped = self.last_portrait.is_some_and(|last| last != portrait);
        self.last_portrait = Some(portrait);

        let mut actions = vec![Action::RenderNeeded];
        if flipped && self.gesture.is_idle() {
            actions.push(Action::ResetControl { top_px: self.resting_control_top() });
        }
        actions
    }

    /// The clear control's resting top offset for the current orientation.
    #[must_use]
    pub fn resting_control_top(&self) -> f64 {
        if self.viewport_height >= self.viewport_width {
            CONTROL_TOP_PORTRAIT_PX
        } else {
            CONTROL_TOP_LANDSCAPE_PX
        }
    }

    // --- Color ---

    /// Set the current color, opening the debounce window that keeps the
    /// palette tap itself from starting a stray stroke. Sessions already in
    /// flight keep their locked color.
    pub fn set_color(&mut self, color: Color, ts_ms: f64) {
        self.color = color;
        self.sessions.note_color_change(ts_ms);
    }

    #[must_use]
    pub fn current_color(&self) -> Color {
        self.color
    }

    // --- Drawing input ---

    /// Pointer-down on the drawing surface: start a session in the current
    /// color and push an undo snapshot of the surface as it stands.
    ///
    /// No-ops while a clear gesture is active or inside the color-change
    /// debounce window.
    pub fn pointer_down(
        &mut self,
        id: PointerId,
        x: f64,
        y: f64,
        kind: PointerKind,
        ts_ms: f64,
    ) -> Vec<Action> {
        if !self.gesture.is_idle() {
            return Vec::new();
        }
        if !self.sessions.begin(id, x, y, self.color, kind, ts_ms) {
            return Vec::new();
        }

        self.undo.push(self.surfaces.visible().snapshot());
        let mut actions = vec![Action::UndoStateChanged { can_undo: true }];
        if kind.wants_capture() {
            actions.push(Action::CapturePointer { id });
        }
        actions
    }

    /// Pointer-move: render one segment in the session's locked color.
    pub fn pointer_move(&mut self, id: PointerId, x: f64, y: f64, ts_ms: f64) -> Vec<Action> {
        let Some(step) = self.sessions.advance(id, x, y, ts_ms) else {
            return Vec::new();
        };
        self.surfaces
            .visible_mut()
            .draw_segment(step.from_x, step.from_y, x, y, step.color);
        vec![
            Action::StrokeActivity { speed: step.speed },
            Action::RenderNeeded,
        ]
    }

    /// Pointer-up on the drawing surface. Idempotent.
    pub fn pointer_up(&mut self, id: PointerId) -> Vec<Action> {
        self.sessions.end(id).map_or_else(Vec::new, |ended| end_actions(&[ended]))
    }

    /// Pointer-cancel is handled identically to pointer-up: the session and
    /// any capture must never leak.
    pub fn pointer_cancel(&mut self, id: PointerId) -> Vec<Action> {
        self.pointer_up(id)
    }

    /// Force-end every drawing session. External controls call this before
    /// claiming pointer focus.
    pub fn release_all_sessions(&mut self) -> Vec<Action> {
        end_actions(&self.sessions.release_all())
    }

    // --- Undo ---

    /// Pop the most recent snapshot and overwrite both surfaces with it.
    /// Returns `false` (and does nothing) when there is nothing to undo.
    ///
    /// Rejected while a clear gesture is active: the visible surface is a
    /// derived preview then, and a restore would consume history against
    /// pixels the gesture is about to overwrite.
    pub fn undo(&mut self) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }
        let Some(snapshot) = self.undo.pop() else {
            return false;
        };
        self.surfaces.restore_everywhere(&snapshot);
        true
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    // --- Clear gesture ---

    /// Pointer-down on the clear control: suspend all drawing, snapshot the
    /// surface for the live preview, and reveal the accept zone.
    ///
    /// `control_top` is the control's current on-screen top offset.
    pub fn clear_pointer_down(
        &mut self,
        id: PointerId,
        pointer_y: f64,
        control_top: f64,
    ) -> Vec<Action> {
        if !self.gesture.is_idle() {
            return Vec::new();
        }

        // Drawing and clearing never interleave: every open path is closed
        // before the destructive preview can begin.
        let mut actions = self.release_all_sessions();
        let saved = self.surfaces.visible().snapshot();
        self.gesture.begin(id, pointer_y, control_top, saved);

        actions.push(Action::ClearStarted);
        actions.push(Action::ShowAcceptZone {
            height_px: self.viewport_height * ACCEPT_ZONE_FRAC,
        });
        actions
    }

    /// Pointer-move during a clear drag: track the accept zone and preview
    /// the erase down to the control's center.
    pub fn clear_pointer_move(&mut self, id: PointerId, pointer_y: f64) -> Vec<Action> {
        let Some(update) = self.gesture.drag(
            id,
            pointer_y,
            self.viewport_height,
            CONTROL_HALF_HEIGHT_PX,
        ) else {
            return Vec::new();
        };

        let mut actions = vec![Action::SetDeleteReady { ready: update.delete_ready }];
        if let Some(movement) = update.movement {
            if let Some(saved) = self.gesture.saved() {
                let visible = self.surfaces.visible_mut();
                visible.restore(saved);
                visible.clear_top(to_px(movement.clear_to_y.max(0.0)));
            }
            actions.push(Action::MoveControl { top_px: movement.control_top });
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Pointer-up ending a clear drag: commit at or past the threshold,
    /// cancel below it. The raw pointer Y decides, not the control's
    /// rendered position.
    pub fn clear_pointer_up(&mut self, id: PointerId, pointer_y: f64, ts_ms: f64) -> Vec<Action> {
        let resolution = self.gesture.release(id, pointer_y, self.viewport_height, ts_ms);
        self.resolve_clear(resolution)
    }

    /// Pointer-cancel during a clear drag resolves exactly like a release
    /// below the threshold.
    pub fn clear_pointer_cancel(&mut self, id: PointerId, ts_ms: f64) -> Vec<Action> {
        let resolution = self.gesture.abort(id, ts_ms);
        self.resolve_clear(resolution)
    }

    fn resolve_clear(&mut self, resolution: Option<Resolution>) -> Vec<Action> {
        let mut actions = match resolution {
            None => return Vec::new(),
            Some(Resolution::Committed) => {
                // All-or-nothing: the full surface and the backing store,
                // never just the previewed region.
                self.surfaces.clear_all();
                self.undo.reset();
                vec![
                    Action::UndoStateChanged { can_undo: false },
                    Action::ClearCommitted,
                    Action::StrokeEnded,
                ]
            }
            Some(Resolution::Cancelled) => {
                if let Some(saved) = self.gesture.saved() {
                    self.surfaces.visible_mut().restore(saved);
                }
                vec![Action::BounceControlHome { top_px: self.resting_control_top() }]
            }
        };
        actions.insert(0, Action::SetDeleteReady { ready: false });
        actions.insert(0, Action::HideAcceptZone);
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Timers ---

    /// Fire any due deferred work. The shell calls this from its frame loop;
    /// all deadlines are driven by these timestamps, never a wall clock.
    pub fn tick(&mut self, ts_ms: f64) -> Vec<Action> {
        match self.gesture.tick(ts_ms) {
            Some(Resolution::Committed) => {
                vec![Action::ResetControl { top_px: self.resting_control_top() }]
            }
            Some(Resolution::Cancelled) | None => Vec::new(),
        }
    }
}

/// Actions for a batch of ended sessions: release captures, then stop sound.
fn end_actions(ended: &[EndedSession]) -> Vec<Action> {
    let mut actions: Vec<Action> = ended
        .iter()
        .filter(|e| e.had_capture)
        .map(|e| Action::ReleasePointer { id: e.id })
        .collect();
    if !ended.is_empty() {
        actions.push(Action::StrokeEnded);
    }
    actions
}

/// Viewport coordinate to a surface pixel count.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_px(value: f64) -> u32 {
    value.max(0.0).round() as u32
}

/// Fatal configuration errors raised at engine construction. Everything else
/// the engine self-corrects silently.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The canvas element refused to hand out a 2D rendering context.
    /// Drawing on a surface that cannot render is meaningless, so this aborts
    /// initialization rather than guessing.
    #[error("2d rendering context unavailable on the drawing canvas")]
    ContextUnavailable,
}

/// The full drawing engine. Wraps `EngineCore` and owns the browser canvas.
pub struct Engine {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Bind an engine to a canvas element, sizing the surface to the
    /// element's current dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`InitError::ContextUnavailable`] when the element has no 2D
    /// context — a fatal misconfiguration, not a recoverable race.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, InitError> {
        let context = present::context_of(&canvas).ok_or(InitError::ContextUnavailable)?;
        let mut core = EngineCore::new();
        core.set_viewport(f64::from(canvas.width()), f64::from(canvas.height()));
        Ok(Self { canvas, context, core })
    }

    /// Resize the canvas element and the engine's surfaces together.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.canvas.set_width(to_px(width));
        self.canvas.set_height(to_px(height));
        let actions = self.core.set_viewport(width, height);
        self.apply(actions)
    }

    pub fn set_color(&mut self, color: Color, ts_ms: f64) {
        self.core.set_color(color, ts_ms);
    }

    pub fn on_pointer_down(
        &mut self,
        id: PointerId,
        x: f64,
        y: f64,
        kind: PointerKind,
        ts_ms: f64,
    ) -> Vec<Action> {
        let actions = self.core.pointer_down(id, x, y, kind, ts_ms);
        self.apply(actions)
    }

    pub fn on_pointer_move(&mut self, id: PointerId, x: f64, y: f64, ts_ms: f64) -> Vec<Action> {
        let actions = self.core.pointer_move(id, x, y, ts_ms);
        self.apply(actions)
    }

    pub fn on_pointer_up(&mut self, id: PointerId) -> Vec<Action> {
        let actions = self.core.pointer_up(id);
        self.apply(actions)
    }

    pub fn on_pointer_cancel(&mut self, id: PointerId) -> Vec<Action> {
        let actions = self.core.pointer_cancel(id);
        self.apply(actions)
    }

    pub fn release_all_sessions(&mut self) -> Vec<Action> {
        let actions = self.core.release_all_sessions();
        self.apply(actions)
    }

    /// Undo the latest stroke. Repaints on success; `false` means nothing to
    /// undo (disable the button, don't report an error).
    pub fn undo(&mut self) -> bool {
        let undone = self.core.undo();
        if undone {
            self.render();
        }
        undone
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.core.can_undo()
    }

    pub fn on_clear_pointer_down(
        &mut self,
        id: PointerId,
        pointer_y: f64,
        control_top: f64,
    ) -> Vec<Action> {
        let actions = self.core.clear_pointer_down(id, pointer_y, control_top);
        self.apply(actions)
    }

    pub fn on_clear_pointer_move(&mut self, id: PointerId, pointer_y: f64) -> Vec<Action> {
        let actions = self.core.clear_pointer_move(id, pointer_y);
        self.apply(actions)
    }

    pub fn on_clear_pointer_up(&mut self, id: PointerId, pointer_y: f64, ts_ms: f64) -> Vec<Action> {
        let actions = self.core.clear_pointer_up(id, pointer_y, ts_ms);
        self.apply(actions)
    }

    pub fn on_clear_pointer_cancel(&mut self, id: PointerId, ts_ms: f64) -> Vec<Action> {
        let actions = self.core.clear_pointer_cancel(id, ts_ms);
        self.apply(actions)
    }

    pub fn tick(&mut self, ts_ms: f64) -> Vec<Action> {
        let actions = self.core.tick(ts_ms);
        self.apply(actions)
    }

    /// Repaint the visible surface into the canvas element.
    pub fn render(&self) {
        if let Err(err) = present::draw(&self.context, self.core.surfaces.visible()) {
            log::warn!("canvas repaint failed: {err:?}");
        }
    }

    /// Service capture and render actions locally; hand the rest to the
    /// shell. Capture calls are advisory — the platform may have already
    /// revoked the pointer, and session isolation doesn't depend on them.
    fn apply(&mut self, actions: Vec<Action>) -> Vec<Action> {
        let mut remaining = Vec::with_capacity(actions.len());
        for action in actions {
            match action {
                Action::CapturePointer { id } => {
                    if let Err(err) = self.canvas.set_pointer_capture(id) {
                        log::debug!("pointer capture refused for {id}: {err:?}");
                    }
                }
                Action::ReleasePointer { id } => {
                    if let Err(err) = self.canvas.release_pointer_capture(id) {
                        log::debug!("pointer capture release refused for {id}: {err:?}");
                    }
                }
                Action::RenderNeeded => self.render(),
                other => remaining.push(other),
            }
        }
        remaining
    }
}
