//! Shared numeric constants for the splotch-canvas crate.

// ── Strokes ─────────────────────────────────────────────────────

/// Stroke width in surface pixels (round caps and joins).
pub const STROKE_WIDTH_PX: f64 = 8.0;

/// Color every engine starts with until the palette says otherwise.
pub const DEFAULT_COLOR_HEX: &str = "#AB71E1";

// ── Session debounce ────────────────────────────────────────────

/// How long after a color change a finger/mouse pointer-down is suppressed, in ms.
pub const COLOR_DEBOUNCE_TOUCH_MS: f64 = 100.0;

/// Suppression window for pen input, in ms. Pens report at high fidelity and a
/// fast re-stroke after a palette tap must not be swallowed, so this is kept
/// far shorter than the touch window. Tunable.
pub const COLOR_DEBOUNCE_PEN_MS: f64 = 20.0;

// ── Speed sampling ──────────────────────────────────────────────

/// Rolling window over which per-sample distances are summed, in ms.
pub const SPEED_WINDOW_MS: f64 = 100.0;

// ── Undo ────────────────────────────────────────────────────────

/// Maximum retained undo snapshots; pushing past this evicts the oldest.
pub const UNDO_DEPTH: usize = 10;

// ── Clear gesture ───────────────────────────────────────────────

/// Fraction of the viewport height past which a release commits the clear.
/// The boundary itself commits.
pub const COMMIT_THRESHOLD_FRAC: f64 = 0.85;

/// Fraction of the viewport height covered by the accept-zone indicator
/// (the strip below the commit threshold).
pub const ACCEPT_ZONE_FRAC: f64 = 0.15;

/// Clear-control resting offset from the top in portrait, in CSS pixels.
pub const CONTROL_TOP_PORTRAIT_PX: f64 = 90.0;

/// Clear-control resting offset from the top in landscape, in CSS pixels.
pub const CONTROL_TOP_LANDSCAPE_PX: f64 = 20.0;

/// Half the clear control's height; drag previews erase down to its center.
pub const CONTROL_HALF_HEIGHT_PX: f64 = 35.0;

/// Delay before a committed clear settles the control back home, in ms.
/// Covers the page-turn transition the shell runs.
pub const COMMIT_SETTLE_MS: f64 = 600.0;

/// Delay before a cancelled drag settles, in ms. Covers the bounce-back.
pub const CANCEL_SETTLE_MS: f64 = 300.0;

// ── Sound planning ──────────────────────────────────────────────

/// Number of pencil-sound voices the shell ships.
pub const SOUND_VOICES: u32 = 3;

/// Minimum stroke speed that keeps a voice audible, in px/ms.
pub const SOUND_SPEED_THRESHOLD: f64 = 0.15;

/// Quiet period after the last movement before the voice pauses, in ms.
pub const SOUND_PAUSE_DELAY_MS: f64 = 50.0;
