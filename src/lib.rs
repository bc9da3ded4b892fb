//! Drawing and gesture engine for the Splotch scribble pad.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of the drawing surface: tracking concurrent pointer
//! contacts as independent color-locked sessions, rasterizing strokes,
//! keeping a bounded undo history, surviving viewport resizes through an
//! oversized backing surface, and running the drag-to-confirm clear gesture.
//! The host shell is responsible only for wiring DOM events to the engine and
//! reacting to the [`engine::Action`]s it returns (sound playback, control
//! styling, button state).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`surface`] | Pixel surfaces, snapshots, and the backing-store resize lifecycle |
//! | [`session`] | Per-pointer drawing sessions and the color-change debounce |
//! | [`undo`] | Bounded stack of full-surface snapshots |
//! | [`gesture`] | Drag-to-clear state machine |
//! | [`color`] | Hex color values crossing the palette boundary |
//! | [`sound`] | Pencil-sound planning for the shell's audio layer |
//! | [`prefs`] | Stored preferences (sound toggle, version badge) |
//! | [`present`] | Blitting surface pixels into the real canvas |
//! | [`consts`] | Shared numeric constants (stroke width, thresholds, delays) |

pub mod color;
pub mod consts;
pub mod engine;
pub mod gesture;
pub mod prefs;
pub mod present;
pub mod session;
pub mod sound;
pub mod surface;
pub mod undo;
