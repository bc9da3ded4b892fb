//! Presentation: blits the visible surface into the real canvas.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It receives a read-only view of the
//! pixel surface and produces pixels on screen — it never mutates engine
//! state. All fallible Canvas2D calls propagate errors via
//! `Result<(), JsValue>`; the top-level caller ([`crate::engine::Engine`])
//! logs and drops them.

use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::surface::Surface;

/// Fetch the element's 2D context. `None` covers both a refused request and
/// a context of an unexpected type.
#[must_use]
pub fn context_of(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    let object = canvas.get_context("2d").unwrap_or(None)?;
    match object.dyn_into::<CanvasRenderingContext2d>() {
        Ok(ctx) => Some(ctx),
        Err(_) => None,
    }
}

/// Copy the surface's pixels into the context, top-left aligned.
///
/// # Errors
///
/// Returns `Err` if the `ImageData` construction or the blit fails.
pub fn draw(ctx: &CanvasRenderingContext2d, surface: &Surface) -> Result<(), JsValue> {
    if surface.width() == 0 || surface.height() == 0 {
        return Ok(());
    }

    let bytes: Vec<u8> = surface
        .pixels()
        .iter()
        .flat_map(|px| px.to_le_bytes())
        .collect();
    let image =
        ImageData::new_with_u8_clamped_array_and_sh(Clamped(&bytes), surface.width(), surface.height())?;
    ctx.put_image_data(&image, 0.0, 0.0)
}
