//! Pixel surfaces: the visible canvas, its oversized backing store, and the
//! immediate-mode segment rasterizer.
//!
//! A [`Surface`] is an owned RGBA buffer; nothing here touches the browser, so
//! every drawing and lifecycle rule is unit-testable natively. The browser
//! presentation layer ([`crate::present`]) blits the visible surface's bytes
//! into the real canvas after the engine reports a render is needed.
//!
//! [`SurfaceSet`] pairs the visible surface with a lazily created backing
//! surface sized to the largest square seen across all resizes. Every resize
//! flushes visible → backing and redraws visible ← backing, so strokes survive
//! any sequence of viewport/orientation changes without clipping. A naive
//! recreate-at-new-size would truncate content the moment the viewport
//! shrinks; the backing store is what makes portrait↔landscape swaps lossless.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::color::Color;
use crate::consts::STROKE_WIDTH_PX;

/// A full pixel copy of a surface, used for undo and gesture preview/restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

/// An owned RGBA pixel buffer. Pixel `0` is fully transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Surface {
    /// Create a transparent surface. Zero-sized surfaces are valid and inert.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize)],
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read one pixel. Out-of-bounds reads return transparent.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Raw pixel words, row-major. Little-endian RGBA byte order per word.
    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Whether every pixel is transparent.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&px| px == 0)
    }

    /// Wipe the whole surface to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Wipe the top `rows` rows to transparent. Rows past the bottom edge are
    /// ignored, so callers can pass unclamped drag geometry.
    pub fn clear_top(&mut self, rows: u32) {
        let rows = rows.min(self.height) as usize;
        self.pixels[..rows * (self.width as usize)].fill(0);
    }

    /// Capture a full pixel copy.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }

    /// Overwrite this surface from a snapshot, clearing first so stale pixels
    /// never bleed through when dimensions differ. The overlapping region is
    /// copied top-left aligned.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.clear();
        let w = self.width.min(snapshot.width) as usize;
        let h = self.height.min(snapshot.height) as usize;
        for row in 0..h {
            let src = row * (snapshot.width as usize);
            let dst = row * (self.width as usize);
            self.pixels[dst..dst + w].copy_from_slice(&snapshot.pixels[src..src + w]);
        }
    }

    /// Copy the overlapping region of `other` into this surface, top-left
    /// aligned. Pixels outside the overlap are left untouched.
    pub fn copy_from(&mut self, other: &Surface) {
        let w = self.width.min(other.width) as usize;
        let h = self.height.min(other.height) as usize;
        for row in 0..h {
            let src = row * (other.width as usize);
            let dst = row * (self.width as usize);
            self.pixels[dst..dst + w].copy_from_slice(&other.pixels[src..src + w]);
        }
    }

    /// Rasterize one stroke segment from `(x0, y0)` to `(x1, y1)`.
    ///
    /// The segment is drawn at the fixed stroke width with round caps: every
    /// pixel whose center lies within half the stroke width of the segment is
    /// painted. Degenerate zero-length segments produce a round dot.
    pub fn draw_segment(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Color) {
        let radius = STROKE_WIDTH_PX / 2.0;
        let px = color.to_pixel();

        let min_x = (x0.min(x1) - radius).floor().max(0.0);
        let min_y = (y0.min(y1) - radius).floor().max(0.0);
        let max_x = (x0.max(x1) + radius).ceil().min(f64::from(self.width));
        let max_y = (y0.max(y1) + radius).ceil().min(f64::from(self.height));
        if min_x >= max_x || min_y >= max_y {
            return;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (x_lo, y_lo, x_hi, y_hi) = (min_x as u32, min_y as u32, max_x as u32, max_y as u32);

        for y in y_lo..y_hi {
            for x in x_lo..x_hi {
                let cx = f64::from(x) + 0.5;
                let cy = f64::from(y) + 0.5;
                if segment_distance(cx, cy, x0, y0, x1, y1) <= radius {
                    self.pixels[(y as usize) * (self.width as usize) + (x as usize)] = px;
                }
            }
        }
    }
}

/// Distance from point `(px, py)` to the segment `(x0, y0)`–`(x1, y1)`.
fn segment_distance(px: f64, py: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq <= f64::EPSILON {
        0.0
    } else {
        (((px - x0) * dx + (py - y0) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let nx = x0 + t * dx;
    let ny = y0 + t * dy;
    ((px - nx).powi(2) + (py - ny).powi(2)).sqrt()
}

/// The visible surface plus its backing store.
#[derive(Debug, Clone)]
pub struct SurfaceSet {
    visible: Surface,
    /// Created on first resize; holds the superset of everything the visible
    /// surface has displayed since. Cleared only by an explicit clear-all.
    backing: Option<Surface>,
}

impl Default for SurfaceSet {
    /// A zero-sized set; the first viewport update sizes it for real.
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl SurfaceSet {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { visible: Surface::new(width, height), backing: None }
    }

    #[must_use]
    pub fn visible(&self) -> &Surface {
        &self.visible
    }

    pub fn visible_mut(&mut self) -> &mut Surface {
        &mut self.visible
    }

    #[must_use]
    pub fn backing(&self) -> Option<&Surface> {
        self.backing.as_ref()
    }

    /// Resize the visible surface, compositing through the backing store so
    /// no prior content is lost. The backing side only ever grows.
    pub fn resize(&mut self, width: u32, height: u32) {
        let side = self
            .backing
            .as_ref()
            .map_or(0, Surface::width)
            .max(self.visible.width)
            .max(self.visible.height)
            .max(width)
            .max(height);

        let mut backing = match self.backing.take() {
            Some(existing) if existing.width == side => existing,
            existing => {
                let mut grown = Surface::new(side, side);
                if let Some(old) = existing {
                    grown.copy_from(&old);
                }
                grown
            }
        };

        backing.copy_from(&self.visible);
        self.visible = Surface::new(width, height);
        self.visible.copy_from(&backing);
        self.backing = Some(backing);
    }

    /// Wipe both surfaces. The only operation that clears the backing store.
    pub fn clear_all(&mut self) {
        self.visible.clear();
        if let Some(backing) = &mut self.backing {
            backing.clear();
        }
    }

    /// Overwrite both surfaces from a snapshot (undo path).
    pub fn restore_everywhere(&mut self, snapshot: &Snapshot) {
        self.visible.restore(snapshot);
        if let Some(backing) = &mut self.backing {
            backing.restore(snapshot);
        }
    }
}
