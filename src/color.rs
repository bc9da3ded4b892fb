//! Color values as they cross the palette boundary.
//!
//! The palette and picker hand the engine 6-digit hex strings (`#RRGGBB`);
//! internally a [`Color`] is a packed RGB triple so the rasterizer can write
//! pixels without re-parsing. Serde round-trips through the hex form.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::consts::DEFAULT_COLOR_HEX;

/// An opaque RGB color, locked into a session at stroke start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` string. Anything else is a caller error and yields `None`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let r = parse_channel(&digits[0..2])?;
        let g = parse_channel(&digits[2..4])?;
        let b = parse_channel(&digits[4..6])?;
        Some(Self { r, g, b })
    }

    /// Format as an uppercase `#RRGGBB` string.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Pack into the surface pixel format (`0xAABBGGRR`, little-endian RGBA
    /// bytes, fully opaque).
    #[must_use]
    pub fn to_pixel(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, 0xFF])
    }
}

/// One two-digit hex channel; the digits are pre-validated by `from_hex`.
fn parse_channel(digits: &str) -> Option<u8> {
    match u8::from_str_radix(digits, 16) {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

impl Default for Color {
    /// The purple every fresh pad starts with.
    fn default() -> Self {
        // DEFAULT_COLOR_HEX is a compile-time constant with a known-good shape.
        Self::from_hex(DEFAULT_COLOR_HEX).unwrap_or(Self { r: 0xAB, g: 0x71, b: 0xE1 })
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: {hex}")))
    }
}
