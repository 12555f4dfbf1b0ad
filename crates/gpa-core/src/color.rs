//! Color values stored in palette entries.

use serde::{Deserialize, Serialize};

/// RGBA color with floating point channels in `0.0..=1.0`
///
/// Channels are kept as `f32` so values survive a save/load cycle bit for
/// bit; the record codec never rounds them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub red: f32,
    /// Green channel
    pub green: f32,
    /// Blue channel
    pub blue: f32,
    /// Opacity
    pub alpha: f32,
}

impl Color {
    /// Opaque black, used for entries whose record carries no color
    pub const UNSET: Self = Self { red: 0.0, green: 0.0, blue: 0.0, alpha: 1.0 };

    /// Opaque color from float channels
    #[must_use]
    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue, alpha: 1.0 }
    }

    /// Opaque color from 8-bit channels
    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(f32::from(red) / 255.0, f32::from(green) / 255.0, f32::from(blue) / 255.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::UNSET
    }
}
