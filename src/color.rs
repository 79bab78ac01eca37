//! Colors and stroke styles shared by recipes and painters.

use std::fmt;

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Self = Self(0x00, 0x00, 0x00);
    pub const RED: Self = Self(0xff, 0x00, 0x00);
    pub const GREEN: Self = Self(0x00, 0xff, 0x00);
    pub const BLUE: Self = Self(0x00, 0x00, 0xff);
    pub const YELLOW: Self = Self(0xff, 0xff, 0x00);

    /// Scale each channel by `factor` (clamped to `[0, 1]`), used for flat face shading.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn shade(self, factor: f64) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (f64::from(c) * f).round() as u8;
        Self(scale(self.0), scale(self.1), scale(self.2))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Outline color and width in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f64,
}

impl Stroke {
    #[must_use]
    pub const fn new(color: Rgb, width: f64) -> Self {
        Self { color, width }
    }
}
