//! RGB colors used for overlay rendering

use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    /// White color
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    /// Red color
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    /// Green color
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
    /// Blue color
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };

    /// Blend `over` on top of this color.
    ///
    /// Each channel becomes `round(fract * over + (1 - fract) * self)`.
    /// `fract` is clamped to `[0, 1]`, so `fract == 0` returns `self` and
    /// `fract == 1` returns `over` exactly.
    #[inline]
    pub fn blend(self, over: Color, fract: f32) -> Color {
        let f = fract.clamp(0.0, 1.0);
        let mix = |base: u8, top: u8| -> u8 {
            (f * f32::from(top) + (1.0 - f) * f32::from(base))
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Color {
            r: mix(self.r, over.r),
            g: mix(self.g, over.g),
            b: mix(self.b, over.b),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        let base = Color::new(10, 200, 37);
        assert_eq!(base.blend(Color::RED, 0.0), base);
        assert_eq!(base.blend(Color::RED, 1.0), Color::RED);
        assert_eq!(base.blend(Color::RED, 7.0), Color::RED);
    }

    #[test]
    fn test_blend_midpoint_rounds() {
        let c = Color::BLACK.blend(Color::WHITE, 0.5);
        assert_eq!(c, Color::new(128, 128, 128));
        let c = Color::new(100, 100, 100).blend(Color::new(200, 0, 100), 0.25);
        assert_eq!(c, Color::new(125, 75, 100));
    }
}
