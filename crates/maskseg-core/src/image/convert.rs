//! Gray <-> RGB conversion
//!
//! Color to gray uses ITU-R BT.601 luma weights in 14-bit fixed point,
//! which rounds identically on every platform.

use super::{GrayImage, RgbImage};
use crate::color::Color;

const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Convert one color to its luma value.
#[inline]
pub fn rgb_to_gray(color: Color) -> u8 {
    let v = u32::from(color.r) * LUMA_R
        + u32::from(color.g) * LUMA_G
        + u32::from(color.b) * LUMA_B
        + (1 << (LUMA_SHIFT - 1));
    (v >> LUMA_SHIFT) as u8
}

impl GrayImage {
    /// Convert a color image to grayscale.
    pub fn from_rgb(rgb: &RgbImage) -> GrayImage {
        let data = rgb
            .data()
            .chunks_exact(3)
            .map(|px| rgb_to_gray(Color::new(px[0], px[1], px[2])))
            .collect();
        GrayImage::from_parts(rgb.width(), rgb.height(), data)
    }
}

impl RgbImage {
    /// Replicate a grayscale image into three identical channels.
    pub fn from_gray(gray: &GrayImage) -> RgbImage {
        let mut data = Vec::with_capacity(gray.len() * 3);
        for &v in gray.data() {
            data.extend_from_slice(&[v, v, v]);
        }
        RgbImage::from_parts(gray.width(), gray.height(), data)
    }
}
