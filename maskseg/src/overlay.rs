//! Mask overlay rendering
//!
//! Foreground pixels are tinted by alpha-blending a highlight color over
//! the source image, then each component's outer contour is drawn over
//! the tinted result. Outline pixels blend with weight `sqrt(alpha)`, so
//! they stand out from the fill for any `0 < alpha < 1`, while `alpha = 0`
//! leaves the image untouched and `alpha = 1` paints the whole foreground
//! in the highlight color.
//!
//! Background pixels are never modified: contour lines run only through
//! foreground pixels.

use crate::error::{SegmentError, SegmentResult};
use maskseg_core::{BinaryMask, Color, GrayImage, RgbImage, generate_polyline_points};
use maskseg_region::get_contours;
use serde::{Deserialize, Serialize};

/// Rendering choices for [`draw_segmentation_with`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayOptions {
    /// Tint color
    pub highlight: Color,
    /// Draw contour outlines over the fill
    pub outline: bool,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            highlight: Color::RED,
            outline: true,
        }
    }
}

impl OverlayOptions {
    pub fn with_highlight(mut self, highlight: Color) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn with_outline(mut self, outline: bool) -> Self {
        self.outline = outline;
        self
    }
}

/// Overlay `mask` on a grayscale image.
pub fn draw_segmentation(image: &GrayImage, mask: &BinaryMask, alpha: f64) -> SegmentResult<RgbImage> {
    draw_segmentation_with(&RgbImage::from_gray(image), mask, alpha, &OverlayOptions::default())
}

/// Overlay `mask` on a color image.
pub fn draw_segmentation_rgb(image: &RgbImage, mask: &BinaryMask, alpha: f64) -> SegmentResult<RgbImage> {
    draw_segmentation_with(image, mask, alpha, &OverlayOptions::default())
}

/// Overlay `mask` on `image` with explicit options.
///
/// # Errors
///
/// - [`SegmentError::InvalidParameter`] if `alpha` is outside `[0, 1]` or
///   NaN, or if the mask and image dimensions differ
/// - [`SegmentError::EmptyInput`] for a zero-sized image
pub fn draw_segmentation_with(
    image: &RgbImage,
    mask: &BinaryMask,
    alpha: f64,
    options: &OverlayOptions,
) -> SegmentResult<RgbImage> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(SegmentError::InvalidParameter(format!(
            "alpha must be in [0, 1], got {alpha}"
        )));
    }
    if image.is_empty() {
        return Err(SegmentError::EmptyInput);
    }
    mask.check_same_size(image.width(), image.height())?;

    let mut out = image.to_mut();
    let fill = alpha as f32;
    for p in mask.foreground_points() {
        out.blend_pixel(p.x, p.y, options.highlight, fill);
    }

    if options.outline {
        let weight = alpha.sqrt() as f32;
        let width = image.width() as usize;
        // Lines of thin components retrace pixels; blend each once
        let mut drawn = vec![false; mask.len()];
        for contour in get_contours(mask)? {
            for p in generate_polyline_points(contour.points(), true) {
                if !mask.is_foreground(p.x, p.y) {
                    continue;
                }
                let idx = p.y as usize * width + p.x as usize;
                if !drawn[idx] {
                    drawn[idx] = true;
                    out.blend_pixel(p.x, p.y, options.highlight, weight);
                }
            }
        }
    }

    Ok(out.into())
}
