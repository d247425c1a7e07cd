//! maskseg - Binary mask segmentation for Rust
//!
//! Converts a grayscale (or color) image into a two-class
//! foreground/background [`BinaryMask`], and renders masks back over the
//! source for inspection.
//!
//! # Overview
//!
//! - Fixed, Otsu and adaptive thresholding
//! - Seeded region growing
//! - Marker-controlled watershed with automatic or manual markers
//! - Morphological cleanup applied to every result
//! - Contour extraction and alpha-blended overlays
//!
//! # Example
//!
//! ```
//! use maskseg::{GrayImage, SegmentationParams, draw_segmentation, segment};
//!
//! // Bright square on a dark background
//! let img = GrayImage::from_fn(32, 32, |x, y| {
//!     if (8..24).contains(&x) && (8..24).contains(&y) { 200 } else { 20 }
//! })
//! .unwrap();
//!
//! let mask = segment(&img, &SegmentationParams::Otsu).unwrap();
//! assert_eq!(mask.get(16, 16), Some(true));
//! assert_eq!(mask.get(2, 2), Some(false));
//!
//! let overlay = draw_segmentation(&img, &mask, 0.4).unwrap();
//! assert_eq!(overlay.dimensions(), (32, 32));
//! ```

mod error;
mod overlay;
mod params;
mod segment;

// Re-export core types (primary data structures used everywhere)
pub use maskseg_core::{
    BinaryMask, Box, Color, GrayImage, GrayImageMut, Point, RgbImage, RgbImageMut, Seed, SeedClass,
    generate_filled_circle_points, generate_line_points, generate_polyline_points, rgb_to_gray,
};
pub use maskseg_core::Error as CoreError;

// Re-export engine crates as modules to avoid name conflicts
pub use maskseg_morph as morph;
pub use maskseg_region as region;
pub use maskseg_threshold as threshold;

pub use error::{SegmentError, SegmentResult};
pub use overlay::{OverlayOptions, draw_segmentation, draw_segmentation_rgb, draw_segmentation_with};
pub use params::{SegmentOptions, SegmentationMethod, SegmentationParams};
pub use segment::{segment, segment_rgb, segment_with};

pub use maskseg_region::{Contour, ContourApproximation, get_contours, get_contours_with};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_items_at_root() {
        let seed = Seed::from(Point::new(3, 4));
        assert_eq!(seed.marker_class(), SeedClass::Foreground);
        assert_eq!(rgb_to_gray(Color::WHITE), 255);

        let err: CoreError = GrayImage::from_raw(2, 2, vec![0; 3]).unwrap_err();
        let seg: SegmentError = err.into();
        assert!(matches!(seg, SegmentError::InvalidParameter(_)));
    }
}
