//! Method dispatch
//!
//! [`segment`] routes to the engine named by the parameters, then passes
//! the raw mask through [`post_process`] so every method returns a mask
//! cleaned the same way.

use crate::error::{SegmentError, SegmentResult};
use crate::params::{SegmentOptions, SegmentationParams};
use log::debug;
use maskseg_core::{BinaryMask, GrayImage, RgbImage};
use maskseg_morph::post_process;
use maskseg_region::{region_growing, watershed_segmentation};
use maskseg_threshold::{adaptive_threshold, threshold_otsu, threshold_to_binary};

/// Segment a grayscale image with default engine options.
///
/// # Errors
///
/// - [`SegmentError::EmptyInput`] for a zero-sized image
/// - [`SegmentError::InvalidParameter`] for out-of-range parameters or
///   seeds outside the image
/// - [`SegmentError::NoSeeds`] for region growing without seeds
/// - [`SegmentError::NoMarkers`] for manual watershed without seeds
pub fn segment(image: &GrayImage, params: &SegmentationParams) -> SegmentResult<BinaryMask> {
    segment_with(image, params, &SegmentOptions::default())
}

/// Segment a grayscale image.
pub fn segment_with(
    image: &GrayImage,
    params: &SegmentationParams,
    options: &SegmentOptions,
) -> SegmentResult<BinaryMask> {
    if image.is_empty() {
        return Err(SegmentError::EmptyInput);
    }

    let raw = match params {
        SegmentationParams::Threshold(p) => threshold_to_binary(image, p)?,
        SegmentationParams::Otsu => threshold_otsu(image)?,
        SegmentationParams::Adaptive(p) => adaptive_threshold(image, p)?,
        SegmentationParams::RegionGrowing(p) => region_growing(image, p)?,
        SegmentationParams::Watershed(p) => watershed_segmentation(image, p, &options.watershed)?,
    };
    let mask = post_process(&raw)?;

    debug!(
        "segment {:?} on {}x{}: {} foreground pixels",
        params.method(),
        image.width(),
        image.height(),
        mask.foreground_count()
    );
    Ok(mask)
}

/// Segment a color image after converting it to luma.
pub fn segment_rgb(image: &RgbImage, params: &SegmentationParams) -> SegmentResult<BinaryMask> {
    segment(&GrayImage::from_rgb(image), params)
}
