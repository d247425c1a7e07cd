//! Fixed-threshold binarization

use crate::{ThresholdError, ThresholdResult};
use log::debug;
use maskseg_core::{BinaryMask, GrayImage};
use serde::{Deserialize, Serialize};

/// Parameters for fixed-threshold binarization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdParams {
    /// Cut value compared against each intensity
    pub threshold: f64,
    /// Output value for selected pixels; only zero versus nonzero matters
    /// because masks are two-valued
    pub max_value: f64,
    /// Select pixels below the cut instead of above it
    pub invert: bool,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            threshold: 128.0,
            max_value: 255.0,
            invert: false,
        }
    }
}

impl ThresholdParams {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_max_value(mut self, max_value: f64) -> Self {
        self.max_value = max_value;
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }
}

/// Check that `max_value` lies in `[0, 255]` and report whether it
/// produces any foreground.
pub(crate) fn check_max_value(max_value: f64) -> ThresholdResult<bool> {
    if !max_value.is_finite() || !(0.0..=255.0).contains(&max_value) {
        return Err(ThresholdError::InvalidParameter(format!(
            "max_value must be in [0, 255], got {max_value}"
        )));
    }
    Ok(max_value.round() != 0.0)
}

pub(crate) fn check_not_empty(image: &GrayImage) -> ThresholdResult<()> {
    if image.is_empty() {
        return Err(ThresholdError::EmptyInput);
    }
    Ok(())
}

/// Binarize with a single global cut.
///
/// A pixel is foreground iff `intensity > threshold`, or
/// `intensity < threshold` when `invert` is set. A pixel exactly equal to
/// the threshold is background in both modes.
///
/// # Errors
///
/// - [`ThresholdError::EmptyInput`] for a zero-sized image
/// - [`ThresholdError::InvalidParameter`] for a NaN threshold or a
///   `max_value` outside `[0, 255]`
pub fn threshold_to_binary(image: &GrayImage, params: &ThresholdParams) -> ThresholdResult<BinaryMask> {
    check_not_empty(image)?;
    if params.threshold.is_nan() {
        return Err(ThresholdError::InvalidParameter(
            "threshold must not be NaN".to_string(),
        ));
    }
    if !check_max_value(params.max_value)? {
        return Ok(BinaryMask::for_image(image));
    }

    let t = params.threshold;
    let mask = if params.invert {
        BinaryMask::from_image_predicate(image, |v| f64::from(v) < t)
    } else {
        BinaryMask::from_image_predicate(image, |v| f64::from(v) > t)
    };
    debug!(
        "threshold {} (invert={}): {} of {} pixels foreground",
        t,
        params.invert,
        mask.foreground_count(),
        mask.len()
    );
    Ok(mask)
}
