//! Unified error type of the segmentation entry points
//!
//! Each engine crate reports its own error enum. At this level they all
//! collapse into the four failure kinds a caller can act on.

use maskseg_morph::MorphError;
use maskseg_region::RegionError;
use maskseg_threshold::ThresholdError;
use thiserror::Error;

/// Segmentation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    /// Zero-sized image
    #[error("empty image: no pixels to segment")]
    EmptyInput,

    /// Out-of-range or malformed parameters
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Region growing without seeds
    #[error("no seeds provided for region growing")]
    NoSeeds,

    /// Manual watershed without any marker
    #[error("no markers provided for watershed")]
    NoMarkers,
}

/// Result type for segmentation operations
pub type SegmentResult<T> = Result<T, SegmentError>;

impl From<maskseg_core::Error> for SegmentError {
    fn from(err: maskseg_core::Error) -> Self {
        SegmentError::InvalidParameter(err.to_string())
    }
}

impl From<ThresholdError> for SegmentError {
    fn from(err: ThresholdError) -> Self {
        match err {
            ThresholdError::Core(e) => e.into(),
            ThresholdError::EmptyInput => SegmentError::EmptyInput,
            ThresholdError::InvalidParameter(msg) => SegmentError::InvalidParameter(msg),
        }
    }
}

impl From<MorphError> for SegmentError {
    fn from(err: MorphError) -> Self {
        match err {
            MorphError::Core(e) => e.into(),
            MorphError::InvalidSel(msg) => {
                SegmentError::InvalidParameter(format!("structuring element: {msg}"))
            }
        }
    }
}

impl From<RegionError> for SegmentError {
    fn from(err: RegionError) -> Self {
        match err {
            RegionError::Core(e) => e.into(),
            RegionError::Threshold(e) => e.into(),
            RegionError::Morph(e) => e.into(),
            RegionError::EmptyInput => SegmentError::EmptyInput,
            RegionError::NoSeeds => SegmentError::NoSeeds,
            RegionError::NoMarkers => SegmentError::NoMarkers,
            RegionError::InvalidParameter(msg) => SegmentError::InvalidParameter(msg),
            e @ RegionError::InvalidSeed { .. } => SegmentError::InvalidParameter(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for SegmentError {
    fn from(err: serde_json::Error) -> Self {
        SegmentError::InvalidParameter(format!("malformed parameters: {err}"))
    }
}
