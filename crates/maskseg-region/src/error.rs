//! Error types for maskseg-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] maskseg_core::Error),

    /// Thresholding error (watershed auto markers)
    #[error("threshold error: {0}")]
    Threshold(#[from] maskseg_threshold::ThresholdError),

    /// Morphology error (marker dilation, result closing)
    #[error("morphology error: {0}")]
    Morph(#[from] maskseg_morph::MorphError),

    /// Zero-sized image
    #[error("empty image: no pixels to process")]
    EmptyInput,

    /// Seed position outside the image
    #[error("invalid seed position: ({x}, {y}) outside {width}x{height} image")]
    InvalidSeed {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    /// Invalid parameters
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Region growing without seeds
    #[error("no seeds provided for region growing")]
    NoSeeds,

    /// Watershed without any marker
    #[error("no markers provided for watershed")]
    NoMarkers,
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
