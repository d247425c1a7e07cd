//! maskseg threshold - Binarization of grayscale images
//!
//! This crate converts a [`GrayImage`](maskseg_core::GrayImage) into a
//! [`BinaryMask`](maskseg_core::BinaryMask):
//!
//! - **Fixed threshold** ([`binarize`]): one global cut value
//! - **Otsu** ([`otsu`]): the cut maximizing inter-class variance
//! - **Adaptive** ([`adaptive`]): a per-pixel cut from the local mean or
//!   Gaussian-weighted mean

pub mod adaptive;
pub mod binarize;
pub mod error;
pub mod otsu;

// Re-export core types
pub use maskseg_core;

pub use adaptive::{AdaptiveMethod, AdaptiveParams, adaptive_threshold, gaussian_kernel};
pub use binarize::{ThresholdParams, threshold_to_binary};
pub use error::{ThresholdError, ThresholdResult};
pub use otsu::{compute_otsu_threshold, gray_histogram, otsu_from_histogram, threshold_otsu};
