//! Seeded region growing
//!
//! Grows a foreground region outward from user-supplied seed pixels. A
//! neighbor joins the region when its intensity is within `tolerance` of
//! the pixel it was reached from, so the region can drift gradually along
//! smooth ramps while stopping at sharp edges.
//!
//! Pixels are expanded last-in first-out from an explicit stack; no
//! recursion is involved, so region size is bounded only by image size.

use crate::conncomp::{ConnectivityType, neighbor_indices};
use crate::error::{RegionError, RegionResult};
use log::debug;
use maskseg_core::{BinaryMask, GrayImage, Point};
use serde::{Deserialize, Serialize};

/// Parameters for [`region_growing`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionGrowingParams {
    /// Starting pixels
    pub seeds: Vec<Point>,
    /// Maximum absolute intensity step between adjacent region pixels
    pub tolerance: f64,
    /// Neighborhood used for expansion
    pub connectivity: ConnectivityType,
}

impl Default for RegionGrowingParams {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            tolerance: 20.0,
            connectivity: ConnectivityType::EightWay,
        }
    }
}

impl RegionGrowingParams {
    /// Create parameters growing from `seeds` with default tolerance.
    pub fn new(seeds: impl IntoIterator<Item = Point>) -> Self {
        Self {
            seeds: seeds.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_seeds(mut self, seeds: impl IntoIterator<Item = Point>) -> Self {
        self.seeds = seeds.into_iter().collect();
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }
}

/// Check that `p` lies inside `image`, returning its flat index.
pub(crate) fn seed_index(image: &GrayImage, p: Point) -> RegionResult<usize> {
    if !image.contains(i64::from(p.x), i64::from(p.y)) {
        return Err(RegionError::InvalidSeed {
            x: p.x,
            y: p.y,
            width: image.width(),
            height: image.height(),
        });
    }
    Ok(p.y as usize * image.width() as usize + p.x as usize)
}

/// Grow a region from seed pixels.
///
/// Every seed is foreground. A neighbor `n` of a region pixel `p` is added
/// when `|I(n) - I(p)| <= tolerance`. Growing stops when no further pixel
/// qualifies.
///
/// # Errors
///
/// - [`RegionError::EmptyInput`] for a zero-sized image
/// - [`RegionError::NoSeeds`] when `params.seeds` is empty
/// - [`RegionError::InvalidSeed`] when a seed lies outside the image
/// - [`RegionError::InvalidParameter`] for a negative or NaN tolerance
pub fn region_growing(image: &GrayImage, params: &RegionGrowingParams) -> RegionResult<BinaryMask> {
    if image.is_empty() {
        return Err(RegionError::EmptyInput);
    }
    if params.seeds.is_empty() {
        return Err(RegionError::NoSeeds);
    }
    if params.tolerance.is_nan() || params.tolerance < 0.0 {
        return Err(RegionError::InvalidParameter(format!(
            "tolerance must be non-negative, got {}",
            params.tolerance
        )));
    }

    let (width, height) = image.dimensions();
    let data = image.data();
    let mut region = BinaryMask::for_image(image);
    let mut stack = Vec::with_capacity(params.seeds.len());

    for &seed in &params.seeds {
        stack.push(seed_index(image, seed)?);
    }

    while let Some(idx) = stack.pop() {
        if region.is_foreground_index(idx) {
            continue;
        }
        region.set_index(idx, true);

        let value = f64::from(data[idx]);
        for n in neighbor_indices(idx, width, height, params.connectivity) {
            if !region.is_foreground_index(n) && (f64::from(data[n]) - value).abs() <= params.tolerance {
                stack.push(n);
            }
        }
    }

    debug!(
        "region_growing: {} seeds, tolerance {}, {} pixels claimed",
        params.seeds.len(),
        params.tolerance,
        region.foreground_count()
    );
    Ok(region)
}
