//! Marker-controlled watershed segmentation
//!
//! The image is treated as a topographic surface. Markers seed two basins,
//! background (label 1) and foreground (label 2), and a priority flood
//! grows them outward through pixels in increasing order of intensity.
//! Pixels where the two basins meet become ridges (label -1).
//!
//! Markers come from one of two sources:
//!
//! - **Auto**: Otsu binarization, then a normalized distance transform of
//!   the foreground. Pixels deep inside objects become foreground markers;
//!   pixels outside a dilated copy of the foreground become background
//!   markers.
//! - **Manual**: caller-supplied seed points, each stamped as a small disk.
//!
//! The segmentation mask is the set of pixels labeled foreground. Ridges
//! and background are both background in the mask.

use crate::conncomp::{ConnectivityType, neighbor_indices};
use crate::distance::{DistanceMetric, DistanceTransform};
use crate::error::{RegionError, RegionResult};
use crate::seedfill::seed_index;
use log::debug;
use maskseg_core::{BinaryMask, GrayImage, Point, Seed, SeedClass, generate_filled_circle_points};
use maskseg_morph::{Sel, cleanup_sel, close, dilate_iter};
use maskseg_threshold::threshold_otsu;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Per-pixel watershed labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: u32,
    height: u32,
    labels: Vec<i32>,
}

impl LabelMap {
    /// Not yet reached by the flood
    pub const UNVISITED: i32 = 0;
    /// Background basin
    pub const BACKGROUND: i32 = 1;
    /// Foreground basin
    pub const FOREGROUND: i32 = 2;
    /// Boundary between basins
    pub const RIDGE: i32 = -1;

    /// All-unvisited map with the dimensions of `image`.
    pub fn for_image(image: &GrayImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            labels: vec![Self::UNVISITED; image.len()],
        }
    }

    /// Wrap a row-major label buffer.
    ///
    /// # Errors
    ///
    /// Returns a core `BufferSizeMismatch` if `labels.len() != width * height`.
    pub fn from_raw(width: u32, height: u32, labels: Vec<i32>) -> RegionResult<Self> {
        let expected = width as usize * height as usize;
        if labels.len() != expected {
            return Err(maskseg_core::Error::BufferSizeMismatch {
                width,
                height,
                channels: 1,
                expected,
                actual: labels.len(),
            }
            .into());
        }
        Ok(Self {
            width,
            height,
            labels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    /// Label at (x, y), or `None` out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<i32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.labels[y as usize * self.width as usize + x as usize])
    }

    /// Label `p` if it lies inside the map; otherwise do nothing.
    pub fn paint(&mut self, p: Point, label: i32) {
        if p.x < 0 || p.y < 0 || p.x as u32 >= self.width || p.y as u32 >= self.height {
            return;
        }
        self.labels[p.y as usize * self.width as usize + p.x as usize] = label;
    }

    /// Number of pixels carrying `label`.
    pub fn count(&self, label: i32) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }

    /// Mask of the foreground basin.
    pub fn foreground_mask(&self) -> RegionResult<BinaryMask> {
        let data = self
            .labels
            .iter()
            .map(|&l| u8::from(l == Self::FOREGROUND))
            .collect();
        Ok(BinaryMask::from_raw(self.width, self.height, data)?)
    }
}

/// Marker source for [`watershed_segmentation`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatershedParams {
    /// Derive markers automatically; the seed lists are ignored when set
    pub use_distance_transform: bool,
    /// Manual-mode seeds inside objects
    pub foreground_seeds: Vec<Point>,
    /// Manual-mode seeds outside objects
    pub background_seeds: Vec<Point>,
}

impl Default for WatershedParams {
    fn default() -> Self {
        Self {
            use_distance_transform: true,
            foreground_seeds: Vec::new(),
            background_seeds: Vec::new(),
        }
    }
}

impl WatershedParams {
    /// Manual mode with the given seed lists.
    pub fn manual(foreground: impl IntoIterator<Item = Point>, background: impl IntoIterator<Item = Point>) -> Self {
        Self {
            use_distance_transform: false,
            foreground_seeds: foreground.into_iter().collect(),
            background_seeds: background.into_iter().collect(),
        }
    }

    /// Manual mode from tagged seeds. Untagged seeds count as foreground.
    pub fn from_seeds(seeds: &[Seed]) -> Self {
        let (fg, bg): (Vec<&Seed>, Vec<&Seed>) = seeds
            .iter()
            .partition(|s| s.marker_class() == SeedClass::Foreground);
        Self::manual(fg.into_iter().map(Seed::point), bg.into_iter().map(Seed::point))
    }

    pub fn with_distance_transform(mut self, enabled: bool) -> Self {
        self.use_distance_transform = enabled;
        self
    }
}

/// Tuning constants of the watershed engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatershedOptions {
    /// Normalized distance above which a pixel becomes a foreground marker
    pub distance_threshold: f64,
    /// Number of 3x3 dilations of the Otsu foreground before inverting it
    /// into background markers
    pub background_dilations: u32,
    /// Radius of the disk stamped around each manual seed
    pub seed_radius: u32,
    /// Neighborhood of the flood
    pub connectivity: ConnectivityType,
    /// Distance transform used for auto markers
    pub distance_metric: DistanceMetric,
    /// Close the resulting mask with a 3x3 ellipse
    pub close_result: bool,
}

impl Default for WatershedOptions {
    fn default() -> Self {
        Self {
            distance_threshold: 0.3,
            background_dilations: 3,
            seed_radius: 2,
            connectivity: ConnectivityType::FourWay,
            distance_metric: DistanceMetric::Euclidean,
            close_result: true,
        }
    }
}

impl WatershedOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_distance_threshold(mut self, threshold: f64) -> Self {
        self.distance_threshold = threshold;
        self
    }

    pub fn with_background_dilations(mut self, iterations: u32) -> Self {
        self.background_dilations = iterations;
        self
    }

    pub fn with_seed_radius(mut self, radius: u32) -> Self {
        self.seed_radius = radius;
        self
    }

    /// Set connectivity type
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    pub fn with_close_result(mut self, close: bool) -> Self {
        self.close_result = close;
        self
    }

    fn validate(&self) -> RegionResult<()> {
        if !self.distance_threshold.is_finite() {
            return Err(RegionError::InvalidParameter(format!(
                "distance threshold must be finite, got {}",
                self.distance_threshold
            )));
        }
        Ok(())
    }
}

/// Build markers from the image alone.
///
/// Foreground markers are Otsu-foreground pixels whose normalized distance
/// to the Otsu background exceeds `distance_threshold`. Background markers
/// are the pixels left untouched by `background_dilations` 3x3 dilations of
/// the Otsu foreground.
pub fn auto_markers(image: &GrayImage, options: &WatershedOptions) -> RegionResult<LabelMap> {
    options.validate()?;
    let binary = threshold_otsu(image)?;

    let distance = options.distance_metric.transform(&binary).normalized();
    let sure_fg = distance.above(options.distance_threshold as f32)?;
    let sure_bg = dilate_iter(&binary, &Sel::create_square(3)?, options.background_dilations)?.invert();

    let mut markers = LabelMap::for_image(image);
    for (i, label) in markers.labels.iter_mut().enumerate() {
        if sure_fg.is_foreground_index(i) {
            *label = LabelMap::FOREGROUND;
        } else if sure_bg.is_foreground_index(i) {
            *label = LabelMap::BACKGROUND;
        }
    }

    debug!(
        "auto markers: {} foreground, {} background",
        markers.count(LabelMap::FOREGROUND),
        markers.count(LabelMap::BACKGROUND)
    );
    Ok(markers)
}

/// Build markers by stamping a disk around each seed.
///
/// Background disks are drawn first, so a foreground disk wins where two
/// overlap. Disks are clipped to the image.
///
/// # Errors
///
/// - [`RegionError::NoMarkers`] when both seed lists are empty
/// - [`RegionError::InvalidSeed`] when a seed center lies outside the image
pub fn manual_markers(
    image: &GrayImage,
    params: &WatershedParams,
    options: &WatershedOptions,
) -> RegionResult<LabelMap> {
    if params.foreground_seeds.is_empty() && params.background_seeds.is_empty() {
        return Err(RegionError::NoMarkers);
    }

    let mut markers = LabelMap::for_image(image);
    let stamps = [
        (&params.background_seeds, LabelMap::BACKGROUND),
        (&params.foreground_seeds, LabelMap::FOREGROUND),
    ];
    for (seeds, label) in stamps {
        for &seed in seeds {
            seed_index(image, seed)?;
            for p in generate_filled_circle_points(seed, options.seed_radius) {
                markers.paint(p, label);
            }
        }
    }
    Ok(markers)
}

/// A flooding strategy turning markers into a full labeling
pub trait Watershed {
    /// Flood `markers` over `image`.
    ///
    /// Positive labels in `markers` are basin seeds; every pixel reachable
    /// from a seed ends with a basin label or [`LabelMap::RIDGE`].
    fn flood(&self, image: &GrayImage, markers: LabelMap) -> RegionResult<LabelMap>;
}

/// Priority-flood watershed
///
/// Pixels are processed in increasing intensity; equal intensities are
/// processed in the order they were queued. Each pixel is queued once,
/// carrying the label of the pixel that queued it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityFlood {
    pub connectivity: ConnectivityType,
}

impl PriorityFlood {
    pub fn new(connectivity: ConnectivityType) -> Self {
        Self { connectivity }
    }
}

impl Watershed for PriorityFlood {
    fn flood(&self, image: &GrayImage, markers: LabelMap) -> RegionResult<LabelMap> {
        let (width, height) = image.dimensions();
        if markers.dimensions() != (width, height) {
            return Err(maskseg_core::Error::DimensionMismatch {
                expected: (width, height),
                actual: markers.dimensions(),
            }
            .into());
        }

        let data = image.data();
        let mut labels = markers.labels;
        let mut queued = vec![false; labels.len()];
        // (intensity, insertion order, pixel, carried label)
        let mut heap: BinaryHeap<Reverse<(u8, u64, usize, i32)>> = BinaryHeap::new();
        let mut seq = 0u64;

        for idx in 0..labels.len() {
            let label = labels[idx];
            if label <= 0 {
                continue;
            }
            for n in neighbor_indices(idx, width, height, self.connectivity) {
                if labels[n] == LabelMap::UNVISITED && !queued[n] {
                    queued[n] = true;
                    heap.push(Reverse((data[n], seq, n, label)));
                    seq += 1;
                }
            }
        }

        let mut ridges = 0usize;
        while let Some(Reverse((_, _, idx, carried))) = heap.pop() {
            let mut basin = LabelMap::UNVISITED;
            for n in neighbor_indices(idx, width, height, self.connectivity) {
                let l = labels[n];
                if l <= 0 || l == basin {
                    continue;
                }
                if basin == LabelMap::UNVISITED {
                    basin = l;
                } else {
                    basin = LabelMap::RIDGE;
                    break;
                }
            }

            let assigned = if basin == LabelMap::UNVISITED { carried } else { basin };
            labels[idx] = assigned;
            if assigned == LabelMap::RIDGE {
                ridges += 1;
            }

            let propagate = if assigned > 0 { assigned } else { carried };
            for n in neighbor_indices(idx, width, height, self.connectivity) {
                if labels[n] == LabelMap::UNVISITED && !queued[n] {
                    queued[n] = true;
                    heap.push(Reverse((data[n], seq, n, propagate)));
                    seq += 1;
                }
            }
        }

        debug!("priority flood: {seq} pixels flooded, {ridges} ridge pixels");
        Ok(LabelMap {
            width,
            height,
            labels,
        })
    }
}

/// Segment with the default [`PriorityFlood`] flooding.
pub fn watershed_segmentation(
    image: &GrayImage,
    params: &WatershedParams,
    options: &WatershedOptions,
) -> RegionResult<BinaryMask> {
    watershed_segmentation_with(image, params, options, &PriorityFlood::new(options.connectivity))
}

/// Segment with a caller-chosen flooding strategy.
///
/// # Errors
///
/// - [`RegionError::EmptyInput`] for a zero-sized image
/// - [`RegionError::NoMarkers`] in manual mode without seeds
/// - [`RegionError::InvalidSeed`] for a manual seed outside the image
pub fn watershed_segmentation_with<W: Watershed + ?Sized>(
    image: &GrayImage,
    params: &WatershedParams,
    options: &WatershedOptions,
    watershed: &W,
) -> RegionResult<BinaryMask> {
    if image.is_empty() {
        return Err(RegionError::EmptyInput);
    }

    let markers = if params.use_distance_transform {
        auto_markers(image, options)?
    } else {
        manual_markers(image, params, options)?
    };

    let labels = watershed.flood(image, markers)?;
    let mask = labels.foreground_mask()?;
    if !options.close_result {
        return Ok(mask);
    }
    Ok(close(&mask, &cleanup_sel()?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flat dark image with a bright one-pixel frame around [4, 16)^2.
    fn framed_square() -> GrayImage {
        GrayImage::from_fn(20, 20, |x, y| {
            let inside = (4..16).contains(&x) && (4..16).contains(&y);
            let edge = x == 4 || x == 15 || y == 4 || y == 15;
            if inside && edge { 200 } else { 10 }
        })
        .unwrap()
    }

    #[test]
    fn test_flood_is_complete() {
        let img = framed_square();
        let markers = manual_markers(
            &img,
            &WatershedParams::manual([Point::new(9, 9)], [Point::new(1, 1)]),
            &WatershedOptions::default(),
        )
        .unwrap();
        let labels = PriorityFlood::default().flood(&img, markers).unwrap();
        assert_eq!(labels.count(LabelMap::UNVISITED), 0);
        assert!(labels.labels().iter().all(|&l| l == 1 || l == 2 || l == -1));
        assert_eq!(labels.get(6, 13), Some(LabelMap::FOREGROUND));
        assert_eq!(labels.get(19, 19), Some(LabelMap::BACKGROUND));
        // Frame pixels touch both basins
        assert_eq!(labels.get(10, 4), Some(LabelMap::RIDGE));
        assert_eq!(labels.count(LabelMap::FOREGROUND), 100);
    }

    #[test]
    fn test_ridge_between_basins() {
        // Two dark pixels separated by a bright one in a 3x1 strip
        let img = GrayImage::from_raw(3, 1, vec![10, 250, 10]).unwrap();
        let markers = LabelMap::from_raw(3, 1, vec![1, 0, 2]).unwrap();
        let labels = PriorityFlood::default().flood(&img, markers).unwrap();
        assert_eq!(labels.labels(), &[1, -1, 2]);
    }

    #[test]
    fn test_enclosed_pixel_takes_carried_label() {
        // (1, 1) is walled in by ridges once (1, 0) becomes one
        let img = GrayImage::new(3, 2).unwrap();
        let markers = LabelMap::from_raw(3, 2, vec![2, 0, 1, -1, 0, -1]).unwrap();
        let labels = PriorityFlood::default().flood(&img, markers).unwrap();
        assert_eq!(labels.labels(), &[2, -1, 1, -1, 2, -1]);
    }

    #[test]
    fn test_manual_requires_seeds() {
        let img = framed_square();
        let err = watershed_segmentation(
            &img,
            &WatershedParams::manual([], []),
            &WatershedOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RegionError::NoMarkers));
    }

    #[test]
    fn test_manual_seed_out_of_bounds() {
        let img = framed_square();
        let err = watershed_segmentation(
            &img,
            &WatershedParams::manual([Point::new(25, 3)], []),
            &WatershedOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RegionError::InvalidSeed { x: 25, y: 3, .. }));
    }

    #[test]
    fn test_from_seeds_partition() {
        let seeds = [
            Seed::Untagged(Point::new(1, 1)),
            Seed::Background(Point::new(2, 2)),
            Seed::Foreground(Point::new(3, 3)),
        ];
        let params = WatershedParams::from_seeds(&seeds);
        assert!(!params.use_distance_transform);
        assert_eq!(params.foreground_seeds, vec![Point::new(1, 1), Point::new(3, 3)]);
        assert_eq!(params.background_seeds, vec![Point::new(2, 2)]);
    }
}
