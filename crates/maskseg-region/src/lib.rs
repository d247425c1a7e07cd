//! maskseg-region - Region-based segmentation for maskseg
//!
//! This crate provides:
//!
//! - **Connected components** - Labeling foreground components of a mask
//! - **Region growing** - Seeded flood fill with a local intensity tolerance
//! - **Distance transforms** - Exact Euclidean and chamfer
//! - **Watershed** - Marker-controlled priority flood, auto or manual markers
//! - **Contours** - Outer border tracing of 8-connected components
//!
//! # Examples
//!
//! ## Region growing
//!
//! ```
//! use maskseg_region::{RegionGrowingParams, region_growing};
//! use maskseg_core::{GrayImage, Point};
//!
//! // Left half dark, right half bright
//! let img = GrayImage::from_fn(10, 10, |x, _| if x < 5 { 20 } else { 220 }).unwrap();
//! let params = RegionGrowingParams::new([Point::new(0, 0)]).with_tolerance(10.0);
//! let mask = region_growing(&img, &params).unwrap();
//! assert_eq!(mask.foreground_count(), 50);
//! ```
//!
//! ## Contours
//!
//! ```
//! use maskseg_region::get_contours;
//! use maskseg_core::BinaryMask;
//!
//! let mask = BinaryMask::from_fn(10, 10, |x, y| (2..6).contains(&x) && (3..7).contains(&y)).unwrap();
//! let contours = get_contours(&mask).unwrap();
//! assert_eq!(contours.len(), 1);
//! assert_eq!(contours[0].len(), 4);
//! ```

pub mod conncomp;
pub mod contour;
pub mod distance;
pub mod error;
pub mod seedfill;
pub mod watershed;

// Re-export core types
pub use maskseg_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

pub use conncomp::{
    ComponentLabels, ConnectedComponent, ConnectivityType, find_connected_components,
    label_connected_components,
};

pub use contour::{Contour, ContourApproximation, Direction, get_contours, get_contours_with};

pub use distance::{
    ChamferDistance, DistanceField, DistanceMetric, DistanceTransform, EuclideanDistance,
};

pub use seedfill::{RegionGrowingParams, region_growing};

pub use watershed::{
    LabelMap, PriorityFlood, Watershed, WatershedOptions, WatershedParams, auto_markers,
    manual_markers, watershed_segmentation, watershed_segmentation_with,
};
