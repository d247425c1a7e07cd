//! Connected component analysis
//!
//! Pixel adjacency used throughout the region crate, plus labeling of the
//! foreground components of a [`BinaryMask`]. Labeling is a breadth-first
//! flood per component, scanning seeds in row-major order so labels are
//! assigned in the order components are first met.

use crate::error::{RegionError, RegionResult};
use maskseg_core::{BinaryMask, Box, Point};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

const FOUR_NEIGHBORS: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

const EIGHT_NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Connectivity type for component analysis
///
/// Serialized as the neighbor count, `4` or `8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

impl ConnectivityType {
    /// Neighbor offsets `(dx, dy)` in row-major order.
    #[inline]
    pub fn neighbors(self) -> &'static [(i32, i32)] {
        match self {
            ConnectivityType::FourWay => &FOUR_NEIGHBORS,
            ConnectivityType::EightWay => &EIGHT_NEIGHBORS,
        }
    }
}

impl TryFrom<u8> for ConnectivityType {
    type Error = RegionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(ConnectivityType::FourWay),
            8 => Ok(ConnectivityType::EightWay),
            other => Err(RegionError::InvalidParameter(format!(
                "connectivity must be 4 or 8, got {other}"
            ))),
        }
    }
}

impl From<ConnectivityType> for u8 {
    fn from(conn: ConnectivityType) -> Self {
        match conn {
            ConnectivityType::FourWay => 4,
            ConnectivityType::EightWay => 8,
        }
    }
}

/// Iterate the in-bounds neighbors of `idx` in a `width x height` grid,
/// yielding flat indices.
#[inline]
pub(crate) fn neighbor_indices(
    idx: usize,
    width: u32,
    height: u32,
    connectivity: ConnectivityType,
) -> impl Iterator<Item = usize> {
    let w = width as usize;
    let x = (idx % w) as i32;
    let y = (idx / w) as i32;
    connectivity.neighbors().iter().filter_map(move |&(dx, dy)| {
        let (nx, ny) = (x + dx, y + dy);
        if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
            None
        } else {
            Some(ny as usize * w + nx as usize)
        }
    })
}

/// A connected component in a mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Label, starting at 1
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: Box,
    /// First pixel of the component in row-major order
    pub start: Point,
}

/// Per-pixel component labels
///
/// Label 0 is background.
#[derive(Debug, Clone)]
pub struct ComponentLabels {
    width: u32,
    height: u32,
    labels: Vec<u32>,
    components: Vec<ConnectedComponent>,
}

impl ComponentLabels {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Label at (x, y), or `None` out of bounds.
    pub fn label_at(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.labels[y as usize * self.width as usize + x as usize])
    }

    /// Row-major label buffer.
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    pub fn components(&self) -> &[ConnectedComponent] {
        &self.components
    }

    /// Number of components.
    pub fn count(&self) -> usize {
        self.components.len()
    }

    /// Mask holding only the pixels of component `label`.
    pub fn component_mask(&self, label: u32) -> RegionResult<BinaryMask> {
        if label == 0 || label as usize > self.components.len() {
            return Err(RegionError::InvalidParameter(format!(
                "component label {label} not in 1..={}",
                self.components.len()
            )));
        }
        let mask = BinaryMask::from_raw(
            self.width,
            self.height,
            self.labels.iter().map(|&l| u8::from(l == label)).collect(),
        )?;
        Ok(mask)
    }
}

/// Label all foreground components of a mask.
pub fn label_connected_components(
    mask: &BinaryMask,
    connectivity: ConnectivityType,
) -> RegionResult<ComponentLabels> {
    let (width, height) = mask.dimensions();
    let w = width as usize;
    let mut labels = vec![0u32; mask.len()];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..mask.len() {
        if !mask.is_foreground_index(start) || labels[start] != 0 {
            continue;
        }

        let label = components.len() as u32 + 1;
        let start_pt = Point::new((start % w) as i32, (start / w) as i32);
        let mut bounds = Box::new_unchecked(start_pt.x, start_pt.y, 1, 1);
        let mut pixel_count = 0u32;

        labels[start] = label;
        queue.push_back(start);
        while let Some(idx) = queue.pop_front() {
            pixel_count += 1;
            bounds.include_point(Point::new((idx % w) as i32, (idx / w) as i32));
            for n in neighbor_indices(idx, width, height, connectivity) {
                if labels[n] == 0 && mask.is_foreground_index(n) {
                    labels[n] = label;
                    queue.push_back(n);
                }
            }
        }

        components.push(ConnectedComponent {
            label,
            pixel_count,
            bounds,
            start: start_pt,
        });
    }

    Ok(ComponentLabels {
        width,
        height,
        labels,
        components,
    })
}

/// Find all connected components in a mask
///
/// Returns each component's label, pixel count, bounding box and first
/// pixel in row-major order.
pub fn find_connected_components(
    mask: &BinaryMask,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    Ok(label_connected_components(mask, connectivity)?.components)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal_pair() -> BinaryMask {
        BinaryMask::from_fn(4, 4, |x, y| (x, y) == (0, 0) || (x, y) == (1, 1)).unwrap()
    }

    #[test]
    fn test_connectivity_changes_count() {
        let mask = diagonal_pair();
        assert_eq!(find_connected_components(&mask, ConnectivityType::FourWay).unwrap().len(), 2);
        assert_eq!(find_connected_components(&mask, ConnectivityType::EightWay).unwrap().len(), 1);
    }

    #[test]
    fn test_component_stats() {
        let mask = BinaryMask::from_fn(10, 8, |x, y| (2..5).contains(&x) && (3..7).contains(&y)).unwrap();
        let comps = find_connected_components(&mask, ConnectivityType::FourWay).unwrap();
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].pixel_count, 12);
        assert_eq!(comps[0].bounds, Box::new_unchecked(2, 3, 3, 4));
        assert_eq!(comps[0].start, Point::new(2, 3));
    }

    #[test]
    fn test_labels_and_component_mask() {
        let mask = BinaryMask::from_fn(5, 1, |x, _| x != 2).unwrap();
        let labels = label_connected_components(&mask, ConnectivityType::EightWay).unwrap();
        assert_eq!(labels.labels(), &[1, 1, 0, 2, 2]);
        let second = labels.component_mask(2).unwrap();
        assert_eq!(second.foreground_count(), 2);
        assert!(labels.component_mask(3).is_err());
    }

    #[test]
    fn test_connectivity_from_u8() {
        assert_eq!(ConnectivityType::try_from(8).unwrap(), ConnectivityType::EightWay);
        assert!(ConnectivityType::try_from(6).is_err());
        assert_eq!(u8::from(ConnectivityType::FourWay), 4);
    }
}
