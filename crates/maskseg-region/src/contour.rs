//! Outer contour tracing
//!
//! Each 8-connected foreground component contributes one contour: the
//! ordered pixels of its outer border, traversed clockwise (in image
//! coordinates) from the component's first pixel in raster order. Holes
//! are not traced.
//!
//! Tracing follows the border by keeping a background reference position
//! `qpos` next to the current pixel and scanning the 8 neighbors clockwise
//! from it. The walk stops when it is about to repeat its first step.

use crate::conncomp::{ConnectivityType, find_connected_components};
use crate::error::RegionResult;
use maskseg_core::{BinaryMask, Box, Point};
use serde::{Deserialize, Serialize};

/// Direction for border traversal (8-connected, clockwise from West)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// West (-1, 0)
    West = 0,
    /// Northwest (-1, -1)
    NorthWest = 1,
    /// North (0, -1)
    North = 2,
    /// Northeast (1, -1)
    NorthEast = 3,
    /// East (1, 0)
    East = 4,
    /// Southeast (1, 1)
    SouthEast = 5,
    /// South (0, 1)
    South = 6,
    /// Southwest (-1, 1)
    SouthWest = 7,
}

/// X offset for each direction
const XPOSTAB: [i32; 8] = [-1, -1, 0, 1, 1, 1, 0, -1];

/// Y offset for each direction
const YPOSTAB: [i32; 8] = [0, -1, -1, -1, 0, 1, 1, 1];

/// Background reference after a step in each direction, relative to the
/// new pixel
const QPOSTAB: [usize; 8] = [6, 6, 0, 0, 2, 2, 4, 4];

/// `DIRTAB[1 + dy][1 + dx]` gives the direction index
const DIRTAB: [[i32; 3]; 3] = [[1, 2, 3], [0, -1, 4], [7, 6, 5]];

impl Direction {
    /// Get the x offset for this direction
    #[inline]
    pub fn dx(self) -> i32 {
        XPOSTAB[self as usize]
    }

    /// Get the y offset for this direction
    #[inline]
    pub fn dy(self) -> i32 {
        YPOSTAB[self as usize]
    }

    /// Get direction from x,y offsets
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        if dx.abs() > 1 || dy.abs() > 1 {
            return None;
        }
        match DIRTAB[(1 + dy) as usize][(1 + dx) as usize] {
            0 => Some(Direction::West),
            1 => Some(Direction::NorthWest),
            2 => Some(Direction::North),
            3 => Some(Direction::NorthEast),
            4 => Some(Direction::East),
            5 => Some(Direction::SouthEast),
            6 => Some(Direction::South),
            7 => Some(Direction::SouthWest),
            _ => None,
        }
    }
}

/// How many border pixels a contour keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContourApproximation {
    /// Every border pixel
    None,
    /// Only the end points of straight horizontal, vertical and diagonal runs
    #[default]
    Simple,
}

/// One traced outer border
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contour {
    points: Vec<Point>,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest box covering every point
    pub fn bounding_box(&self) -> Option<Box> {
        Box::bounding(&self.points)
    }

    /// Steps between consecutive points, including the closing step back
    /// to the first point.
    ///
    /// Non-adjacent consecutive points (after approximation) have no
    /// single-step direction and are skipped.
    pub fn chain_code(&self) -> Vec<Direction> {
        if self.points.len() < 2 {
            return Vec::new();
        }
        let n = self.points.len();
        (0..n)
            .filter_map(|i| {
                let (a, b) = (self.points[i], self.points[(i + 1) % n]);
                Direction::from_offset(b.x - a.x, b.y - a.y)
            })
            .collect()
    }
}

/// Find the next border pixel clockwise from `qpos` around `p`.
///
/// Returns the pixel and the new background reference.
fn next_border_pixel(mask: &BinaryMask, p: Point, qpos: usize) -> Option<(Point, usize)> {
    (1..8).map(|i| (qpos + i) % 8).find_map(|pos| {
        let np = p.offset(XPOSTAB[pos], YPOSTAB[pos]);
        mask.is_foreground(np.x, np.y).then_some((np, QPOSTAB[pos]))
    })
}

/// Trace the outer border starting at `first`, whose west neighbor must
/// be background.
fn trace_outer_border(mask: &BinaryMask, first: Point) -> Vec<Point> {
    let Some((second, mut qpos)) = next_border_pixel(mask, first, 0) else {
        return vec![first];
    };

    let mut points = vec![first, second];
    let mut current = second;
    // Every border pixel is entered at most once from each of its 8 sides
    let max_steps = 8 * mask.len();
    for _ in 0..max_steps {
        let Some((next, q)) = next_border_pixel(mask, current, qpos) else {
            break;
        };
        if current == first && next == second {
            break;
        }
        points.push(next);
        current = next;
        qpos = q;
    }

    // The walk ends back on the first pixel
    if points.len() > 2 && points.last() == Some(&first) {
        points.pop();
    }
    points
}

/// Keep only the points where the step direction changes, treating the
/// contour as closed.
fn approximate_simple(points: Vec<Point>) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points;
    }
    let step = |a: Point, b: Point| (b.x - a.x, b.y - a.y);
    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect()
}

/// Outer contours of all 8-connected components, simple approximation.
///
/// An empty mask yields no contours.
pub fn get_contours(mask: &BinaryMask) -> RegionResult<Vec<Contour>> {
    get_contours_with(mask, ContourApproximation::Simple)
}

/// Outer contours of all 8-connected components.
///
/// Contours are ordered by the raster position of each component's
/// first pixel.
pub fn get_contours_with(mask: &BinaryMask, approximation: ContourApproximation) -> RegionResult<Vec<Contour>> {
    let components = find_connected_components(mask, ConnectivityType::EightWay)?;
    let contours = components
        .iter()
        .map(|comp| {
            let border = trace_outer_border(mask, comp.start);
            let points = match approximation {
                ContourApproximation::None => border,
                ContourApproximation::Simple => approximate_simple(border),
            };
            Contour::new(points)
        })
        .collect();
    Ok(contours)
}
