//! Distance transforms of binary masks
//!
//! For every foreground pixel, the distance to the nearest background
//! pixel of the same mask; background pixels get 0. Pixels beyond the
//! image edge are not background. A mask without any background pixel
//! yields `f32::INFINITY` everywhere.
//!
//! Two implementations are provided behind the [`DistanceTransform`] trait:
//!
//! - [`EuclideanDistance`]: exact, separable lower-envelope algorithm of
//!   Felzenszwalb and Huttenlocher, O(n) per row and column
//! - [`ChamferDistance`]: two-pass 3x3 chamfer approximation

use crate::error::RegionResult;
use maskseg_core::BinaryMask;
use serde::{Deserialize, Serialize};

/// Stand-in for infinity inside the squared-distance envelope.
///
/// Finite so the parabola intersections stay well defined.
const FAR: f64 = 1e20;

/// Row-major field of per-pixel distances
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl DistanceField {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Distance at (x, y), or `None` out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }

    /// Largest distance, or 0 for an empty field.
    pub fn max(&self) -> f32 {
        self.data.iter().copied().fold(0.0, f32::max)
    }

    /// Rescale to `[0, 1]` by min-max normalization.
    ///
    /// A constant or unbounded field normalizes to all zeros.
    pub fn normalized(&self) -> DistanceField {
        let (min, max) = self
            .data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &d| (lo.min(d), hi.max(d)));
        let range = max - min;
        let data = if range.is_finite() && range > 0.0 {
            self.data.iter().map(|&d| (d - min) / range).collect()
        } else {
            vec![0.0; self.data.len()]
        };
        DistanceField {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Mask of the pixels whose distance is strictly greater than `threshold`.
    pub fn above(&self, threshold: f32) -> RegionResult<BinaryMask> {
        let data = self.data.iter().map(|&d| u8::from(d > threshold)).collect();
        Ok(BinaryMask::from_raw(self.width, self.height, data)?)
    }
}

/// A distance transform of a binary mask
pub trait DistanceTransform {
    /// Compute the distance of each foreground pixel to the background.
    fn transform(&self, mask: &BinaryMask) -> DistanceField;
}

/// Exact Euclidean distance transform
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl DistanceTransform for EuclideanDistance {
    fn transform(&self, mask: &BinaryMask) -> DistanceField {
        let (width, height) = mask.dimensions();
        let (w, h) = (width as usize, height as usize);

        let mut sq: Vec<f64> = (0..mask.len())
            .map(|i| if mask.is_foreground_index(i) { FAR } else { 0.0 })
            .collect();

        let n = w.max(h);
        let mut f = vec![0.0f64; n];
        let mut d = vec![0.0f64; n];
        let mut v = vec![0usize; n];
        let mut z = vec![0.0f64; n + 1];

        for x in 0..w {
            for y in 0..h {
                f[y] = sq[y * w + x];
            }
            lower_envelope(&f[..h], &mut d[..h], &mut v, &mut z);
            for y in 0..h {
                sq[y * w + x] = d[y];
            }
        }

        for y in 0..h {
            let row = &mut sq[y * w..(y + 1) * w];
            f[..w].copy_from_slice(row);
            lower_envelope(&f[..w], &mut d[..w], &mut v, &mut z);
            row.copy_from_slice(&d[..w]);
        }

        let data = sq
            .into_iter()
            .map(|s| if s >= FAR / 2.0 { f32::INFINITY } else { s.sqrt() as f32 })
            .collect();
        DistanceField {
            width,
            height,
            data,
        }
    }
}

/// 1-D squared distance transform of sampled function `f` into `d`.
///
/// `v` and `z` are scratch buffers of at least `f.len()` and
/// `f.len() + 1` elements.
fn lower_envelope(f: &[f64], d: &mut [f64], v: &mut [usize], z: &mut [f64]) {
    let n = f.len();
    if n == 0 {
        return;
    }

    let intersect = |q: usize, p: usize| {
        let (qf, pf) = (q as f64, p as f64);
        ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * qf - 2.0 * pf)
    };

    let mut k = 0usize;
    v[0] = 0;
    z[0] = f64::NEG_INFINITY;
    z[1] = f64::INFINITY;
    for q in 1..n {
        let mut s = intersect(q, v[k]);
        while k > 0 && s <= z[k] {
            k -= 1;
            s = intersect(q, v[k]);
        }
        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = f64::INFINITY;
    }

    k = 0;
    for (q, out) in d.iter_mut().enumerate().take(n) {
        while z[k + 1] < q as f64 {
            k += 1;
        }
        let dq = q as f64 - v[k] as f64;
        *out = dq * dq + f[v[k]];
    }
}

/// 3x3 chamfer distance
///
/// Axial and diagonal step costs default to the weights that minimize the
/// maximum error against the Euclidean distance.
#[derive(Debug, Clone, Copy)]
pub struct ChamferDistance {
    /// Cost of a horizontal or vertical step
    pub axial: f32,
    /// Cost of a diagonal step
    pub diagonal: f32,
}

impl Default for ChamferDistance {
    fn default() -> Self {
        Self {
            axial: 0.955,
            diagonal: 1.3693,
        }
    }
}

impl DistanceTransform for ChamferDistance {
    fn transform(&self, mask: &BinaryMask) -> DistanceField {
        let (width, height) = mask.dimensions();
        let (w, h) = (width as i64, height as i64);
        let mut data: Vec<f32> = (0..mask.len())
            .map(|i| if mask.is_foreground_index(i) { f32::INFINITY } else { 0.0 })
            .collect();

        let (a, b) = (self.axial, self.diagonal);
        let forward = [(-1, 0, a), (-1, -1, b), (0, -1, a), (1, -1, b)];
        let backward = [(1, 0, a), (1, 1, b), (0, 1, a), (-1, 1, b)];

        let relax = |x: i64, y: i64, steps: &[(i64, i64, f32); 4], data: &mut [f32]| {
            let idx = (y * w + x) as usize;
            let mut best = data[idx];
            for &(dx, dy, cost) in steps {
                let (nx, ny) = (x + dx, y + dy);
                if nx >= 0 && ny >= 0 && nx < w && ny < h {
                    best = best.min(data[(ny * w + nx) as usize] + cost);
                }
            }
            data[idx] = best;
        };

        for y in 0..h {
            for x in 0..w {
                relax(x, y, &forward, &mut data);
            }
        }
        for y in (0..h).rev() {
            for x in (0..w).rev() {
                relax(x, y, &backward, &mut data);
            }
        }

        DistanceField {
            width,
            height,
            data,
        }
    }
}

/// Selectable distance metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Exact Euclidean distance
    #[default]
    Euclidean,
    /// 3x3 chamfer approximation
    Chamfer,
}

impl DistanceTransform for DistanceMetric {
    fn transform(&self, mask: &BinaryMask) -> DistanceField {
        match self {
            DistanceMetric::Euclidean => EuclideanDistance.transform(mask),
            DistanceMetric::Chamfer => ChamferDistance::default().transform(mask),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hole_at_center() -> BinaryMask {
        BinaryMask::from_fn(5, 5, |x, y| (x, y) != (2, 2)).unwrap()
    }

    #[test]
    fn test_euclidean_exact() {
        let field = EuclideanDistance.transform(&hole_at_center());
        assert_eq!(field.get(2, 2), Some(0.0));
        assert_eq!(field.get(3, 2), Some(1.0));
        assert!((field.get(0, 0).unwrap() - 8f32.sqrt()).abs() < 1e-6);
        assert!((field.get(4, 3).unwrap() - 5f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_euclidean_row() {
        let mask = BinaryMask::from_fn(7, 1, |x, _| x != 0 && x != 6).unwrap();
        let field = EuclideanDistance.transform(&mask);
        assert_eq!(field.data(), &[0.0, 1.0, 2.0, 3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_no_background_is_infinite() {
        let mask = BinaryMask::from_fn(3, 3, |_, _| true).unwrap();
        let field = EuclideanDistance.transform(&mask);
        assert!(field.data().iter().all(|d| d.is_infinite()));
        assert!(field.normalized().data().iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_chamfer_steps() {
        let field = ChamferDistance::default().transform(&hole_at_center());
        assert_eq!(field.get(2, 2), Some(0.0));
        assert!((field.get(3, 2).unwrap() - 0.955).abs() < 1e-6);
        assert!((field.get(3, 3).unwrap() - 1.3693).abs() < 1e-6);
        assert!((field.get(4, 2).unwrap() - 1.91).abs() < 1e-5);
    }

    #[test]
    fn test_normalize_and_threshold() {
        let mask = BinaryMask::from_fn(7, 1, |x, _| x != 0 && x != 6).unwrap();
        let norm = EuclideanDistance.transform(&mask).normalized();
        assert!((norm.get(3, 0).unwrap() - 1.0).abs() < 1e-6);
        let core = norm.above(0.5).unwrap();
        // 2/3 and 1 pass, 1/3 does not
        assert_eq!(core.data(), &[0, 0, 255, 255, 255, 0, 0]);
    }
}
