//! Adaptive (local) thresholding
//!
//! Each pixel is compared against the mean of its `block_size x
//! block_size` neighborhood minus a constant `c`. The neighborhood mean is
//! either a plain box average or a Gaussian-weighted average; both are
//! computed separably with replicated borders.

use crate::binarize::{check_max_value, check_not_empty};
use crate::{ThresholdError, ThresholdResult};
use log::debug;
use maskseg_core::{BinaryMask, GrayImage};
use serde::{Deserialize, Serialize};

/// Method for computing the local statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptiveMethod {
    /// Use mean of local window
    Mean,
    /// Use Gaussian-weighted mean
    #[default]
    Gaussian,
}

/// Parameters for adaptive thresholding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveParams {
    /// Side of the square neighborhood; odd and at least 3
    pub block_size: u32,
    /// Constant subtracted from the local mean
    pub c: f64,
    pub max_value: f64,
    pub invert: bool,
    /// Local statistic; `adaptive_method` in serialized form
    #[serde(rename = "adaptive_method")]
    pub method: AdaptiveMethod,
}

impl Default for AdaptiveParams {
    fn default() -> Self {
        Self {
            block_size: 11,
            c: 2.0,
            max_value: 255.0,
            invert: false,
            method: AdaptiveMethod::Gaussian,
        }
    }
}

impl AdaptiveParams {
    pub fn with_block_size(mut self, block_size: u32) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
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

    pub fn with_method(mut self, method: AdaptiveMethod) -> Self {
        self.method = method;
        self
    }

    fn validate(&self) -> ThresholdResult<()> {
        if self.block_size < 3 || self.block_size % 2 == 0 {
            return Err(ThresholdError::InvalidParameter(format!(
                "block_size must be odd and >= 3, got {}",
                self.block_size
            )));
        }
        if !self.c.is_finite() {
            return Err(ThresholdError::InvalidParameter(format!(
                "c must be finite, got {}",
                self.c
            )));
        }
        Ok(())
    }
}

/// Normalized 1-D Gaussian kernel of odd length `size`.
///
/// Sizes 3, 5 and 7 use fixed tabulated kernels; larger sizes use
/// `sigma = 0.3 * ((size - 1) / 2 - 1) + 0.8`.
pub fn gaussian_kernel(size: u32) -> Vec<f64> {
    match size {
        1 => return vec![1.0],
        3 => return vec![0.25, 0.5, 0.25],
        5 => return vec![0.0625, 0.25, 0.375, 0.25, 0.0625],
        7 => {
            return vec![
                0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
            ];
        }
        _ => {}
    }

    let sigma = 0.3 * ((f64::from(size) - 1.0) * 0.5 - 1.0) + 0.8;
    let scale = -0.5 / (sigma * sigma);
    let center = f64::from(size / 2);
    let mut kernel: Vec<f64> = (0..size)
        .map(|i| {
            let d = f64::from(i) - center;
            (scale * d * d).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

/// Separable weighted sum with replicated borders, divided by `norm`.
fn local_mean(image: &GrayImage, kernel: &[f64], norm: f64) -> Vec<f64> {
    let w = image.width() as usize;
    let h = image.height() as usize;
    let r = (kernel.len() / 2) as isize;
    let data = image.data();

    let clamp = |v: isize, n: usize| v.clamp(0, n as isize - 1) as usize;

    let mut horiz = vec![0.0f64; w * h];
    for y in 0..h {
        let row = &data[y * w..(y + 1) * w];
        for x in 0..w {
            let mut acc = 0.0;
            for (k, &wt) in kernel.iter().enumerate() {
                let sx = clamp(x as isize + k as isize - r, w);
                acc += wt * f64::from(row[sx]);
            }
            horiz[y * w + x] = acc;
        }
    }

    let mut out = vec![0.0f64; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for (k, &wt) in kernel.iter().enumerate() {
                let sy = clamp(y as isize + k as isize - r, h);
                acc += wt * horiz[sy * w + x];
            }
            out[y * w + x] = acc / norm;
        }
    }
    out
}

/// Binarize each pixel against its local mean minus `c`.
///
/// A pixel is foreground iff `intensity > local - c`. With `invert` set
/// the result is the exact complement, `intensity <= local - c`.
///
/// # Errors
///
/// - [`ThresholdError::EmptyInput`] for a zero-sized image
/// - [`ThresholdError::InvalidParameter`] for an even or too small
///   `block_size`, a non-finite `c`, or `max_value` outside `[0, 255]`
pub fn adaptive_threshold(image: &GrayImage, params: &AdaptiveParams) -> ThresholdResult<BinaryMask> {
    check_not_empty(image)?;
    params.validate()?;
    if !check_max_value(params.max_value)? {
        return Ok(BinaryMask::for_image(image));
    }

    // Box sums stay integral in f64, so the mean of a flat region is exact
    let local = match params.method {
        AdaptiveMethod::Mean => {
            let bs = params.block_size as usize;
            local_mean(image, &vec![1.0; bs], (bs * bs) as f64)
        }
        AdaptiveMethod::Gaussian => local_mean(image, &gaussian_kernel(params.block_size), 1.0),
    };

    let data = image.data();
    let c = params.c;
    let mut mask = BinaryMask::for_image(image);
    for (i, (&v, &m)) in data.iter().zip(&local).enumerate() {
        let cut = m - c;
        let fg = if params.invert {
            f64::from(v) <= cut
        } else {
            f64::from(v) > cut
        };
        if fg {
            mask.set_index(i, true);
        }
    }

    debug!(
        "adaptive {:?} threshold (block {}, c {}): {} of {} pixels foreground",
        params.method,
        params.block_size,
        c,
        mask.foreground_count(),
        mask.len()
    );
    Ok(mask)
}
