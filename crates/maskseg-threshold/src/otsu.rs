//! Otsu's automatic threshold selection
//!
//! For every candidate cut `t` in `[0, 255]` the histogram is split into
//! class 0 (intensities `< t`) and class 1 (intensities `>= t`), and the
//! between-class variance `w0 * w1 * (mu0 - mu1)^2` is evaluated. The
//! lowest `t` reaching the maximum wins. Class 1 is the foreground.

use crate::binarize::check_not_empty;
use crate::ThresholdResult;
use log::debug;
use maskseg_core::{BinaryMask, GrayImage};

/// Compute the 256-bin intensity histogram.
pub fn gray_histogram(image: &GrayImage) -> [u64; 256] {
    let mut hist = [0u64; 256];
    for &v in image.data() {
        hist[v as usize] += 1;
    }
    hist
}

/// Select the Otsu cut from a histogram.
///
/// Returns 0 when fewer than two intensities are present (no split has
/// two non-empty classes).
pub fn otsu_from_histogram(hist: &[u64; 256]) -> u8 {
    let total: u64 = hist.iter().sum();
    if total == 0 {
        return 0;
    }
    let total_f = total as f64;
    let sum_all: f64 = hist
        .iter()
        .enumerate()
        .map(|(v, &n)| v as f64 * n as f64)
        .sum();

    let mut best_t = 0u8;
    let mut best_var = 0.0f64;
    let mut n0 = 0u64;
    let mut s0 = 0.0f64;

    // Class 0 grows by bin t-1 when moving to cut t
    for t in 1..=255usize {
        n0 += hist[t - 1];
        s0 += (t - 1) as f64 * hist[t - 1] as f64;
        let n1 = total - n0;
        if n0 == 0 || n1 == 0 {
            continue;
        }
        let w0 = n0 as f64 / total_f;
        let w1 = n1 as f64 / total_f;
        let mu0 = s0 / n0 as f64;
        let mu1 = (sum_all - s0) / n1 as f64;
        let var = w0 * w1 * (mu0 - mu1) * (mu0 - mu1);
        if var > best_var {
            best_var = var;
            best_t = t as u8;
        }
    }
    best_t
}

/// Compute the Otsu threshold of an image.
///
/// # Errors
///
/// Returns [`ThresholdError::EmptyInput`](crate::ThresholdError::EmptyInput)
/// for a zero-sized image.
pub fn compute_otsu_threshold(image: &GrayImage) -> ThresholdResult<u8> {
    check_not_empty(image)?;
    let t = otsu_from_histogram(&gray_histogram(image));
    debug!(
        "otsu threshold {} for {}x{} image",
        t,
        image.width(),
        image.height()
    );
    Ok(t)
}

/// Binarize with the Otsu threshold.
///
/// Foreground is class 1, the pixels with intensity `>= t*`. When the
/// image has a single intensity (`t* == 0`) the cut falls back to
/// `intensity > 0`.
pub fn threshold_otsu(image: &GrayImage) -> ThresholdResult<BinaryMask> {
    let t = compute_otsu_threshold(image)?;
    let cut = t.max(1);
    Ok(BinaryMask::from_image_predicate(image, |v| v >= cut))
}
