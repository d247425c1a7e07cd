//! Deterministic synthetic inputs for tests
//!
//! Everything here is a pure function of its arguments, so regression
//! expectations stay stable across runs and platforms.

use maskseg_core::{BinaryMask, Box, GrayImage};

/// Linear congruential generator for reproducible randomness
///
/// Uses the 64-bit multiplier and increment from Numerical Recipes.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    /// Uniform value in `[0, 1)` built from the high 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `[0, n)`; `n` must be nonzero.
    pub fn next_below(&mut self, n: u32) -> u32 {
        ((self.next_u64() >> 32) % u64::from(n)) as u32
    }
}

/// Random mask where each pixel is foreground with probability `density`.
pub fn random_mask(width: u32, height: u32, density: f64, seed: u64) -> BinaryMask {
    let mut rng = Lcg::new(seed);
    BinaryMask::from_fn(width, height, |_, _| rng.next_f64() < density)
        .expect("fixture dimensions fit in memory")
}

/// Mask with exactly the pixels of `rect` set (clipped to the mask).
pub fn filled_rect_mask(width: u32, height: u32, rect: Box) -> BinaryMask {
    BinaryMask::from_fn(width, height, |x, y| {
        rect.contains_point((x as i32, y as i32).into())
    })
    .expect("fixture dimensions fit in memory")
}

/// Image of intensity `fg` inside `rect` and `bg` elsewhere.
pub fn rect_image(width: u32, height: u32, bg: u8, fg: u8, rect: Box) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        if rect.contains_point((x as i32, y as i32).into()) {
            fg
        } else {
            bg
        }
    })
    .expect("fixture dimensions fit in memory")
}

/// Image whose left half is `low` and right half is `high`.
///
/// With an even width both clusters have the same pixel count.
pub fn bimodal_image(width: u32, height: u32, low: u8, high: u8) -> GrayImage {
    GrayImage::from_fn(width, height, |x, _| if x < width / 2 { low } else { high })
        .expect("fixture dimensions fit in memory")
}

/// Add uniform integer noise in `[-amplitude, amplitude]`, saturating.
pub fn add_noise(image: &GrayImage, amplitude: u8, seed: u64) -> GrayImage {
    let mut rng = Lcg::new(seed);
    let span = 2 * u32::from(amplitude) + 1;
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let v = i32::from(image.get_pixel_unchecked(x, y));
        let delta = rng.next_below(span) as i32 - i32::from(amplitude);
        (v + delta).clamp(0, 255) as u8
    })
    .expect("fixture dimensions fit in memory")
}

/// Horizontal ramp: intensity `x * 255 / (width - 1)`.
pub fn ramp_image(width: u32, height: u32) -> GrayImage {
    let denom = width.saturating_sub(1).max(1);
    GrayImage::from_fn(width, height, |x, _| (x * 255 / denom) as u8)
        .expect("fixture dimensions fit in memory")
}
