//! Two-valued segmentation mask
//!
//! Every engine produces a [`BinaryMask`] with the dimensions of its source
//! image. Samples are restricted to [`BinaryMask::BACKGROUND`] (0) and
//! [`BinaryMask::FOREGROUND`] (255); the constructors normalize any nonzero
//! byte to 255 so the invariant cannot be broken from outside.

use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::image::{GrayImage, buffer_len, check_buffer};

/// Binary foreground/background mask, row-major, one byte per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl BinaryMask {
    /// Sample value of a foreground pixel
    pub const FOREGROUND: u8 = 255;
    /// Sample value of a background pixel
    pub const BACKGROUND: u8 = 0;

    /// Create an all-background mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the buffer would not fit in memory.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = buffer_len(width, height, 1)?;
        Ok(Self {
            width,
            height,
            data: vec![Self::BACKGROUND; len],
        })
    }

    /// Create an all-background mask with the dimensions of `image`.
    pub fn for_image(image: &GrayImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: vec![Self::BACKGROUND; image.len()],
        }
    }

    /// Wrap a row-major buffer, mapping every nonzero byte to foreground.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `data.len() != width * height`.
    pub fn from_raw(width: u32, height: u32, mut data: Vec<u8>) -> Result<Self> {
        check_buffer(width, height, 1, data.len())?;
        for v in &mut data {
            if *v != Self::BACKGROUND {
                *v = Self::FOREGROUND;
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Result<Self> {
        let len = buffer_len(width, height, 1)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(if f(x, y) {
                    Self::FOREGROUND
                } else {
                    Self::BACKGROUND
                });
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a mask from a per-pixel predicate over a flat index.
    pub(crate) fn from_index_fn(width: u32, height: u32, len: usize, f: impl Fn(usize) -> bool) -> Self {
        let data = (0..len)
            .map(|i| if f(i) { Self::FOREGROUND } else { Self::BACKGROUND })
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Mask of the pixels of `image` selected by `pred`.
    pub fn from_image_predicate(image: &GrayImage, pred: impl Fn(u8) -> bool) -> Self {
        let data = image.data();
        Self::from_index_fn(image.width(), image.height(), data.len(), |i| pred(data[i]))
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

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the mask has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw row-major samples, each 0 or 255.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the mask and return its samples.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Get the state of pixel (x, y), or `None` out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x < self.width && y < self.height {
            Some(self.data[y as usize * self.width as usize + x as usize] != Self::BACKGROUND)
        } else {
            None
        }
    }

    /// True if (x, y) is inside the mask and foreground.
    #[inline]
    pub fn is_foreground(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && (x as u32) < self.width
            && (y as u32) < self.height
            && self.data[y as usize * self.width as usize + x as usize] != Self::BACKGROUND
    }

    /// Foreground test by flat row-major index.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= len()`.
    #[inline]
    pub fn is_foreground_index(&self, idx: usize) -> bool {
        self.data[idx] != Self::BACKGROUND
    }

    /// Set pixel (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set(&mut self, x: u32, y: u32, foreground: bool) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x: i64::from(x),
                y: i64::from(y),
                width: self.width,
                height: self.height,
            });
        }
        self.set_index(y as usize * self.width as usize + x as usize, foreground);
        Ok(())
    }

    /// Set a pixel by flat row-major index.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= len()`.
    #[inline]
    pub fn set_index(&mut self, idx: usize, foreground: bool) {
        self.data[idx] = if foreground {
            Self::FOREGROUND
        } else {
            Self::BACKGROUND
        };
    }

    /// Count foreground pixels.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != Self::BACKGROUND).count()
    }

    /// Swap foreground and background.
    pub fn invert(&self) -> BinaryMask {
        let data = self.data.iter().map(|&v| !v).collect();
        BinaryMask {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Iterate over foreground pixel positions in row-major order.
    pub fn foreground_points(&self) -> impl Iterator<Item = Point> + '_ {
        let w = self.width as usize;
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != Self::BACKGROUND)
            .map(move |(i, _)| Point::new((i % w) as i32, (i / w) as i32))
    }

    /// Check that `other` has the same dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] otherwise.
    pub fn check_same_size(&self, width: u32, height: u32) -> Result<()> {
        if (self.width, self.height) != (width, height) {
            return Err(Error::DimensionMismatch {
                expected: (width, height),
                actual: (self.width, self.height),
            });
        }
        Ok(())
    }

    /// View the mask as a grayscale image (0/255 samples).
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_parts(self.width, self.height, self.data.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_normalizes() {
        let m = BinaryMask::from_raw(3, 1, vec![0, 1, 200]).unwrap();
        assert_eq!(m.data(), &[0, 255, 255]);
        assert_eq!(m.foreground_count(), 2);
    }

    #[test]
    fn test_invert_and_points() {
        let m = BinaryMask::from_fn(3, 2, |x, y| x == y).unwrap();
        let pts: Vec<Point> = m.foreground_points().collect();
        assert_eq!(pts, vec![Point::new(0, 0), Point::new(1, 1)]);

        let inv = m.invert();
        assert_eq!(inv.foreground_count(), 4);
        assert!(!inv.is_foreground(1, 1));
        assert!(inv.is_foreground(2, 1));
        assert_eq!(inv.invert(), m);
    }

    #[test]
    fn test_bounds() {
        let mut m = BinaryMask::new(2, 2).unwrap();
        assert!(m.set(2, 0, true).is_err());
        assert!(!m.is_foreground(-1, 0));
        assert_eq!(m.get(0, 2), None);
        m.set(1, 0, true).unwrap();
        assert_eq!(m.get(1, 0), Some(true));
    }

    #[test]
    fn test_size_check() {
        let m = BinaryMask::new(4, 3).unwrap();
        assert!(m.check_same_size(4, 3).is_ok());
        assert!(matches!(
            m.check_same_size(3, 4),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
