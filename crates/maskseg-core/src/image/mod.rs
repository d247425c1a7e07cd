//! Grayscale image container
//!
//! [`GrayImage`] is the source of truth handed to every segmentation
//! engine: `width * height` 8-bit intensities, row-major, one byte per
//! pixel.
//!
//! # Ownership model
//!
//! `GrayImage` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to [`GrayImageMut`] via
//! [`GrayImage::try_into_mut`] or [`GrayImage::to_mut`], then convert
//! back with `Into<GrayImage>`.
//!
//! # Empty images
//!
//! A zero-width or zero-height image is representable so that a decoder
//! handing over an empty buffer does not fail at construction. The
//! segmentation engines reject such images with a typed error.

pub mod convert;
pub mod graphics;
pub mod rgb;

pub use graphics::{generate_filled_circle_points, generate_line_points, generate_polyline_points};
pub use rgb::{RgbImage, RgbImageMut};

use crate::error::{Error, Result};
use std::sync::Arc;

/// Compute the byte length of a `width x height x channels` buffer.
///
/// Uses u64 arithmetic so that oversized dimensions fail instead of
/// wrapping.
pub(crate) fn buffer_len(width: u32, height: u32, channels: u32) -> Result<usize> {
    let len = u64::from(width) * u64::from(height) * u64::from(channels);
    usize::try_from(len).map_err(|_| {
        Error::InvalidParameter(format!(
            "image {width}x{height}x{channels} exceeds addressable memory"
        ))
    })
}

pub(crate) fn check_buffer(width: u32, height: u32, channels: u32, actual: usize) -> Result<()> {
    let expected = buffer_len(width, height, channels)?;
    if expected != actual {
        return Err(Error::BufferSizeMismatch {
            width,
            height,
            channels,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Internal image data
#[derive(Debug, Clone, PartialEq, Eq)]
struct GrayData {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Single-channel 8-bit image
///
/// # Examples
///
/// ```
/// use maskseg_core::GrayImage;
///
/// let img = GrayImage::from_raw(3, 2, vec![0, 10, 20, 30, 40, 50]).unwrap();
/// assert_eq!(img.get_pixel(1, 1), Some(40));
/// assert_eq!(img.get_pixel(3, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    inner: Arc<GrayData>,
}

impl GrayImage {
    /// Create a new image with every sample set to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the buffer would not fit in memory.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = buffer_len(width, height, 1)?;
        Ok(Self::from_parts(width, height, vec![0u8; len]))
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `data.len() != width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_buffer(width, height, 1, data.len())?;
        Ok(Self::from_parts(width, height, data))
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u8) -> Result<Self> {
        let len = buffer_len(width, height, 1)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Ok(Self::from_parts(width, height, data))
    }

    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        GrayImage {
            inner: Arc::new(GrayData {
                width,
                height,
                data,
            }),
        }
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.data.len()
    }

    /// True if the image has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.data.is_empty()
    }

    /// Get raw access to the row-major samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Check whether a (possibly negative) coordinate lies inside the image.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.inner.width) && y < i64::from(self.inner.height)
    }

    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.inner.width && y < self.inner.height {
            Some(self.get_pixel_unchecked(x, y))
        } else {
            None
        }
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.inner.data[y as usize * self.inner.width as usize + x as usize]
    }

    /// Get the number of strong references to the shared data.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<GrayImageMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(GrayImageMut { inner: data }),
            Err(arc) => Err(GrayImage { inner: arc }),
        }
    }

    /// Create a mutable copy of this image.
    pub fn to_mut(&self) -> GrayImageMut {
        GrayImageMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable grayscale image
///
/// Convert back to an immutable [`GrayImage`] using `Into<GrayImage>`.
#[derive(Debug)]
pub struct GrayImageMut {
    inner: GrayData,
}

impl GrayImageMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get a pixel value at (x, y).
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.inner.width && y < self.inner.height {
            Some(self.inner.data[y as usize * self.inner.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                x: i64::from(x),
                y: i64::from(y),
                width: self.inner.width,
                height: self.inner.height,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u8) {
        let idx = y as usize * self.inner.width as usize + x as usize;
        self.inner.data[idx] = val;
    }
}

impl From<GrayImageMut> for GrayImage {
    fn from(img: GrayImageMut) -> Self {
        GrayImage {
            inner: Arc::new(img.inner),
        }
    }
}
