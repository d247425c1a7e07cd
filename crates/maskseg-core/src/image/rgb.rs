//! Three-channel color image
//!
//! Samples are interleaved `R, G, B` bytes, row-major. Used as the input
//! of color sources and as the output of overlay rendering.

use super::{buffer_len, check_buffer};
use crate::color::Color;
use crate::error::{Error, Result};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
struct RgbData {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Interleaved 8-bit RGB image
///
/// Shares its buffer through `Arc` like [`GrayImage`](super::GrayImage).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    inner: Arc<RgbData>,
}

impl RgbImage {
    /// Create a new black image.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = buffer_len(width, height, 3)?;
        Ok(Self::from_parts(width, height, vec![0u8; len]))
    }

    /// Wrap an existing interleaved RGB buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `data.len() != width * height * 3`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_buffer(width, height, 3, data.len())?;
        Ok(Self::from_parts(width, height, data))
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Color) -> Result<Self> {
        let len = buffer_len(width, height, 3)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                let c = f(x, y);
                data.extend_from_slice(&[c.r, c.g, c.b]);
            }
        }
        Ok(Self::from_parts(width, height, data))
    }

    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        RgbImage {
            inner: Arc::new(RgbData {
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

    /// True if the image has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.data.is_empty()
    }

    /// Get the interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the color at (x, y), or `None` out of bounds.
    #[inline]
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        let i = (y as usize * self.inner.width as usize + x as usize) * 3;
        let d = &self.inner.data;
        Some(Color::new(d[i], d[i + 1], d[i + 2]))
    }

    /// Try to get mutable access without copying.
    pub fn try_into_mut(self) -> std::result::Result<RgbImageMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RgbImageMut { inner: data }),
            Err(arc) => Err(RgbImage { inner: arc }),
        }
    }

    /// Create a mutable copy of this image.
    pub fn to_mut(&self) -> RgbImageMut {
        RgbImageMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable RGB image
#[derive(Debug)]
pub struct RgbImageMut {
    inner: RgbData,
}

impl RgbImageMut {
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

    /// Get the color at (x, y).
    #[inline]
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        let i = (y as usize * self.inner.width as usize + x as usize) * 3;
        let d = &self.inner.data;
        Some(Color::new(d[i], d[i + 1], d[i + 2]))
    }

    /// Set the color at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgb(&mut self, x: u32, y: u32, color: Color) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                x: i64::from(x),
                y: i64::from(y),
                width: self.inner.width,
                height: self.inner.height,
            });
        }
        let i = (y as usize * self.inner.width as usize + x as usize) * 3;
        self.inner.data[i..i + 3].copy_from_slice(&[color.r, color.g, color.b]);
        Ok(())
    }

    /// Blend `color` into the pixel at (x, y) with weight `fract`.
    ///
    /// Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, fract: f32) {
        if x < 0 || y < 0 || x as u32 >= self.inner.width || y as u32 >= self.inner.height {
            return;
        }
        let i = (y as usize * self.inner.width as usize + x as usize) * 3;
        let d = &mut self.inner.data;
        let base = Color::new(d[i], d[i + 1], d[i + 2]);
        let out = base.blend(color, fract);
        d[i..i + 3].copy_from_slice(&[out.r, out.g, out.b]);
    }
}

impl From<RgbImageMut> for RgbImage {
    fn from(img: RgbImageMut) -> Self {
        RgbImage {
            inner: Arc::new(img.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_access() {
        let mut img = RgbImage::new(2, 1).unwrap().try_into_mut().unwrap();
        img.set_rgb(1, 0, Color::new(1, 2, 3)).unwrap();
        let img: RgbImage = img.into();
        assert_eq!(img.data(), &[0, 0, 0, 1, 2, 3]);
        assert_eq!(img.get_rgb(1, 0), Some(Color::new(1, 2, 3)));
        assert_eq!(img.get_rgb(2, 0), None);
    }

    #[test]
    fn test_blend_pixel_clips() {
        let mut img = RgbImage::new(1, 1).unwrap().to_mut();
        img.blend_pixel(-1, 0, Color::WHITE, 1.0);
        img.blend_pixel(0, 0, Color::WHITE, 0.5);
        assert_eq!(img.get_rgb(0, 0), Some(Color::new(128, 128, 128)));
    }
}
