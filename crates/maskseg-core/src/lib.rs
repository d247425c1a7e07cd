//! maskseg core - image and mask containers
//!
//! This crate provides the data model shared by every segmentation engine:
//!
//! - [`GrayImage`] / [`GrayImageMut`] - 8-bit grayscale source image
//! - [`RgbImage`] / [`RgbImageMut`] - interleaved color image for input and overlays
//! - [`BinaryMask`] - two-valued (0/255) segmentation result
//! - [`Point`] / [`Box`] - pixel coordinates and rectangles
//! - [`Seed`] - seed points, optionally tagged foreground/background
//! - [`Color`] - RGB color with alpha blending

pub mod color;
pub mod error;
pub mod geometry;
pub mod image;
pub mod mask;
pub mod seed;

pub use color::Color;
pub use error::{Error, Result};
pub use geometry::{Box, Point};
pub use image::convert::rgb_to_gray;
pub use image::{
    GrayImage, GrayImageMut, RgbImage, RgbImageMut, generate_filled_circle_points,
    generate_line_points, generate_polyline_points,
};
pub use mask::BinaryMask;
pub use seed::{Seed, SeedClass};
