//! maskseg-morph - Binary morphology for segmentation masks
//!
//! This crate provides:
//!
//! - Structuring elements (SEL): bricks, crosses, ellipses, disks
//! - Binary morphology: erosion, dilation, opening, closing
//! - [`post_process`]: the open-then-close cleanup every engine applies

pub mod binary;
mod error;
pub mod postprocess;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use sel::{Sel, SelElement};

pub use binary::{close, dilate, dilate_iter, erode, open};
pub use postprocess::{cleanup_sel, post_process, post_process_with};
