//! Mask cleanup applied to every segmentation result
//!
//! Opening with a 3x3 ellipse drops isolated foreground specks, then
//! closing with the same element fills single-pixel holes and notches.

use crate::binary::{close, open};
use crate::{MorphResult, Sel};
use log::debug;
use maskseg_core::BinaryMask;

/// The 3x3 elliptical element (a cross) used for cleanup
pub fn cleanup_sel() -> MorphResult<Sel> {
    Sel::create_ellipse(3, 3)
}

/// Open then close `mask` with the 3x3 ellipse.
///
/// The result is a fixed point: `post_process(post_process(m)) ==
/// post_process(m)` for every mask.
pub fn post_process(mask: &BinaryMask) -> MorphResult<BinaryMask> {
    post_process_with(mask, &cleanup_sel()?)
}

/// Open then close `mask` with a caller-supplied element.
pub fn post_process_with(mask: &BinaryMask, sel: &Sel) -> MorphResult<BinaryMask> {
    if mask.is_empty() {
        return Ok(mask.clone());
    }
    let opened = open(mask, sel)?;
    let closed = close(&opened, sel)?;
    debug!(
        "post-process: {} -> {} foreground pixels",
        mask.foreground_count(),
        closed.foreground_count()
    );
    Ok(closed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speck_and_hole() {
        let m = BinaryMask::from_fn(12, 12, |x, y| {
            let in_block = (2..10).contains(&x) && (2..10).contains(&y);
            let hole = (x, y) == (6, 6);
            let speck = (x, y) == (0, 11);
            (in_block && !hole) || speck
        })
        .unwrap();
        let p = post_process(&m).unwrap();
        assert_eq!(p.get(0, 11), Some(false));
        assert_eq!(p.get(6, 6), Some(true));
        // Opening with a cross clips the four block corners, closing
        // cannot restore them
        assert_eq!(p.foreground_count(), 64 - 4);
    }

    #[test]
    fn test_clean_mask_is_fixed_point() {
        let m = BinaryMask::from_fn(9, 9, |x, y| (2..7).contains(&x) && (1..8).contains(&y)).unwrap();
        let once = post_process(&m).unwrap();
        assert_eq!(post_process(&once).unwrap(), once);
    }

    #[test]
    fn test_empty_mask_passes_through() {
        let m = BinaryMask::new(0, 4).unwrap();
        assert_eq!(post_process(&m).unwrap(), m);
    }
}
