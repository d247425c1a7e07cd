//! Binary morphological operations
//!
//! Implements erosion, dilation, opening, and closing for [`BinaryMask`].
//!
//! Pixels outside the mask take no part in either operation: dilation
//! treats them as background and erosion as foreground. Erosion and
//! dilation with the same SEL are then adjoint, so opening and closing are
//! idempotent and the open-close filter is idempotent for every mask.

use crate::{MorphError, MorphResult, Sel};
use maskseg_core::BinaryMask;

/// Dilate a binary mask by row shift-and-OR
///
/// For each hit `(dx, dy)` of the SEL, the source is shifted by that
/// offset and OR-accumulated into the output:
/// `dest[y][x] |= src[y - dy][x - dx]`.
pub fn dilate(mask: &BinaryMask, sel: &Sel) -> MorphResult<BinaryMask> {
    check_sel(sel)?;
    let w = mask.width() as usize;
    let h = mask.height() as i32;
    let src = mask.data();
    let mut dst = vec![BinaryMask::BACKGROUND; src.len()];

    for (dx, dy) in sel.hit_offsets() {
        for y in 0..h {
            let sy = y - dy;
            if sy < 0 || sy >= h {
                continue;
            }
            let d = y as usize * w;
            let s = sy as usize * w;
            shift_or_row(&mut dst[d..d + w], &src[s..s + w], dx);
        }
    }

    Ok(BinaryMask::from_raw(mask.width(), mask.height(), dst)?)
}

/// Erode a binary mask by row shift-and-AND
///
/// For each hit `(dx, dy)`: `dest[y][x] &= src[y + dy][x + dx]`, skipping
/// source positions outside the mask.
pub fn erode(mask: &BinaryMask, sel: &Sel) -> MorphResult<BinaryMask> {
    check_sel(sel)?;
    let w = mask.width() as usize;
    let h = mask.height() as i32;
    let src = mask.data();
    let mut dst = vec![BinaryMask::FOREGROUND; src.len()];

    for (dx, dy) in sel.hit_offsets() {
        for y in 0..h {
            let sy = y + dy;
            if sy < 0 || sy >= h {
                continue;
            }
            let d = y as usize * w;
            let s = sy as usize * w;
            shift_and_row(&mut dst[d..d + w], &src[s..s + w], dx);
        }
    }

    Ok(BinaryMask::from_raw(mask.width(), mask.height(), dst)?)
}

/// Open a binary mask
///
/// Opening = Erosion followed by Dilation.
/// Removes small foreground objects and smooths contours.
pub fn open(mask: &BinaryMask, sel: &Sel) -> MorphResult<BinaryMask> {
    let eroded = erode(mask, sel)?;
    dilate(&eroded, sel)
}

/// Close a binary mask
///
/// Closing = Dilation followed by Erosion.
/// Fills small holes and connects nearby objects.
pub fn close(mask: &BinaryMask, sel: &Sel) -> MorphResult<BinaryMask> {
    let dilated = dilate(mask, sel)?;
    erode(&dilated, sel)
}

/// Dilate `iterations` times in a row.
///
/// Zero iterations returns a copy of the input.
pub fn dilate_iter(mask: &BinaryMask, sel: &Sel, iterations: u32) -> MorphResult<BinaryMask> {
    let mut out = mask.clone();
    for _ in 0..iterations {
        out = dilate(&out, sel)?;
    }
    Ok(out)
}

/// OR `src` shifted right by `shift` into `dst`: `dst[x] |= src[x - shift]`.
fn shift_or_row(dst: &mut [u8], src: &[u8], shift: i32) {
    let n = dst.len();
    let k = shift.unsigned_abs() as usize;
    if k >= n {
        return;
    }
    if shift >= 0 {
        for (d, &s) in dst[k..].iter_mut().zip(&src[..n - k]) {
            *d |= s;
        }
    } else {
        for (d, &s) in dst[..n - k].iter_mut().zip(&src[k..]) {
            *d |= s;
        }
    }
}

/// AND `src` shifted left by `shift` into `dst`: `dst[x] &= src[x + shift]`.
///
/// Positions whose source lies outside the row are left unchanged.
fn shift_and_row(dst: &mut [u8], src: &[u8], shift: i32) {
    let n = dst.len();
    let k = shift.unsigned_abs() as usize;
    if k >= n {
        return;
    }
    if shift >= 0 {
        for (d, &s) in dst[..n - k].iter_mut().zip(&src[k..]) {
            *d &= s;
        }
    } else {
        for (d, &s) in dst[k..].iter_mut().zip(&src[..n - k]) {
            *d &= s;
        }
    }
}

fn check_sel(sel: &Sel) -> MorphResult<()> {
    if sel.hit_count() == 0 {
        return Err(MorphError::InvalidSel("sel has no hits".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(rows: &[&str]) -> BinaryMask {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        BinaryMask::from_fn(w, h, |x, y| rows[y as usize].as_bytes()[x as usize] == b'x').unwrap()
    }

    fn square() -> Sel {
        Sel::create_square(3).unwrap()
    }

    #[test]
    fn test_dilate_single_pixel() {
        let m = mask(&[".....", ".....", "..x..", ".....", "....."]);
        let d = dilate(&m, &square()).unwrap();
        assert_eq!(
            d,
            mask(&[".....", ".xxx.", ".xxx.", ".xxx.", "....."])
        );
        let c = dilate(&m, &Sel::create_cross(3).unwrap()).unwrap();
        assert_eq!(c.foreground_count(), 5);
    }

    #[test]
    fn test_erode_ignores_outside() {
        // A full mask is unchanged: there is no background to erode from
        let full = BinaryMask::from_fn(4, 3, |_, _| true).unwrap();
        assert_eq!(erode(&full, &square()).unwrap(), full);

        let m = mask(&["xxx..", "xxx..", "xxx.."]);
        let e = erode(&m, &square()).unwrap();
        assert_eq!(e, mask(&["xx...", "xx...", "xx..."]));
    }

    #[test]
    fn test_asymmetric_sel_direction() {
        // Hits at offsets (0,0) and (1,0)
        let sel = Sel::from_string("xx", 0, 0).unwrap();
        let m = mask(&["..x.."]);
        assert_eq!(dilate(&m, &sel).unwrap(), mask(&["..xx."]));
        let m = mask(&["..xx."]);
        assert_eq!(erode(&m, &sel).unwrap(), mask(&["..x.."]));
    }

    #[test]
    fn test_open_removes_speck_close_fills_hole() {
        let m = mask(&[
            "x......", ".......", "..xxx..", "..xxx..", "..xxx..", ".......",
        ]);
        let o = open(&m, &square()).unwrap();
        assert_eq!(o.foreground_count(), 9);
        assert_eq!(o.get(0, 0), Some(false));

        let holed = mask(&["xxxxx", "xxxxx", "xx.xx", "xxxxx", "xxxxx"]);
        let c = close(&holed, &square()).unwrap();
        assert_eq!(c.foreground_count(), 25);
    }

    #[test]
    fn test_dilate_iter() {
        let m = mask(&[".......", ".......", ".......", "...x...", ".......", ".......", "......."]);
        assert_eq!(dilate_iter(&m, &square(), 0).unwrap(), m);
        assert_eq!(dilate_iter(&m, &square(), 3).unwrap().foreground_count(), 49);
        assert_eq!(dilate_iter(&m, &square(), 2).unwrap().foreground_count(), 25);
    }

    #[test]
    fn test_empty_sel_rejected() {
        let sel = Sel::new(3, 3).unwrap();
        let m = mask(&["x"]);
        assert!(matches!(erode(&m, &sel), Err(MorphError::InvalidSel(_))));
    }
}
