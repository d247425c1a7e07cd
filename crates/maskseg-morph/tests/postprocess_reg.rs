//! Mask post-processing regression test
//!
//! Run with:
//! ```
//! cargo test -p maskseg-morph --test postprocess_reg
//! ```

use maskseg_core::Box;
use maskseg_morph::{Sel, close, dilate, erode, open, post_process};
use maskseg_test::RegParams;
use maskseg_test::fixtures::{filled_rect_mask, random_mask};

#[test]
fn postprocess_reg() {
    let mut rp = RegParams::new("postprocess");

    // Idempotence on noisy masks of several densities
    for (i, density) in [0.05, 0.3, 0.5, 0.7, 0.95].into_iter().enumerate() {
        let m = random_mask(37, 23, density, 1000 + i as u64);
        let once = post_process(&m).unwrap();
        let twice = post_process(&once).unwrap();
        rp.compare_masks(&once, &twice);
        if i == 2 {
            rp.write_mask(&m).unwrap();
            rp.write_mask(&once).unwrap();
        }
    }

    // A large rectangle only loses its four corners
    let rect = filled_rect_mask(40, 30, Box::new_unchecked(5, 5, 20, 12));
    let cleaned = post_process(&rect).unwrap();
    rp.compare_values(240.0 - 4.0, cleaned.foreground_count() as f64, 0.0);

    // Rectangle touching the image border keeps its border pixels
    let edge = filled_rect_mask(20, 20, Box::new_unchecked(0, 0, 8, 20));
    let cleaned = post_process(&edge).unwrap();
    rp.compare_masks(&edge, &cleaned);

    assert!(rp.cleanup());
}

#[test]
fn binmorph_reg() {
    let mut rp = RegParams::new("binmorph");

    let m = random_mask(31, 17, 0.6, 7);
    for sel in [
        Sel::create_square(3).unwrap(),
        Sel::create_ellipse(5, 5).unwrap(),
        Sel::create_disk(2).unwrap(),
    ] {
        // Duality for symmetric elements
        let e = erode(&m, &sel).unwrap();
        let d = dilate(&m.invert(), &sel).unwrap().invert();
        rp.compare_masks(&e, &d);

        // Opening is anti-extensive, closing extensive, both idempotent
        let o = open(&m, &sel).unwrap();
        let c = close(&m, &sel).unwrap();
        let o_in_m = o.foreground_points().all(|p| m.is_foreground(p.x, p.y));
        let m_in_c = m.foreground_points().all(|p| c.is_foreground(p.x, p.y));
        rp.compare_values(1.0, if o_in_m && m_in_c { 1.0 } else { 0.0 }, 0.0);
        rp.compare_masks(&o, &open(&o, &sel).unwrap());
        rp.compare_masks(&c, &close(&c, &sel).unwrap());
    }

    assert!(rp.cleanup());
}
