//! Overlay rendering regression test
//!
//! Run with:
//! ```
//! cargo test -p maskseg --test overlay_reg
//! ```

use maskseg::{
    Box, Color, GrayImage, OverlayOptions, RgbImage, SegmentError, draw_segmentation, draw_segmentation_rgb,
    draw_segmentation_with,
};
use maskseg_test::RegParams;
use maskseg_test::fixtures::{filled_rect_mask, random_mask, ramp_image};

#[test]
fn overlay_reg() {
    let mut rp = RegParams::new("overlay");

    let img = ramp_image(40, 30);
    let rgb = RgbImage::from_gray(&img);
    let mask = random_mask(40, 30, 0.4, 8);

    // alpha = 0 leaves the image untouched
    let out = draw_segmentation(&img, &mask, 0.0).unwrap();
    rp.compare_rgb(&rgb, &out);

    // alpha = 1 paints every foreground pixel and nothing else
    let out = draw_segmentation(&img, &mask, 1.0).unwrap();
    let mut painted_ok = true;
    for y in 0..30 {
        for x in 0..40 {
            let expected = if mask.get(x, y) == Some(true) {
                Color::RED
            } else {
                rgb.get_rgb(x, y).unwrap()
            };
            painted_ok &= out.get_rgb(x, y) == Some(expected);
        }
    }
    rp.compare_values(1.0, f64::from(u8::from(painted_ok)), 0.0);
    rp.write_rgb(&out).unwrap();

    // Intermediate alpha: background untouched, outline stronger than fill
    let black = GrayImage::new(12, 12).unwrap();
    let square = filled_rect_mask(12, 12, Box::new_unchecked(2, 2, 8, 8));
    let out = draw_segmentation(&black, &square, 0.5).unwrap();
    rp.compare_values(1.0, f64::from(u8::from(out.get_rgb(0, 0) == Some(Color::BLACK))), 0.0);
    rp.compare_values(
        1.0,
        f64::from(u8::from(out.get_rgb(5, 5) == Some(Color::new(128, 0, 0)))),
        0.0,
    );
    // 0.7071 * 255 + 0.2929 * 128 = 217.8
    rp.compare_values(
        1.0,
        f64::from(u8::from(out.get_rgb(2, 5) == Some(Color::new(218, 0, 0)))),
        0.0,
    );
    rp.write_rgb(&out).unwrap();

    // Without outlines the whole square has the fill color
    let opts = OverlayOptions::default().with_outline(false);
    let out = draw_segmentation_with(&RgbImage::from_gray(&black), &square, 0.5, &opts).unwrap();
    rp.compare_values(
        1.0,
        f64::from(u8::from(out.get_rgb(2, 5) == Some(Color::new(128, 0, 0)))),
        0.0,
    );

    // Color input keeps its channels outside the mask
    let color = RgbImage::from_fn(12, 12, |x, y| Color::new((x * 20) as u8, (y * 20) as u8, 77)).unwrap();
    let out = draw_segmentation_rgb(&color, &square, 0.3).unwrap();
    rp.compare_values(1.0, f64::from(u8::from(out.get_rgb(11, 0) == color.get_rgb(11, 0))), 0.0);

    // Invalid alpha and mismatched sizes
    for alpha in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
        let res = draw_segmentation(&img, &mask, alpha);
        rp.compare_values(
            1.0,
            f64::from(u8::from(matches!(res, Err(SegmentError::InvalidParameter(_))))),
            0.0,
        );
    }
    let res = draw_segmentation(&black, &mask, 0.5);
    rp.compare_values(
        1.0,
        f64::from(u8::from(matches!(res, Err(SegmentError::InvalidParameter(_))))),
        0.0,
    );

    assert!(rp.cleanup());
}
