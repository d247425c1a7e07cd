//! Segmentation dispatch regression test
//!
//! Run with:
//! ```
//! cargo test -p maskseg --test segment_reg
//! ```

use maskseg::morph::post_process;
use maskseg::region::{RegionGrowingParams, WatershedOptions, WatershedParams, region_growing, watershed_segmentation};
use maskseg::threshold::{
    AdaptiveMethod, AdaptiveParams, ThresholdParams, adaptive_threshold, threshold_otsu, threshold_to_binary,
};
use maskseg::{
    BinaryMask, Box, GrayImage, Point, RgbImage, SegmentError, SegmentationMethod, SegmentationParams,
    segment, segment_rgb,
};
use maskseg_test::RegParams;
use maskseg_test::fixtures::{add_noise, bimodal_image, filled_rect_mask, ramp_image, rect_image};

#[test]
fn segment_dispatch_reg() {
    let mut rp = RegParams::new("segment_dispatch");

    let img = add_noise(&rect_image(48, 40, 50, 190, Box::new_unchecked(10, 8, 24, 20)), 6, 3);

    // Each method equals its engine followed by the cleanup pass
    let cases: Vec<(SegmentationParams, BinaryMask)> = vec![
        (
            SegmentationParams::Threshold(ThresholdParams::default()),
            threshold_to_binary(&img, &ThresholdParams::default()).unwrap(),
        ),
        (SegmentationParams::Otsu, threshold_otsu(&img).unwrap()),
        (
            SegmentationParams::Adaptive(AdaptiveParams::default()),
            adaptive_threshold(&img, &AdaptiveParams::default()).unwrap(),
        ),
        (
            SegmentationParams::Adaptive(AdaptiveParams::default().with_method(AdaptiveMethod::Mean)),
            adaptive_threshold(&img, &AdaptiveParams::default().with_method(AdaptiveMethod::Mean)).unwrap(),
        ),
        (
            SegmentationParams::RegionGrowing(RegionGrowingParams::new([Point::new(20, 18)])),
            region_growing(&img, &RegionGrowingParams::new([Point::new(20, 18)])).unwrap(),
        ),
        (
            SegmentationParams::Watershed(WatershedParams::default()),
            watershed_segmentation(&img, &WatershedParams::default(), &WatershedOptions::default()).unwrap(),
        ),
    ];
    for (params, raw) in &cases {
        let mask = segment(&img, params).unwrap();
        rp.compare_masks(&post_process(raw).unwrap(), &mask);
    }

    // Threshold and Otsu both recover the rectangle less its corners
    let rect = Box::new_unchecked(10, 8, 24, 20);
    let expected = post_process(&filled_rect_mask(48, 40, rect)).unwrap();
    rp.compare_masks(&expected, &segment(&img, &SegmentationParams::Otsu).unwrap());
    rp.compare_masks(
        &expected,
        &segment(&img, &SegmentationParams::Threshold(ThresholdParams::default())).unwrap(),
    );
    rp.compare_values((24 * 20 - 4) as f64, expected.foreground_count() as f64, 0.0);

    // Region growing from inside the rectangle stays in it
    let grown = segment(
        &img,
        &SegmentationParams::RegionGrowing(RegionGrowingParams::new([Point::new(20, 18)]).with_tolerance(15.0)),
    )
    .unwrap();
    rp.compare_masks(&expected, &grown);
    rp.write_mask(&grown).unwrap();

    // Color input goes through luma first
    let rgb = RgbImage::from_gray(&img);
    rp.compare_masks(
        &segment(&img, &SegmentationParams::Otsu).unwrap(),
        &segment_rgb(&rgb, &SegmentationParams::Otsu).unwrap(),
    );

    assert!(rp.cleanup());
}

#[test]
fn segment_errors_reg() {
    let mut rp = RegParams::new("segment_errors");
    let img = bimodal_image(20, 20, 10, 200);

    let check = |rp: &mut RegParams, expected: SegmentError, got: Result<BinaryMask, SegmentError>| {
        let same = got.err() == Some(expected);
        rp.compare_values(1.0, f64::from(u8::from(same)), 0.0);
    };

    let even = SegmentationParams::Adaptive(AdaptiveParams::default().with_block_size(10));
    let err = segment(&img, &even).unwrap_err();
    rp.compare_values(1.0, f64::from(u8::from(matches!(err, SegmentError::InvalidParameter(_)))), 0.0);

    let tiny = SegmentationParams::Adaptive(AdaptiveParams::default().with_block_size(1));
    rp.compare_values(
        1.0,
        f64::from(u8::from(matches!(segment(&img, &tiny), Err(SegmentError::InvalidParameter(_))))),
        0.0,
    );

    check(
        &mut rp,
        SegmentError::NoSeeds,
        segment(&img, &SegmentationMethod::RegionGrowing.into()),
    );
    check(
        &mut rp,
        SegmentError::NoMarkers,
        segment(&img, &SegmentationParams::Watershed(WatershedParams::manual([], []))),
    );
    check(
        &mut rp,
        SegmentError::EmptyInput,
        segment(&GrayImage::new(5, 0).unwrap(), &SegmentationParams::Otsu),
    );

    // Seeds outside the image are parameter errors
    let outside = SegmentationParams::RegionGrowing(RegionGrowingParams::new([Point::new(20, 0)]));
    rp.compare_values(
        1.0,
        f64::from(u8::from(matches!(segment(&img, &outside), Err(SegmentError::InvalidParameter(_))))),
        0.0,
    );
    let outside = SegmentationParams::Watershed(WatershedParams::manual([Point::new(-1, 4)], []));
    rp.compare_values(
        1.0,
        f64::from(u8::from(matches!(segment(&img, &outside), Err(SegmentError::InvalidParameter(_))))),
        0.0,
    );

    // Zero tolerance is valid and degenerate
    let zero = SegmentationParams::RegionGrowing(RegionGrowingParams::new([Point::new(0, 0)]).with_tolerance(0.0));
    let noisy = add_noise(&ramp_image(20, 20), 8, 1);
    rp.compare_values(1.0, f64::from(u8::from(segment(&noisy, &zero).is_ok())), 0.0);

    assert!(rp.cleanup());
}

#[test]
fn segment_json_reg() {
    let mut rp = RegParams::new("segment_json");
    let img = bimodal_image(30, 20, 40, 160);

    let json = r#"{"method": "threshold", "threshold": 100}"#;
    let params = SegmentationParams::from_json(json).unwrap();
    rp.compare_values(1.0, f64::from(u8::from(params.method() == SegmentationMethod::Threshold)), 0.0);
    let right_half = filled_rect_mask(30, 20, Box::new_unchecked(15, 0, 15, 20));
    rp.compare_masks(&right_half, &segment(&img, &params).unwrap());

    let json = r#"{"method": "threshold", "threshold": 100, "invert": true}"#;
    let params = SegmentationParams::from_json(json).unwrap();
    rp.compare_masks(&right_half.invert(), &segment(&img, &params).unwrap());

    let json = r#"{"method": "region_growing", "seeds": [{"x": 20, "y": 5}], "tolerance": 5, "connectivity": 4}"#;
    let params = SegmentationParams::from_json(json).unwrap();
    rp.compare_masks(&right_half, &segment(&img, &params).unwrap());

    let json = r#"{"method": "watershed", "use_distance_transform": false,
                   "foreground_seeds": [{"x": 25, "y": 10}], "background_seeds": [{"x": 3, "y": 10}]}"#;
    let params = SegmentationParams::from_json(json).unwrap();
    rp.compare_values(1.0, f64::from(u8::from(params.method() == SegmentationMethod::Watershed)), 0.0);
    let mask = segment(&img, &params).unwrap();
    rp.compare_values(1.0, f64::from(u8::from(mask.is_foreground(25, 10))), 0.0);
    rp.compare_values(0.0, f64::from(u8::from(mask.is_foreground(3, 10))), 0.0);

    let bad = SegmentationParams::from_json(r#"{"method": "graph_cut"}"#);
    rp.compare_values(
        1.0,
        f64::from(u8::from(matches!(bad, Err(SegmentError::InvalidParameter(_))))),
        0.0,
    );

    assert!(rp.cleanup());
}
