//! Pipeline regression test
//!
//! Chains of transforms through the facade, including the default
//! document-scan processing, checked against the individual operations.

use dokumon::filter::{blur, convolve_kernel};
use dokumon::remap::apply_color_filter;
use dokumon::{ColorFilter, KernelType, Pipeline, PixelBuffer, Transform, color};
use dokumon_test::{RegParams, synthetic};

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");

    let frame = synthetic::color_ramp(48, 36);

    // --- Test 1: Document scan equals binary then blur kernel ---
    let scanned = Pipeline::document_scan().apply(&frame);
    let manual = convolve_kernel(
        &apply_color_filter(&frame, ColorFilter::Binary),
        KernelType::Blur,
    );
    rp.compare_pix(&manual, &scanned);
    rp.compare_values(frame.width() as f64, scanned.width() as f64, 0.0);
    rp.compare_values(frame.height() as f64, scanned.height() as f64, 0.0);

    // Output stays gray: binarized before blurring
    let gray = scanned.pixels().iter().all(|&p| {
        let (r, g, b) = color::extract_rgb(p);
        r == g && g == b
    });
    rp.compare_values(1.0, if gray { 1.0 } else { 0.0 }, 0.0);

    // --- Test 2: Each stage matches its standalone function ---
    let stages = [
        Transform::Color(ColorFilter::Grayscale),
        Transform::Convolve(KernelType::Edge),
        Transform::Blur { radius: 2.0 },
        Transform::Identity,
    ];
    let pipeline: Pipeline = stages.into_iter().collect();
    let by_hand = blur(
        &convolve_kernel(
            &apply_color_filter(&frame, ColorFilter::Grayscale),
            KernelType::Edge,
        ),
        2.0,
    );
    rp.compare_pix(&by_hand, &pipeline.apply(&frame));
    rp.compare_values(4.0, pipeline.len() as f64, 0.0);

    // --- Test 3: Selectors from the capture app's integer codes ---
    let from_codes = Pipeline::new()
        .then(ColorFilter::from_code(ColorFilter::BINARY_CODE))
        .then(KernelType::from_code(KernelType::BLUR_CODE));
    rp.compare_pix(&scanned, &from_codes.apply(&frame));

    // Unknown codes make every stage a copy
    let unknown = Pipeline::new()
        .then(ColorFilter::from_code(9))
        .then(KernelType::from_code(-4));
    rp.compare_pix(&frame, &unknown.apply(&frame));

    // --- Test 4: The input frame is never modified ---
    let before: PixelBuffer = frame.deep_clone();
    let _ = Pipeline::document_scan()
        .then(Transform::Blur { radius: 5.0 })
        .apply(&frame);
    rp.compare_pix(&before, &frame);

    // --- Test 5: Binary output of a scan is idempotent ---
    let binary = Pipeline::new().then(ColorFilter::Binary);
    let once = binary.apply(&frame);
    rp.compare_pix(&once, &binary.apply(&once));

    assert!(rp.cleanup(), "pipeline regression test failed");
}
