mod common;

use approx::assert_abs_diff_eq;
use ndarray::Array3;

use common::*;
use cropsight_core::color::hsv::HsvRange;
use cropsight_core::error::MetricError;
use cropsight_core::frame::Frame;
use cropsight_core::profile::CropProfile;
use cropsight_core::quality::status::{HealthStatus, NoiseStatus};
use cropsight_core::quality::{
    brightness, color_coverage, contrast, extract_metrics, health_ratio, noise_level, sharpness,
    spectral_focus, texture_variance,
};

#[test]
fn test_uniform_gray_is_flat() {
    let frame = uniform(32, 32, MID_GRAY);
    assert_abs_diff_eq!(brightness(&frame).unwrap(), 128.0, epsilon = 1e-3);
    assert_abs_diff_eq!(contrast(&frame).unwrap(), 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(sharpness(&frame).unwrap(), 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(texture_variance(&frame).unwrap(), 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(noise_level(&frame).unwrap(), 0.0, epsilon = 1e-6);
}

#[test]
fn test_brightness_uses_bt601_weights() {
    let red = uniform(8, 8, [255, 0, 0]);
    let green = uniform(8, 8, [0, 255, 0]);
    assert_abs_diff_eq!(brightness(&red).unwrap(), 0.299 * 255.0, epsilon = 1e-2);
    assert_abs_diff_eq!(brightness(&green).unwrap(), 0.587 * 255.0, epsilon = 1e-2);
}

#[test]
fn test_contrast_of_two_tone_frame() {
    let frame = checkerboard(16, 16, [0, 0, 0], [200, 200, 200]);
    // Half the pixels at 0 and half at 200: population std is 100.
    assert_abs_diff_eq!(contrast(&frame).unwrap(), 100.0, epsilon = 1e-2);
}

#[test]
fn test_sharp_beats_blurry() {
    let sharp = checkerboard(32, 32, [0, 0, 0], [255, 255, 255]);
    let data = Array3::from_shape_fn((32, 32, 3), |(row, col, _)| ((row + col) * 4) as u8);
    let blurry = Frame::new(data);

    let s = sharpness(&sharp).unwrap();
    let b = sharpness(&blurry).unwrap();
    assert!(s > b, "Sharp frame ({s}) should score higher than gradient ({b})");
}

#[test]
fn test_full_crop_color_coverage() {
    let frame = uniform(16, 16, LEAF_GREEN);
    let crop = CropProfile::default();
    assert_abs_diff_eq!(color_coverage(&frame, &crop.color_range).unwrap(), 1.0);

    let gray = uniform(16, 16, MID_GRAY);
    assert_abs_diff_eq!(color_coverage(&gray, &crop.color_range).unwrap(), 0.0);
}

#[test]
fn test_coverage_range_is_inclusive() {
    // Pure green: hue 60, saturation 255, value 255.
    let frame = uniform(4, 4, [0, 255, 0]);
    let exact = HsvRange::new([60, 255, 255], [60, 255, 255]);
    assert_abs_diff_eq!(color_coverage(&frame, &exact).unwrap(), 1.0);
}

#[test]
fn test_health_of_green_and_yellow() {
    let green = health_ratio(&uniform(8, 8, LEAF_GREEN));
    assert_abs_diff_eq!(green.score, 1.0);
    assert_eq!(green.status, HealthStatus::Excellent);

    // Hue 25 (yellow-orange) falls in the stressed band only.
    let yellow = health_ratio(&uniform(8, 8, [200, 166, 0]));
    assert_abs_diff_eq!(yellow.stressed_ratio, 1.0);
    assert_abs_diff_eq!(yellow.score, 0.5);
    assert_eq!(yellow.status, HealthStatus::Moderate);
}

#[test]
fn test_health_failure_is_sentinel() {
    let empty = Frame::new(Array3::zeros((0, 0, 3)));
    let reading = health_ratio(&empty);
    assert_eq!(reading.score, 0.0);
    assert_eq!(reading.status, HealthStatus::Failed);
    assert_eq!(reading.status.to_string(), "Health Analysis Failed");
}

#[test]
fn test_rejects_wrong_channel_count() {
    let gray_only = Frame::new(Array3::zeros((8, 8, 1)));
    assert_eq!(
        brightness(&gray_only),
        Err(MetricError::ChannelCount { channels: 1 })
    );
    assert!(extract_metrics(&gray_only, &CropProfile::default()).is_err());
}

#[test]
fn test_rejects_empty_frame() {
    let empty = Frame::new(Array3::zeros((0, 5, 3)));
    assert!(matches!(
        spectral_focus(&empty),
        Err(MetricError::EmptyFrame { .. })
    ));
}

#[test]
fn test_noise_flags_salt_and_pepper() {
    let mut data = Array3::from_elem((32, 32, 3), 128u8);
    for row in (0..32).step_by(2) {
        for col in (0..32).step_by(2) {
            for ch in 0..3 {
                data[[row, col, ch]] = 255;
            }
        }
    }
    let noisy = Frame::new(data);
    let level = noise_level(&noisy).unwrap();
    assert_eq!(
        NoiseStatus::classify(level),
        NoiseStatus::High,
        "got: {level}"
    );
}

#[test]
fn test_spectral_focus_prefers_detail() {
    let flat = uniform(64, 64, MID_GRAY);
    let detailed = checkerboard(64, 64, [0, 0, 0], [255, 255, 255]);
    let f = spectral_focus(&flat).unwrap();
    let d = spectral_focus(&detailed).unwrap();
    assert!(d > f, "detailed ({d}) should exceed flat ({f})");
}

#[test]
fn test_extract_matches_individual_metrics() {
    let frame = healthy_field();
    let crop = CropProfile::default();
    let m = extract_metrics(&frame, &crop).unwrap();

    assert_abs_diff_eq!(m.brightness, brightness(&frame).unwrap(), epsilon = 1e-9);
    assert_abs_diff_eq!(m.contrast, contrast(&frame).unwrap(), epsilon = 1e-9);
    assert_abs_diff_eq!(m.sharpness, sharpness(&frame).unwrap(), epsilon = 1e-9);
    assert_abs_diff_eq!(m.noise_level, noise_level(&frame).unwrap(), epsilon = 1e-9);
    assert_abs_diff_eq!(m.color_coverage, 1.0);
    assert_abs_diff_eq!(m.health.score, 1.0);
}

#[test]
fn test_large_frame_uses_same_math() {
    // Above the parallel threshold: rows are split across threads.
    let big = uniform(300, 300, MID_GRAY);
    assert_abs_diff_eq!(texture_variance(&big).unwrap(), 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(noise_level(&big).unwrap(), 0.0, epsilon = 1e-6);
}
