#![allow(dead_code)]

use ndarray::Array3;

use cropsight_core::frame::Frame;
use cropsight_core::quality::coverage::HealthReading;
use cropsight_core::quality::status::HealthStatus;
use cropsight_core::quality::FrameMetrics;

pub const MID_GRAY: [u8; 3] = [128, 128, 128];
pub const LEAF_GREEN: [u8; 3] = [0, 200, 0];
pub const BRIGHT_GREEN: [u8; 3] = [0, 255, 0];
pub const DARK_GREEN: [u8; 3] = [0, 60, 0];

pub fn uniform(height: usize, width: usize, rgb: [u8; 3]) -> Frame {
    Frame::filled(height, width, rgb)
}

/// Alternating single pixels of `a` and `b`, starting with `a` at the origin.
pub fn checkerboard(height: usize, width: usize, a: [u8; 3], b: [u8; 3]) -> Frame {
    let data = Array3::from_shape_fn((height, width, 3), |(row, col, ch)| {
        if (row + col) % 2 == 0 {
            a[ch]
        } else {
            b[ch]
        }
    });
    Frame::new(data)
}

/// Sharp, fully green field that scores well above the maintain threshold.
pub fn healthy_field() -> Frame {
    checkerboard(128, 128, BRIGHT_GREEN, DARK_GREEN)
}

/// Metrics that classify as good on every axis with the open-field
/// general/clear table, and a healthy crop.
pub fn good_metrics() -> FrameMetrics {
    FrameMetrics {
        brightness: 120.0,
        contrast: 30.0,
        sharpness: 100.0,
        color_coverage: 0.5,
        texture_variance: 70.0,
        spectral_focus: 5.0,
        noise_level: 1.0,
        health: health(0.9),
    }
}

pub fn health(score: f64) -> HealthReading {
    HealthReading {
        score,
        healthy_ratio: score,
        stressed_ratio: 0.0,
        diseased_ratio: 0.0,
        status: HealthStatus::from_score(score),
    }
}
