pub mod coverage;
pub mod gradient;
pub mod laplacian;
pub mod noise;
pub mod scoring;
pub mod spectral;
pub mod status;
pub mod texture;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::hsv::{hsv_plane, HsvRange};
use crate::color::{luminance, mean_stddev};
use crate::consts::{SHARPNESS_GRADIENT_WEIGHT, SHARPNESS_LAPLACIAN_WEIGHT};
use crate::error::MetricError;
use crate::frame::Frame;
use crate::profile::{CropProfile, ThresholdSet};

use coverage::{color_coverage_hsv, health_from_hsv, HealthReading};
use status::{
    BrightnessStatus, ContrastStatus, CoverageStatus, HealthStatus, NoiseStatus, SharpnessStatus,
    TextureStatus,
};

/// Raw measurements for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameMetrics {
    /// Mean of the grayscale plane (0..255).
    pub brightness: f64,
    /// Standard deviation of the grayscale plane.
    pub contrast: f64,
    /// 0.7 * Laplacian variance + 0.3 * mean Sobel magnitude.
    pub sharpness: f64,
    /// Fraction of crop-colored pixels.
    pub color_coverage: f64,
    pub texture_variance: f64,
    pub spectral_focus: f64,
    pub noise_level: f64,
    pub health: HealthReading,
}

/// Combined sharpness of a grayscale plane.
pub fn sharpness_array(gray: &Array2<f32>) -> f64 {
    SHARPNESS_LAPLACIAN_WEIGHT * laplacian::laplacian_variance_array(gray)
        + SHARPNESS_GRADIENT_WEIGHT * gradient::gradient_score_array(gray)
}

pub fn brightness(frame: &Frame) -> Result<f64, MetricError> {
    frame.validate()?;
    Ok(mean_stddev(&luminance(frame)).0)
}

pub fn contrast(frame: &Frame) -> Result<f64, MetricError> {
    frame.validate()?;
    Ok(mean_stddev(&luminance(frame)).1)
}

pub fn sharpness(frame: &Frame) -> Result<f64, MetricError> {
    frame.validate()?;
    Ok(sharpness_array(&luminance(frame)))
}

pub fn color_coverage(frame: &Frame, range: &HsvRange) -> Result<f64, MetricError> {
    frame.validate()?;
    Ok(color_coverage_hsv(&hsv_plane(frame), range))
}

pub fn texture_variance(frame: &Frame) -> Result<f64, MetricError> {
    frame.validate()?;
    Ok(texture::texture_variance_array(&luminance(frame)))
}

pub fn spectral_focus(frame: &Frame) -> Result<f64, MetricError> {
    frame.validate()?;
    Ok(spectral::spectral_focus_array(&luminance(frame)))
}

pub fn noise_level(frame: &Frame) -> Result<f64, MetricError> {
    frame.validate()?;
    Ok(noise::noise_level_array(&luminance(frame)))
}

/// Crop health of a frame. Never fails: an unusable frame yields the
/// `Health Analysis Failed` sentinel with score 0.0.
pub fn health_ratio(frame: &Frame) -> HealthReading {
    let result = frame
        .validate()
        .and_then(|_| health_from_hsv(&hsv_plane(frame)));
    result.unwrap_or_else(|err| {
        warn!(error = %err, "Crop health analysis failed");
        HealthReading::failed()
    })
}

/// Measure every metric of a frame, sharing the grayscale and HSV planes.
pub fn extract_metrics(frame: &Frame, crop: &CropProfile) -> Result<FrameMetrics, MetricError> {
    frame.validate()?;

    let gray = luminance(frame);
    let hsv = hsv_plane(frame);
    let (brightness, contrast) = mean_stddev(&gray);

    let ((sharpness, texture_variance), (spectral_focus, noise_level)) = rayon::join(
        || {
            (
                sharpness_array(&gray),
                texture::texture_variance_array(&gray),
            )
        },
        || {
            (
                spectral::spectral_focus_array(&gray),
                noise::noise_level_array(&gray),
            )
        },
    );

    let health = health_from_hsv(&hsv).unwrap_or_else(|err| {
        warn!(error = %err, "Crop health analysis failed");
        HealthReading::failed()
    });

    Ok(FrameMetrics {
        brightness,
        contrast,
        sharpness,
        color_coverage: color_coverage_hsv(&hsv, &crop.color_range),
        texture_variance,
        spectral_focus,
        noise_level,
        health,
    })
}

/// Metric names used in readings and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Brightness,
    Contrast,
    Sharpness,
    ColorCoverage,
    TextureVariance,
    NoiseLevel,
    CropHealth,
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Brightness => write!(f, "Brightness"),
            Self::Contrast => write!(f, "Contrast"),
            Self::Sharpness => write!(f, "Sharpness"),
            Self::ColorCoverage => write!(f, "Coverage"),
            Self::TextureVariance => write!(f, "Texture"),
            Self::NoiseLevel => write!(f, "Noise"),
            Self::CropHealth => write!(f, "Crop Health"),
        }
    }
}

/// One classified metric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    pub metric: MetricKind,
    pub status_label: String,
    pub raw_value: f64,
}

/// Status of every classified metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricStatuses {
    pub brightness: BrightnessStatus,
    pub contrast: ContrastStatus,
    pub sharpness: SharpnessStatus,
    pub color_coverage: CoverageStatus,
    pub texture_variance: TextureStatus,
    pub noise: NoiseStatus,
    pub health: HealthStatus,
}

impl MetricStatuses {
    pub fn classify(metrics: &FrameMetrics, thresholds: &ThresholdSet) -> Self {
        Self {
            brightness: BrightnessStatus::classify(metrics.brightness, &thresholds.brightness),
            contrast: ContrastStatus::classify(metrics.contrast, &thresholds.contrast),
            sharpness: SharpnessStatus::classify(metrics.sharpness, &thresholds.sharpness),
            color_coverage: CoverageStatus::classify(
                metrics.color_coverage,
                &thresholds.color_coverage,
            ),
            texture_variance: TextureStatus::classify(
                metrics.texture_variance,
                &thresholds.texture_variance,
            ),
            noise: NoiseStatus::classify(metrics.noise_level),
            health: metrics.health.status,
        }
    }
}

/// Metrics plus their classification for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityAnalysis {
    pub metrics: FrameMetrics,
    pub statuses: MetricStatuses,
    /// Whether the close-range table was in effect.
    pub close_range: bool,
}

impl QualityAnalysis {
    pub fn new(metrics: FrameMetrics, thresholds: &ThresholdSet) -> Self {
        let statuses = MetricStatuses::classify(&metrics, thresholds);
        Self {
            metrics,
            statuses,
            close_range: thresholds.close_range,
        }
    }

    pub fn readings(&self) -> Vec<MetricReading> {
        let m = &self.metrics;
        let s = &self.statuses;
        vec![
            reading(MetricKind::Brightness, s.brightness, m.brightness),
            reading(MetricKind::Contrast, s.contrast, m.contrast),
            reading(MetricKind::Sharpness, s.sharpness, m.sharpness),
            reading(MetricKind::ColorCoverage, s.color_coverage, m.color_coverage),
            reading(MetricKind::TextureVariance, s.texture_variance, m.texture_variance),
            reading(MetricKind::NoiseLevel, s.noise, m.noise_level),
            reading(MetricKind::CropHealth, s.health, m.health.score),
        ]
    }
}

fn reading(metric: MetricKind, status: impl std::fmt::Display, raw_value: f64) -> MetricReading {
    MetricReading {
        metric,
        status_label: status.to_string(),
        raw_value,
    }
}
