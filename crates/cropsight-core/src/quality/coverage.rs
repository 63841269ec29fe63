use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::color::hsv::{fraction_in_range, Hsv, HsvRange};
use crate::error::MetricError;

use super::status::HealthStatus;

/// Green foliage.
const HEALTHY_RANGE: HsvRange = HsvRange::new([35, 50, 50], [85, 255, 255]);
/// Yellowing foliage.
const STRESSED_RANGE: HsvRange = HsvRange::new([20, 50, 50], [35, 255, 255]);
/// Brown foliage.
const DISEASED_RANGE: HsvRange = HsvRange::new([10, 50, 50], [20, 255, 255]);

const STRESSED_WEIGHT: f64 = 0.5;

/// Fraction of crop-colored pixels.
pub fn color_coverage_hsv(hsv: &Array2<Hsv>, range: &HsvRange) -> f64 {
    fraction_in_range(hsv, range)
}

/// Color-based crop health estimate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthReading {
    /// healthy + 0.5 * stressed, in [0, 1].
    pub score: f64,
    pub healthy_ratio: f64,
    pub stressed_ratio: f64,
    pub diseased_ratio: f64,
    pub status: HealthStatus,
}

impl HealthReading {
    /// Sentinel used when the health analysis cannot run. Never mistaken for
    /// a good reading: score is 0.0 and the status says so.
    pub fn failed() -> Self {
        Self {
            score: 0.0,
            healthy_ratio: 0.0,
            stressed_ratio: 0.0,
            diseased_ratio: 0.0,
            status: HealthStatus::Failed,
        }
    }
}

/// Partition pixels into healthy/stressed/diseased hue bands and score them.
///
/// Band edges are inclusive on both sides, so a pixel sitting exactly on a
/// shared hue edge counts toward both bands; the score is clamped to [0, 1].
pub fn health_from_hsv(hsv: &Array2<Hsv>) -> Result<HealthReading, MetricError> {
    if hsv.is_empty() {
        return Err(MetricError::Health("no pixels to classify".into()));
    }
    let healthy_ratio = fraction_in_range(hsv, &HEALTHY_RANGE);
    let stressed_ratio = fraction_in_range(hsv, &STRESSED_RANGE);
    let diseased_ratio = fraction_in_range(hsv, &DISEASED_RANGE);

    let score = (healthy_ratio + STRESSED_WEIGHT * stressed_ratio).clamp(0.0, 1.0);

    Ok(HealthReading {
        score,
        healthy_ratio,
        stressed_ratio,
        diseased_ratio,
        status: HealthStatus::from_score(score),
    })
}
