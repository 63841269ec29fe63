use super::QualityAnalysis;

/// Importance of each metric in the composite score. Sums to 1.0.
pub const SHARPNESS_WEIGHT: f64 = 0.20;
pub const BRIGHTNESS_WEIGHT: f64 = 0.15;
pub const CONTRAST_WEIGHT: f64 = 0.10;
pub const COVERAGE_WEIGHT: f64 = 0.15;
pub const TEXTURE_WEIGHT: f64 = 0.10;
pub const NOISE_WEIGHT: f64 = 0.05;
pub const HEALTH_WEIGHT: f64 = 0.25;

/// Weighted composite quality score in [0, 100].
///
/// Every status maps to a fixed value in [0, 100]; crop health contributes
/// its continuous score scaled to the same range.
pub fn composite_score(analysis: &QualityAnalysis) -> f64 {
    let s = &analysis.statuses;
    let health = analysis.metrics.health.score.clamp(0.0, 1.0) * 100.0;

    let score = SHARPNESS_WEIGHT * s.sharpness.value()
        + BRIGHTNESS_WEIGHT * s.brightness.value()
        + CONTRAST_WEIGHT * s.contrast.value()
        + COVERAGE_WEIGHT * s.color_coverage.value()
        + TEXTURE_WEIGHT * s.texture_variance.value()
        + NOISE_WEIGHT * s.noise.value()
        + HEALTH_WEIGHT * health;

    score.clamp(0.0, 100.0)
}
