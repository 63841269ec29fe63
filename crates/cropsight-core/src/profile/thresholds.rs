use serde::{Deserialize, Serialize};

use super::crop::CropProfile;
use super::weather::WeatherProfile;

/// Lower bound, target and optional upper bound for one metric.
///
/// Always satisfies `min <= optimal <= max` when `max` is set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub optimal: f64,
    pub max: Option<f64>,
}

impl Bounds {
    fn new(min: f64, optimal: f64, max: Option<f64>) -> Self {
        debug_assert!(min <= optimal, "min {min} above optimal {optimal}");
        debug_assert!(max.map_or(true, |m| optimal <= m));
        Self { min, optimal, max }
    }

    fn scaled(min: f64, optimal: f64, max: Option<f64>, factor: f64) -> Self {
        Self::new(min * factor, optimal * factor, max.map(|m| m * factor))
    }

    pub fn is_consistent(&self) -> bool {
        self.min <= self.optimal && self.max.map_or(true, |m| self.optimal <= m)
    }
}

/// Per-metric bounds for one crop/weather/mode combination.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    pub brightness: Bounds,
    pub contrast: Bounds,
    pub sharpness: Bounds,
    pub color_coverage: Bounds,
    pub texture_variance: Bounds,
    pub close_range: bool,
}

impl ThresholdSet {
    /// Build bounds for the given profiles. `close_range` selects the looser
    /// near-field table.
    pub fn derive(crop: &CropProfile, weather: &WeatherProfile, close_range: bool) -> Self {
        let tex = crop.texture_sensitivity;
        let b = weather.brightness_mult;
        let c = weather.contrast_mult;
        let s = weather.sharpness_mult;

        if close_range {
            Self {
                brightness: Bounds::scaled(30.0, 100.0, Some(220.0), b),
                contrast: Bounds::scaled(15.0, 30.0, None, c),
                sharpness: Bounds::scaled(20.0, 80.0, None, s),
                color_coverage: Bounds::new(0.05, 0.3, None),
                texture_variance: Bounds::scaled(20.0, 60.0, None, tex),
                close_range,
            }
        } else {
            Self {
                brightness: Bounds::scaled(60.0, 120.0, Some(180.0), b),
                contrast: Bounds::scaled(25.0, 40.0, None, c),
                sharpness: Bounds::scaled(80.0, 150.0, None, s),
                color_coverage: Bounds::new(0.3, 0.6, None),
                texture_variance: Bounds::scaled(50.0, 100.0, None, tex),
                close_range,
            }
        }
    }

    pub fn is_consistent(&self) -> bool {
        [
            self.brightness,
            self.contrast,
            self.sharpness,
            self.color_coverage,
            self.texture_variance,
        ]
        .iter()
        .all(Bounds::is_consistent)
    }
}
