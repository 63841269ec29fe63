pub mod command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::profile::CropProfile;
use crate::quality::scoring::composite_score;
use crate::quality::status::{
    BrightnessStatus, CoverageStatus, HealthStatus, NoiseStatus, SharpnessStatus, TextureStatus,
};
use crate::quality::QualityAnalysis;

pub use command::{
    clamp_altitude, Action, AdjustmentCommand, AngleDirection, Category, Directive, Priority,
};

/// Scores at or above this hold position without evaluating corrective rules.
pub const MAINTAIN_SCORE: f64 = 80.0;
/// Below this score, a cycle with no triggered rule still suggests fine-tuning.
pub const FINE_TUNE_SCORE: f64 = 70.0;

const BLUR_DESCENT_M: f64 = 1.25;
const LIGHTING_STEP_M: f64 = 0.75;
const DETAIL_DESCENT_M: f64 = 0.75;
const NOISE_ASCENT_M: f64 = 0.5;
const COVERAGE_ASCENT_M: f64 = 0.5;

/// Altitude inputs for one advisory cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AltitudeContext {
    /// Altitude the session believes it is at (last accepted target).
    pub tracked: f64,
    /// Latest external telemetry sample, if any.
    pub telemetry: Option<f64>,
}

impl AltitudeContext {
    /// Reference altitude for relative moves: telemetry wins over tracking.
    pub fn base(&self) -> f64 {
        self.telemetry.unwrap_or(self.tracked)
    }
}

/// Outcome of one advisory cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub score: f64,
    pub priority: Priority,
    pub feedback: Vec<String>,
    /// Ordered by priority, highest first; ties keep rule order.
    pub adjustments: Vec<AdjustmentCommand>,
}

impl Advice {
    /// The adjustment a controller should act on first.
    pub fn primary(&self) -> Option<&AdjustmentCommand> {
        self.adjustments.first()
    }

    pub fn primary_action(&self) -> Action {
        self.primary().map_or(Action::Maintain, |cmd| cmd.action)
    }

    pub fn directive(&self) -> Directive {
        self.priority.directive()
    }
}

/// Turns classified metrics into positioning recommendations for one crop.
#[derive(Clone, Debug)]
pub struct PositioningAdvisor {
    crop: CropProfile,
}

impl PositioningAdvisor {
    pub fn new(crop: CropProfile) -> Self {
        Self { crop }
    }

    pub fn crop(&self) -> &CropProfile {
        &self.crop
    }

    pub fn advise(&self, analysis: &QualityAnalysis, altitude: AltitudeContext) -> Advice {
        let score = composite_score(analysis);

        if score >= MAINTAIN_SCORE {
            return Advice {
                score,
                priority: Priority::Optimal,
                feedback: vec!["Excellent quality! Maintain current position".to_string()],
                adjustments: Vec::new(),
            };
        }

        let baseline = Priority::from_score(score);
        let mut feedback = vec![band_feedback(baseline).to_string()];

        let correction = self.altitude_correction(altitude.telemetry);
        let corrected = correction.is_some();
        let mut adjustments: Vec<_> = correction.into_iter().collect();
        adjustments.extend(corrective_rules(analysis, altitude.base(), corrected));

        // Stable: equal priorities keep rule order, altitude correction first.
        adjustments.sort_by(|a, b| b.priority.cmp(&a.priority));

        let priority = adjustments
            .iter()
            .map(|cmd| cmd.priority)
            .fold(baseline, Priority::max);

        feedback.extend(adjustments.iter().map(|cmd| cmd.reason.clone()));

        if analysis.statuses.health == HealthStatus::Poor {
            feedback.push("Focus on this area for detailed disease monitoring".to_string());
        }
        if adjustments.is_empty() && score < FINE_TUNE_SCORE {
            feedback.push("Quality is acceptable. Fine-tune position if needed".to_string());
        }

        debug!(
            score,
            priority = priority.as_u8(),
            adjustments = adjustments.len(),
            "Advice computed"
        );

        Advice {
            score,
            priority,
            feedback,
            adjustments,
        }
    }

    /// Height correction when telemetry is outside the crop's tolerance band.
    fn altitude_correction(&self, telemetry: Option<f64>) -> Option<AdjustmentCommand> {
        let current = telemetry?;
        let optimal = self.crop.optimal_altitude;
        let diff = current - optimal;
        if diff.abs() <= self.crop.altitude_tolerance {
            return None;
        }

        let target = clamp_altitude(optimal);
        let (action, reason) = if diff > 0.0 {
            (
                Action::DecreaseAltitude {
                    meters: diff,
                    target,
                },
                format!(
                    "Too high for {}: {current:.1}m, descend {diff:.1}m to reach {optimal:.1}m",
                    self.crop.kind.name()
                ),
            )
        } else {
            (
                Action::IncreaseAltitude {
                    meters: -diff,
                    target,
                },
                format!(
                    "Too low for {}: {current:.1}m, ascend {:.1}m to reach {optimal:.1}m",
                    self.crop.kind.name(),
                    -diff
                ),
            )
        };

        Some(AdjustmentCommand {
            action,
            category: Category::Height,
            priority: Priority::Critical,
            reason,
        })
    }
}

fn band_feedback(baseline: Priority) -> &'static str {
    match baseline {
        Priority::Optimal => "Excellent quality! Maintain current position",
        Priority::Low => "Good quality. Slight adjustments possible",
        Priority::Moderate => "Moderate quality. Consider adjustments",
        Priority::Critical => "Poor quality. Significant adjustments needed",
    }
}

fn command(action: Action, category: Category, priority: Priority, reason: &str) -> AdjustmentCommand {
    AdjustmentCommand {
        action,
        category,
        priority,
        reason: reason.to_string(),
    }
}

/// Evaluate the corrective rules in fixed order; each contributes at most one
/// command. Relative moves start from `base` altitude. `height_corrected`
/// means a telemetry correction is already queued.
fn corrective_rules(
    analysis: &QualityAnalysis,
    base: f64,
    height_corrected: bool,
) -> Vec<AdjustmentCommand> {
    let s = &analysis.statuses;
    let mut out = Vec::new();

    if s.sharpness == SharpnessStatus::Blurry {
        out.push(command(
            Action::descend(base, BLUR_DESCENT_M),
            Category::Focus,
            Priority::Critical,
            "Move closer by 1.0-1.5m for sharper crop details",
        ));
    }
    match s.brightness {
        BrightnessStatus::TooDark => out.push(command(
            Action::descend(base, LIGHTING_STEP_M),
            Category::Lighting,
            Priority::Moderate,
            "Move closer by 0.5-1.0m for better lighting",
        )),
        BrightnessStatus::TooBright => out.push(command(
            Action::ascend(base, LIGHTING_STEP_M),
            Category::Lighting,
            Priority::Moderate,
            "Move farther by 0.5-1.0m to reduce overexposure",
        )),
        BrightnessStatus::Optimal | BrightnessStatus::Acceptable => {}
    }
    if s.color_coverage == CoverageStatus::Low {
        out.push(command(
            Action::AdjustAngle {
                direction: AngleDirection::Downward,
            },
            Category::Coverage,
            Priority::Moderate,
            "Adjust camera angle downward to focus on the crop field",
        ));
    }
    if s.texture_variance == TextureStatus::Low {
        out.push(command(
            Action::descend(base, DETAIL_DESCENT_M),
            Category::Detail,
            Priority::Moderate,
            "Move closer by 0.5-1.0m for better crop detail detection",
        ));
    }
    if s.noise == NoiseStatus::High {
        out.push(command(
            Action::ascend(base, NOISE_ASCENT_M),
            Category::Noise,
            Priority::Low,
            "Move slightly farther to reduce noise",
        ));
    }
    // Only worth trading sharpness for coverage when nothing else needs fixing.
    if s.sharpness == SharpnessStatus::VerySharp && out.is_empty() && !height_corrected {
        out.push(command(
            Action::ascend(base, COVERAGE_ASCENT_M),
            Category::Coverage,
            Priority::Low,
            "Sharpness is excellent, move slightly farther for wider coverage",
        ));
    }

    out
}
