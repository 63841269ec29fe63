use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::{AUX_CACHE_FRAMES, AUX_SAMPLE_INTERVAL};
use crate::error::Result;
use crate::frame::Frame;
use crate::quality::FrameMetrics;

/// Where an auxiliary assessment came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentSource {
    Model,
    Fallback,
}

impl std::fmt::Display for AssessmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model => write!(f, "model"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Normalized [0, 1] aspect scores from an alternate quality signal.
/// Informational only: the composite score never reads it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuxAssessment {
    pub overall: f64,
    pub sharpness: f64,
    pub brightness: f64,
    pub contrast: f64,
    pub crop_health: f64,
    pub source: AssessmentSource,
}

/// An alternate quality signal, e.g. a pretrained model.
pub trait SignalStrategy: Send {
    fn name(&self) -> &str;

    fn assess(&mut self, frame: &Frame) -> Result<AuxAssessment>;
}

/// Deterministic assessment derived from the extracted metrics.
pub fn fallback_assessment(metrics: &FrameMetrics, composite: f64) -> AuxAssessment {
    AuxAssessment {
        overall: (composite / 100.0).clamp(0.0, 1.0),
        sharpness: (metrics.sharpness / 200.0).clamp(0.0, 1.0),
        brightness: (metrics.brightness / 255.0).clamp(0.0, 1.0),
        contrast: (metrics.contrast / 100.0).clamp(0.0, 1.0),
        crop_health: metrics.health.score.clamp(0.0, 1.0),
        source: AssessmentSource::Fallback,
    }
}

/// Samples a strategy every few frames and serves the cached result in between.
pub struct AuxSampler {
    strategy: Option<Box<dyn SignalStrategy>>,
    cached: Option<(u64, AuxAssessment)>,
}

impl AuxSampler {
    pub fn new(strategy: Option<Box<dyn SignalStrategy>>) -> Self {
        Self {
            strategy,
            cached: None,
        }
    }

    /// Assessment for frame `frame_index`. Falls back to the metric-derived
    /// assessment when there is no strategy, it failed, or the cache expired.
    pub fn sample(
        &mut self,
        frame_index: u64,
        frame: &Frame,
        metrics: &FrameMetrics,
        composite: f64,
    ) -> AuxAssessment {
        if let Some(strategy) = self.strategy.as_mut() {
            if frame_index % AUX_SAMPLE_INTERVAL == 0 {
                match strategy.assess(frame) {
                    Ok(assessment) => {
                        debug!(
                            strategy = strategy.name(),
                            overall = assessment.overall,
                            "Auxiliary assessment refreshed"
                        );
                        self.cached = Some((frame_index, assessment));
                    }
                    Err(err) => {
                        warn!(strategy = strategy.name(), error = %err, "Signal strategy failed");
                    }
                }
            }
        }

        match self.cached {
            Some((at, assessment)) if frame_index.saturating_sub(at) < AUX_CACHE_FRAMES => {
                assessment
            }
            _ => fallback_assessment(metrics, composite),
        }
    }
}
