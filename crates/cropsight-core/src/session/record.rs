use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::advisor::Advice;
use crate::quality::FrameMetrics;

/// Metrics copied into each accepted command record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualitySnapshot {
    pub brightness: f64,
    pub sharpness: f64,
    pub green_coverage: f64,
}

impl From<&FrameMetrics> for QualitySnapshot {
    fn from(m: &FrameMetrics) -> Self {
        Self {
            brightness: m.brightness,
            sharpness: m.sharpness,
            green_coverage: m.color_coverage,
        }
    }
}

/// One accepted positioning command, as persisted to history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub timestamp: DateTime<Utc>,
    pub frame_count: u64,
    pub priority: u8,
    pub current_height: f64,
    pub target_height: f64,
    pub height_change: f64,
    pub reason: String,
    pub quality_metrics: QualitySnapshot,
    pub crop_type: String,
    pub weather: String,
}

impl CommandRecord {
    /// Build the record for `advice` issued at `current_height`.
    pub fn from_advice(
        advice: &Advice,
        metrics: &FrameMetrics,
        frame_count: u64,
        current_height: f64,
        crop_type: &str,
        weather: &str,
    ) -> Self {
        let target_height = advice.primary_action().target_altitude(current_height);
        let reason = advice.primary().map_or_else(
            || advice.feedback.first().cloned().unwrap_or_default(),
            |cmd| cmd.reason.clone(),
        );
        Self {
            timestamp: Utc::now(),
            frame_count,
            priority: advice.priority.as_u8(),
            current_height,
            target_height,
            height_change: target_height - current_height,
            reason,
            quality_metrics: QualitySnapshot::from(metrics),
            crop_type: crop_type.to_string(),
            weather: weather.to_string(),
        }
    }
}
