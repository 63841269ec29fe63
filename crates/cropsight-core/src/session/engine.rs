use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::advisor::{Advice, AltitudeContext, PositioningAdvisor};
use crate::assist::{AuxAssessment, AuxSampler, SignalStrategy};
use crate::consts::CLOSE_RANGE_CHECK_INTERVAL;
use crate::frame::Frame;
use crate::io::telemetry::SharedAltitude;
use crate::profile::{
    CloseRangeDetector, CloseRangeMode, CropProfile, ThresholdSet, WeatherProfile,
};
use crate::quality::{extract_metrics, QualityAnalysis};

use super::config::SessionConfig;
use super::history::CommandHistory;
use super::limiter::RateLimiter;
use super::record::CommandRecord;

/// Everything produced for one processed frame.
#[derive(Clone, Debug, Serialize)]
pub struct CycleReport {
    /// Zero-based index of the frame among successfully processed frames.
    pub frame_index: u64,
    pub analysis: QualityAnalysis,
    pub advice: Advice,
    /// Set only when the rate limiter let a command through this cycle.
    pub accepted: Option<CommandRecord>,
    pub aux: AuxAssessment,
}

impl CycleReport {
    pub fn score(&self) -> f64 {
        self.advice.score
    }
}

/// Per-session engine state: profiles, cached thresholds, altitude tracking,
/// the rate limiter and command history.
pub struct MonitorSession {
    crop: CropProfile,
    weather: WeatherProfile,
    close_range_mode: CloseRangeMode,
    detector: CloseRangeDetector,
    thresholds: ThresholdSet,
    advisor: PositioningAdvisor,
    limiter: RateLimiter,
    history: CommandHistory,
    current_altitude: f64,
    frame_counter: u64,
    telemetry: Option<SharedAltitude>,
    aux: AuxSampler,
}

impl MonitorSession {
    pub fn new(config: &SessionConfig) -> Self {
        let crop = config.crop_profile();
        let weather = config.weather_profile();
        let detector = CloseRangeDetector::new(config.close_range_mode == CloseRangeMode::On);
        let thresholds = ThresholdSet::derive(&crop, &weather, detector.is_active());

        info!(
            crop = %crop.kind,
            weather = %weather.kind,
            close_range = %config.close_range_mode,
            interval_secs = config.command_interval_seconds,
            "Monitor session created"
        );

        Self {
            advisor: PositioningAdvisor::new(crop.clone()),
            crop,
            weather,
            close_range_mode: config.close_range_mode,
            detector,
            thresholds,
            limiter: RateLimiter::new(config.command_interval_seconds),
            history: CommandHistory::new(config.history_capacity),
            current_altitude: crate::advisor::clamp_altitude(config.initial_altitude),
            frame_counter: 0,
            telemetry: None,
            aux: AuxSampler::new(None),
        }
    }

    /// Read altitude from a shared telemetry slot on every cycle.
    pub fn with_telemetry(mut self, telemetry: SharedAltitude) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    pub fn with_signal_strategy(mut self, strategy: Box<dyn SignalStrategy>) -> Self {
        self.aux = AuxSampler::new(Some(strategy));
        self
    }

    pub fn crop(&self) -> &CropProfile {
        &self.crop
    }

    pub fn weather(&self) -> &WeatherProfile {
        &self.weather
    }

    pub fn thresholds(&self) -> &ThresholdSet {
        &self.thresholds
    }

    pub fn close_range_mode(&self) -> CloseRangeMode {
        self.close_range_mode
    }

    pub fn close_range_active(&self) -> bool {
        self.detector.is_active()
    }

    pub fn current_altitude(&self) -> f64 {
        self.current_altitude
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn set_crop(&mut self, name: &str) {
        self.crop = CropProfile::from_name(name);
        self.advisor = PositioningAdvisor::new(self.crop.clone());
        self.refresh_thresholds();
    }

    pub fn set_weather(&mut self, name: &str) {
        self.weather = WeatherProfile::from_name(name);
        self.refresh_thresholds();
    }

    pub fn set_close_range_mode(&mut self, mode: CloseRangeMode) {
        self.close_range_mode = mode;
        match mode {
            CloseRangeMode::On => self.detector = CloseRangeDetector::new(true),
            CloseRangeMode::Off => self.detector = CloseRangeDetector::new(false),
            CloseRangeMode::Auto => {}
        }
        self.refresh_thresholds();
    }

    fn refresh_thresholds(&mut self) {
        self.thresholds =
            ThresholdSet::derive(&self.crop, &self.weather, self.detector.is_active());
        debug!(
            crop = %self.crop.kind,
            weather = %self.weather.kind,
            close_range = self.thresholds.close_range,
            "Thresholds recomputed"
        );
    }

    /// Process one frame. Returns `None` when the frame cannot be analyzed;
    /// such frames do not advance the frame counter.
    pub fn step(&mut self, frame: &Frame, now: Instant) -> Option<CycleReport> {
        let metrics = match extract_metrics(frame, &self.crop) {
            Ok(m) => m,
            Err(err) => {
                warn!(error = %err, "Skipping frame");
                return None;
            }
        };

        let frame_index = self.frame_counter;

        if self.close_range_mode == CloseRangeMode::Auto
            && frame_index % CLOSE_RANGE_CHECK_INTERVAL == 0
            && self.detector.observe(metrics.brightness, metrics.contrast)
        {
            self.refresh_thresholds();
        }

        let analysis = QualityAnalysis::new(metrics, &self.thresholds);
        let altitude = AltitudeContext {
            tracked: self.current_altitude,
            telemetry: self.telemetry.as_ref().and_then(SharedAltitude::get),
        };
        let advice = self.advisor.advise(&analysis, altitude);
        let aux = self
            .aux
            .sample(frame_index, frame, &analysis.metrics, advice.score);

        let accepted = if self.limiter.try_accept(now) {
            let record = CommandRecord::from_advice(
                &advice,
                &analysis.metrics,
                frame_index,
                altitude.base(),
                self.crop.kind.name(),
                self.weather.kind.name(),
            );
            self.current_altitude = record.target_height;
            self.history.push(record.clone());
            debug!(
                frame = frame_index,
                priority = record.priority,
                target = record.target_height,
                "Command accepted"
            );
            Some(record)
        } else {
            None
        };

        self.frame_counter += 1;

        Some(CycleReport {
            frame_index,
            analysis,
            advice,
            accepted,
            aux,
        })
    }
}
