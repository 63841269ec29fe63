mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use approx::assert_abs_diff_eq;
use ndarray::Array3;

use common::*;
use cropsight_core::advisor::{Category, Priority};
use cropsight_core::assist::{AssessmentSource, AuxAssessment, SignalStrategy};
use cropsight_core::error::{CropsightError, Result};
use cropsight_core::frame::Frame;
use cropsight_core::io::frame_source::FrameQueue;
use cropsight_core::io::sink::CommandSink;
use cropsight_core::io::telemetry::SharedAltitude;
use cropsight_core::profile::{
    CloseRangeMode, CropKind, CropProfile, ThresholdSet, WeatherKind, WeatherProfile,
};
use cropsight_core::session::{
    CycleReport, MonitorLoop, MonitorSession, SessionConfig, StopReason,
};

fn config_with_interval(secs: f64) -> SessionConfig {
    SessionConfig {
        command_interval_seconds: secs,
        ..SessionConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Rate limiting and history
// ---------------------------------------------------------------------------

#[test]
fn test_commands_closer_than_interval() {
    let mut session = MonitorSession::new(&config_with_interval(2.0));
    let frame = uniform(16, 16, MID_GRAY);
    let t0 = Instant::now();

    let first = session.step(&frame, t0).unwrap();
    let second = session.step(&frame, t0 + Duration::from_secs(1)).unwrap();
    let third = session.step(&frame, t0 + Duration::from_secs(2)).unwrap();

    assert!(first.accepted.is_some());
    assert!(second.accepted.is_none(), "rejected cycles still report");
    assert!(third.accepted.is_some());
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.frame_counter(), 3);
}

#[test]
fn test_history_keeps_newest() {
    let mut session = MonitorSession::new(&config_with_interval(0.0));
    let frame = uniform(8, 8, MID_GRAY);
    let t0 = Instant::now();

    for i in 0..150 {
        let report = session.step(&frame, t0 + Duration::from_millis(i)).unwrap();
        assert!(report.accepted.is_some());
    }

    let history = session.history();
    assert_eq!(history.len(), 100);
    assert_eq!(history.iter().next().map(|r| r.frame_count), Some(50));
    assert_eq!(history.latest().map(|r| r.frame_count), Some(149));
}

#[test]
fn test_altitude_clamps_to_floor() {
    let config = SessionConfig {
        initial_altitude: 1.5,
        ..config_with_interval(0.0)
    };
    let mut session = MonitorSession::new(&config);
    let report = session.step(&uniform(16, 16, MID_GRAY), Instant::now()).unwrap();

    let record = report.accepted.unwrap();
    assert_abs_diff_eq!(record.current_height, 1.5);
    assert_abs_diff_eq!(record.target_height, 1.0);
    assert_abs_diff_eq!(record.height_change, -0.5);
    assert_abs_diff_eq!(session.current_altitude(), 1.0);
}

#[test]
fn test_good_frames_hold_position() {
    let mut session = MonitorSession::new(&config_with_interval(0.0));
    let frame = healthy_field();
    let t0 = Instant::now();

    let a = session.step(&frame, t0).unwrap();
    let b = session.step(&frame, t0 + Duration::from_millis(10)).unwrap();

    for report in [&a, &b] {
        assert!(report.score() >= 80.0, "got: {}", report.score());
        assert_eq!(report.advice.priority, Priority::Optimal);
        let record = report.accepted.as_ref().unwrap();
        assert_abs_diff_eq!(record.height_change, 0.0);
        assert_eq!(record.priority, 0);
    }
    assert_eq!(a.advice.feedback, b.advice.feedback);
    assert_abs_diff_eq!(session.current_altitude(), 3.0);
}

#[test]
fn test_record_fields() {
    let config = SessionConfig {
        crop_type: "wheat".into(),
        weather_condition: "sunny".into(),
        ..config_with_interval(0.0)
    };
    let mut session = MonitorSession::new(&config);
    let report = session.step(&uniform(16, 16, LEAF_GREEN), Instant::now()).unwrap();
    let record = report.accepted.unwrap();

    assert_eq!(record.crop_type, "wheat");
    assert_eq!(record.weather, "sunny");
    assert_eq!(record.frame_count, 0);
    assert_abs_diff_eq!(record.quality_metrics.green_coverage, 1.0);

    let json = serde_json::to_value(&record).unwrap();
    for key in [
        "timestamp",
        "frame_count",
        "priority",
        "current_height",
        "target_height",
        "height_change",
        "reason",
        "quality_metrics",
        "crop_type",
        "weather",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
}

// ---------------------------------------------------------------------------
// Profiles and modes
// ---------------------------------------------------------------------------

#[test]
fn test_unknown_names_behave_as_defaults() {
    let config = SessionConfig {
        crop_type: "durian".into(),
        weather_condition: "tornado".into(),
        ..SessionConfig::default()
    };
    let session = MonitorSession::new(&config);
    assert_eq!(session.crop().kind, CropKind::General);
    assert_eq!(session.weather().kind, WeatherKind::Clear);
    assert_eq!(
        session.thresholds(),
        &ThresholdSet::derive(&CropProfile::default(), &WeatherProfile::default(), false)
    );
}

#[test]
fn test_weather_change_recomputes_thresholds() {
    let mut session = MonitorSession::new(&SessionConfig::default());
    session.set_weather("overcast");
    assert_eq!(session.weather().kind, WeatherKind::Overcast);
    assert_abs_diff_eq!(session.thresholds().brightness.min, 42.0, epsilon = 1e-9);
}

#[test]
fn test_auto_close_range_on_dark_busy_frame() {
    let config = SessionConfig {
        close_range_mode: CloseRangeMode::Auto,
        ..SessionConfig::default()
    };
    let mut session = MonitorSession::new(&config);
    assert!(!session.close_range_active());

    // Mean 90, std 90: dark and high spread.
    let frame = checkerboard(16, 16, [0, 0, 0], [180, 180, 180]);
    let report = session.step(&frame, Instant::now()).unwrap();
    assert!(session.close_range_active());
    assert!(report.analysis.close_range);

    session.set_close_range_mode(CloseRangeMode::Off);
    assert!(!session.close_range_active());
    assert!(!session.thresholds().close_range);
}

#[test]
fn test_forced_close_range() {
    let config = SessionConfig {
        close_range_mode: CloseRangeMode::On,
        ..SessionConfig::default()
    };
    let session = MonitorSession::new(&config);
    assert!(session.thresholds().close_range);
}

#[test]
fn test_bad_frame_is_skipped() {
    let mut session = MonitorSession::new(&SessionConfig::default());
    let bad = Frame::new(Array3::zeros((8, 8, 1)));
    assert!(session.step(&bad, Instant::now()).is_none());
    assert_eq!(session.frame_counter(), 0);
    assert!(session.history().is_empty());
}

#[test]
fn test_telemetry_drives_base_altitude() {
    let telemetry = SharedAltitude::new();
    telemetry.set(5.0);
    let mut session =
        MonitorSession::new(&config_with_interval(0.0)).with_telemetry(telemetry.clone());

    let report = session.step(&uniform(16, 16, MID_GRAY), Instant::now()).unwrap();
    let record = report.accepted.unwrap();
    assert_abs_diff_eq!(record.current_height, 5.0);
    assert_abs_diff_eq!(record.target_height, 3.0);
    assert_abs_diff_eq!(session.current_altitude(), 3.0);
}

#[test]
fn test_crop_change_rebuilds_advisor() {
    // Saturation 43: inside the wheat range, below the general one.
    let pale_green = uniform(16, 16, [166, 200, 166]);
    let telemetry = SharedAltitude::new();
    telemetry.set(3.9);
    let mut session =
        MonitorSession::new(&config_with_interval(0.0)).with_telemetry(telemetry);

    let report = session.step(&pale_green, Instant::now()).unwrap();
    assert_abs_diff_eq!(report.analysis.metrics.color_coverage, 0.0);
    assert_eq!(report.advice.adjustments[0].category, Category::Height);

    session.set_crop("wheat");
    let report = session.step(&pale_green, Instant::now()).unwrap();
    assert_abs_diff_eq!(report.analysis.metrics.color_coverage, 1.0);

    // Corn tolerates 3.9 m around its 4.0 m optimum.
    session.set_crop("corn");
    assert_eq!(session.crop().kind, CropKind::Corn);
    let report = session.step(&pale_green, Instant::now()).unwrap();
    assert!(report
        .advice
        .adjustments
        .iter()
        .all(|c| c.category != Category::Height));
}

// ---------------------------------------------------------------------------
// Signal strategy
// ---------------------------------------------------------------------------

/// Answers once, then fails every later query.
struct OneShotModel {
    calls: usize,
}

impl SignalStrategy for OneShotModel {
    fn name(&self) -> &str {
        "one-shot"
    }

    fn assess(&mut self, _frame: &Frame) -> Result<AuxAssessment> {
        self.calls += 1;
        if self.calls > 1 {
            return Err(CropsightError::Strategy("model unavailable".into()));
        }
        Ok(AuxAssessment {
            overall: 0.75,
            sharpness: 0.75,
            brightness: 0.75,
            contrast: 0.75,
            crop_health: 0.75,
            source: AssessmentSource::Model,
        })
    }
}

#[test]
fn test_strategy_result_cached_then_falls_back() {
    let mut session = MonitorSession::new(&config_with_interval(0.0))
        .with_signal_strategy(Box::new(OneShotModel { calls: 0 }));
    let frame = uniform(8, 8, MID_GRAY);
    let t0 = Instant::now();

    let reports: Vec<CycleReport> = (0..31)
        .map(|i| session.step(&frame, t0 + Duration::from_millis(i)).unwrap())
        .collect();

    assert_eq!(reports[0].aux.source, AssessmentSource::Model);
    assert_abs_diff_eq!(reports[0].aux.overall, 0.75);
    // The failed refresh at frame 5 keeps serving the cached result.
    assert_eq!(reports[5].aux.source, AssessmentSource::Model);
    assert_eq!(reports[29].aux.source, AssessmentSource::Model);

    let expired = &reports[30];
    assert_eq!(expired.aux.source, AssessmentSource::Fallback);
    assert_abs_diff_eq!(expired.aux.overall, expired.score() / 100.0, epsilon = 1e-12);
    // The model never moves the score.
    assert_abs_diff_eq!(reports[0].score(), expired.score(), epsilon = 1e-9);
}

#[test]
fn test_no_strategy_uses_fallback() {
    let mut session = MonitorSession::new(&SessionConfig::default());
    let report = session.step(&uniform(8, 8, MID_GRAY), Instant::now()).unwrap();
    assert_eq!(report.aux.source, AssessmentSource::Fallback);
}

// ---------------------------------------------------------------------------
// Monitor loop
// ---------------------------------------------------------------------------

struct Collect(Arc<Mutex<Vec<u64>>>);

impl CommandSink for Collect {
    fn name(&self) -> &str {
        "collect"
    }

    fn handle(&mut self, report: &CycleReport) -> Result<()> {
        if let Some(record) = &report.accepted {
            if let Ok(mut seen) = self.0.lock() {
                seen.push(record.frame_count);
            }
        }
        Ok(())
    }
}

struct Broken;

impl CommandSink for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn handle(&mut self, _report: &CycleReport) -> Result<()> {
        Err(CropsightError::Sink {
            sink: "broken".into(),
            reason: "disk full".into(),
        })
    }
}

#[test]
fn test_loop_runs_until_exhausted() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut session = MonitorSession::new(&config_with_interval(0.0));
    let mut source = FrameQueue::new(vec![
        uniform(8, 8, MID_GRAY),
        Frame::new(Array3::zeros((8, 8, 1))),
        uniform(8, 8, LEAF_GREEN),
    ]);

    let summary = MonitorLoop::new(Arc::new(AtomicBool::new(false)))
        .with_sink(Box::new(Collect(seen.clone())))
        .with_sink(Box::new(Broken))
        .run(&mut session, &mut source);

    assert_eq!(summary.stop_reason, StopReason::SourceExhausted);
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.sink_errors, 2);
    assert_eq!(*seen.lock().unwrap(), vec![0, 1]);
}

#[test]
fn test_loop_honours_stop_flag() {
    let mut session = MonitorSession::new(&SessionConfig::default());
    let mut source = FrameQueue::new(vec![uniform(8, 8, MID_GRAY)]);
    let summary =
        MonitorLoop::new(Arc::new(AtomicBool::new(true))).run(&mut session, &mut source);
    assert_eq!(summary.stop_reason, StopReason::Stopped);
    assert_eq!(summary.processed, 0);
    assert_eq!(summary.mean_score, None);
}

/// Raises the shared stop flag once it has seen a report.
struct StopAfterFirst(Arc<AtomicBool>);

impl CommandSink for StopAfterFirst {
    fn name(&self) -> &str {
        "stop-after-first"
    }

    fn handle(&mut self, _report: &CycleReport) -> Result<()> {
        self.0.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn test_loop_stops_when_flag_raised_mid_run() {
    let stop = Arc::new(AtomicBool::new(false));
    let mut session = MonitorSession::new(&config_with_interval(0.0));
    let mut source = FrameQueue::new(vec![
        uniform(8, 8, MID_GRAY),
        uniform(8, 8, MID_GRAY),
        uniform(8, 8, MID_GRAY),
    ]);

    let summary = MonitorLoop::new(stop.clone())
        .with_sink(Box::new(StopAfterFirst(stop)))
        .run(&mut session, &mut source);

    assert_eq!(summary.stop_reason, StopReason::Stopped);
    assert_eq!(summary.processed, 1);
    assert_eq!(session.frame_counter(), 1);
}

#[test]
fn test_loop_honours_duration() {
    let mut session = MonitorSession::new(&SessionConfig::default());
    let mut source = FrameQueue::new(vec![uniform(8, 8, MID_GRAY)]);
    let summary = MonitorLoop::new(Arc::new(AtomicBool::new(false)))
        .with_max_duration(Duration::ZERO)
        .run(&mut session, &mut source);
    assert_eq!(summary.stop_reason, StopReason::DurationElapsed);
}
