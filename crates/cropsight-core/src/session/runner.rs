use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::io::frame_source::{FrameFetch, FrameSource};
use crate::io::sink::CommandSink;

use super::engine::{CycleReport, MonitorSession};

/// Why the monitor loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    Stopped,
    DurationElapsed,
    SourceExhausted,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stopped => write!(f, "stop requested"),
            Self::DurationElapsed => write!(f, "duration elapsed"),
            Self::SourceExhausted => write!(f, "source exhausted"),
        }
    }
}

/// Totals for one monitoring run.
#[derive(Clone, Debug, PartialEq)]
pub struct MonitorSummary {
    pub processed: u64,
    pub skipped: u64,
    pub accepted: u64,
    pub sink_errors: u64,
    /// Mean composite score over processed frames.
    pub mean_score: Option<f64>,
    pub final_altitude: f64,
    pub stop_reason: StopReason,
}

/// Callback for UI feedback while the loop runs. All methods default to no-ops.
pub trait MonitorObserver {
    fn on_cycle(&self, _report: &CycleReport) {}

    fn on_skip(&self) {}
}

struct NoOpObserver;
impl MonitorObserver for NoOpObserver {}

/// Pulls frames, steps the session and fans reports out to sinks.
pub struct MonitorLoop {
    sinks: Vec<Box<dyn CommandSink>>,
    stop: Arc<AtomicBool>,
    max_duration: Option<Duration>,
}

impl MonitorLoop {
    pub fn new(stop: Arc<AtomicBool>) -> Self {
        Self {
            sinks: Vec::new(),
            stop,
            max_duration: None,
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn CommandSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn with_max_duration(mut self, limit: Duration) -> Self {
        self.max_duration = Some(limit);
        self
    }

    pub fn run(
        &mut self,
        session: &mut MonitorSession,
        source: &mut dyn FrameSource,
    ) -> MonitorSummary {
        self.run_observed(session, source, &NoOpObserver)
    }

    /// Run until stopped, timed out or the source is exhausted. Limits are
    /// checked between frames.
    pub fn run_observed(
        &mut self,
        session: &mut MonitorSession,
        source: &mut dyn FrameSource,
        observer: &dyn MonitorObserver,
    ) -> MonitorSummary {
        let started = Instant::now();
        let mut processed = 0u64;
        let mut skipped = 0u64;
        let mut accepted = 0u64;
        let mut sink_errors = 0u64;
        let mut score_sum = 0.0;

        let stop_reason = loop {
            if self.stop.load(Ordering::Relaxed) {
                break StopReason::Stopped;
            }
            if self.max_duration.is_some_and(|limit| started.elapsed() >= limit) {
                break StopReason::DurationElapsed;
            }

            let frame = match source.next_frame() {
                FrameFetch::Frame(frame) => frame,
                FrameFetch::Skip => {
                    skipped += 1;
                    observer.on_skip();
                    continue;
                }
                FrameFetch::Exhausted => break StopReason::SourceExhausted,
            };

            let Some(report) = session.step(&frame, Instant::now()) else {
                skipped += 1;
                observer.on_skip();
                continue;
            };

            processed += 1;
            score_sum += report.score();
            if report.accepted.is_some() {
                accepted += 1;
            }

            for sink in &mut self.sinks {
                if let Err(err) = sink.handle(&report) {
                    sink_errors += 1;
                    warn!(sink = sink.name(), error = %err, "Sink failed");
                }
            }
            observer.on_cycle(&report);
        };

        let summary = MonitorSummary {
            processed,
            skipped,
            accepted,
            sink_errors,
            mean_score: (processed > 0).then(|| score_sum / processed as f64),
            final_altitude: session.current_altitude(),
            stop_reason,
        };
        info!(
            processed,
            skipped,
            accepted,
            reason = %stop_reason,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Monitoring finished"
        );
        summary
    }
}
