use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use cropsight_core::io::frame_source::{FrameFetch, FrameSource, ImageSequence};
use cropsight_core::io::planner::PlannerSink;
use cropsight_core::io::sink::{JsonLinesSink, TracingSink};
use cropsight_core::io::telemetry::{spawn_telemetry_reader, ReplayTelemetry, SharedAltitude};
use cropsight_core::session::{CycleReport, MonitorLoop, MonitorObserver, MonitorSession};
use indicatif::{ProgressBar, ProgressStyle};

use super::SessionArgs;
use crate::summary::print_monitor_summary;

#[derive(Args)]
pub struct MonitorArgs {
    /// Directory of frames, replayed in name order
    pub input: PathBuf,

    #[command(flatten)]
    pub session: SessionArgs,

    /// Altitude log (one value in meters per line) replayed as telemetry
    #[arg(long)]
    pub telemetry: Option<PathBuf>,

    /// Delay between telemetry samples in milliseconds
    #[arg(long, default_value = "100")]
    pub telemetry_pace_ms: u64,

    /// Delay between frames in milliseconds, to mimic a live camera
    #[arg(long, default_value = "0")]
    pub frame_interval_ms: u64,

    /// Stop after this many seconds
    #[arg(long)]
    pub duration: Option<f64>,

    /// JSON-lines file for accepted commands (overrides the config)
    #[arg(long)]
    pub history: Option<PathBuf>,
}

/// Pacing wrapper so a directory replays at camera speed.
struct Paced<S> {
    inner: S,
    interval: Duration,
    started: bool,
}

impl<S: FrameSource> FrameSource for Paced<S> {
    fn next_frame(&mut self) -> FrameFetch {
        if self.started && !self.interval.is_zero() {
            std::thread::sleep(self.interval);
        }
        self.started = true;
        self.inner.next_frame()
    }

    fn len_hint(&self) -> Option<usize> {
        self.inner.len_hint()
    }
}

struct ProgressObserver {
    pb: ProgressBar,
}

impl MonitorObserver for ProgressObserver {
    fn on_cycle(&self, report: &CycleReport) {
        self.pb.inc(1);
        self.pb.set_message(format!(
            "Score {:5.1} p{}",
            report.score(),
            report.advice.priority
        ));
    }

    fn on_skip(&self) {
        self.pb.inc(1);
    }
}

pub fn run(args: &MonitorArgs) -> Result<()> {
    let mut config = args.session.load()?;
    if let Some(ref path) = args.history {
        config.history_path = Some(path.clone());
    }

    let sequence = ImageSequence::from_dir(&args.input)
        .with_context(|| format!("Failed to open frame directory {}", args.input.display()))?;
    let total = sequence.len_hint().unwrap_or(0);
    let mut source = Paced {
        inner: sequence,
        interval: Duration::from_millis(args.frame_interval_ms),
        started: false,
    };

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || {
            stop.store(true, Ordering::SeqCst);
        })
        .context("Failed to install Ctrl-C handler")?;
    }
    let mut session = MonitorSession::new(&config);

    let reader = match args.telemetry {
        Some(ref path) => {
            let replay = ReplayTelemetry::from_file(path)
                .with_context(|| format!("Failed to read telemetry {}", path.display()))?
                .with_pace(Duration::from_millis(args.telemetry_pace_ms));
            let shared = SharedAltitude::new();
            session = session.with_telemetry(shared.clone());
            Some(spawn_telemetry_reader(replay, shared, stop.clone()))
        }
        None => None,
    };

    let mut monitor = MonitorLoop::new(stop.clone()).with_sink(Box::new(TracingSink));
    if let Some(ref path) = config.history_path {
        let sink = JsonLinesSink::open(path, config.history_capacity)
            .with_context(|| format!("Failed to open history {}", path.display()))?;
        monitor = monitor.with_sink(Box::new(sink));
    }
    if let Some(ref planner) = config.planner {
        monitor = monitor.with_sink(Box::new(PlannerSink::from_config(planner)));
    }
    if let Some(secs) = args.duration {
        let limit = Duration::try_from_secs_f64(secs).context("Invalid --duration")?;
        monitor = monitor.with_max_duration(limit);
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Monitoring");
    let observer = ProgressObserver { pb };

    let summary = monitor.run_observed(&mut session, &mut source, &observer);
    observer.pb.finish_with_message("Done");

    stop.store(true, Ordering::SeqCst);
    if let Some(handle) = reader {
        if handle.join().is_err() {
            tracing::warn!("Telemetry reader panicked");
        }
    }

    print_monitor_summary(&summary, &session);
    Ok(())
}
