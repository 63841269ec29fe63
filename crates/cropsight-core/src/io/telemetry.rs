use std::collections::VecDeque;
use std::io::BufRead;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::consts::TELEMETRY_SMOOTHING_WINDOW;
use crate::error::{CropsightError, Result};

/// Pause after a failed telemetry read before trying again.
pub const TELEMETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Source of altitude samples in meters, e.g. a flight-controller link.
pub trait TelemetrySource: Send {
    /// Block until the next sample. `Err(TelemetryClosed)` ends the stream.
    fn next_altitude(&mut self) -> Result<f64>;
}

/// Convert a MAVLink-style altitude in millimetres to meters.
pub fn altitude_from_millimetres(mm: i32) -> f64 {
    f64::from(mm) / 1000.0
}

/// Latest altitude shared between the telemetry reader and the session.
/// Writers overwrite, readers see the most recent value.
#[derive(Clone, Debug)]
pub struct SharedAltitude {
    bits: Arc<AtomicU64>,
}

impl Default for SharedAltitude {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedAltitude {
    pub fn new() -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(f64::NAN.to_bits())),
        }
    }

    pub fn set(&self, meters: f64) {
        self.bits.store(meters.to_bits(), Ordering::Relaxed);
    }

    /// `None` until the first sample arrives.
    pub fn get(&self) -> Option<f64> {
        let value = f64::from_bits(self.bits.load(Ordering::Relaxed));
        (!value.is_nan()).then_some(value)
    }
}

/// Median over a sliding window of recent samples.
#[derive(Clone, Debug)]
pub struct AltitudeSmoother {
    window: VecDeque<f64>,
    size: usize,
}

impl Default for AltitudeSmoother {
    fn default() -> Self {
        Self::new(TELEMETRY_SMOOTHING_WINDOW)
    }
}

impl AltitudeSmoother {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            window: VecDeque::with_capacity(size),
            size,
        }
    }

    /// Add a sample and return the current median. Non-finite samples are ignored.
    pub fn push(&mut self, sample: f64) -> Option<f64> {
        if sample.is_finite() {
            if self.window.len() == self.size {
                self.window.pop_front();
            }
            self.window.push_back(sample);
        }
        self.median()
    }

    pub fn median(&self) -> Option<f64> {
        if self.window.is_empty() {
            return None;
        }
        let mut sorted: Vec<f64> = self.window.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        Some(if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        })
    }
}

/// Start a background thread feeding smoothed samples into `shared`.
///
/// The thread exits when `stop` is set or the source reports it is closed.
/// Other errors are logged and retried after [`TELEMETRY_BACKOFF`].
pub fn spawn_telemetry_reader<S>(
    mut source: S,
    shared: SharedAltitude,
    stop: Arc<AtomicBool>,
) -> JoinHandle<()>
where
    S: TelemetrySource + 'static,
{
    std::thread::spawn(move || {
        let mut smoother = AltitudeSmoother::default();
        info!("Telemetry reader started");
        while !stop.load(Ordering::Relaxed) {
            match source.next_altitude() {
                Ok(sample) => {
                    if let Some(altitude) = smoother.push(sample) {
                        shared.set(altitude);
                        debug!(sample, altitude, "Telemetry altitude updated");
                    }
                }
                Err(CropsightError::TelemetryClosed) => break,
                Err(err) => {
                    warn!(error = %err, "Telemetry read failed");
                    std::thread::sleep(TELEMETRY_BACKOFF);
                }
            }
        }
        info!("Telemetry reader stopped");
    })
}

/// Recorded altitudes replayed from memory, optionally paced.
pub struct ReplayTelemetry {
    samples: VecDeque<f64>,
    pace: Option<Duration>,
}

impl ReplayTelemetry {
    pub fn new(samples: impl IntoIterator<Item = f64>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            pace: None,
        }
    }

    /// Read one altitude (meters) per line. Blank lines and `#` comments are skipped.
    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = std::io::BufReader::new(std::fs::File::open(path)?);
        let mut samples = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let text = line.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            let value = text.parse::<f64>().map_err(|e| {
                CropsightError::Telemetry(format!("line {}: {e}", number + 1))
            })?;
            samples.push(value);
        }
        info!(path = %path.display(), samples = samples.len(), "Telemetry replay loaded");
        Ok(Self::new(samples))
    }

    /// Wait this long before returning each sample.
    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = Some(pace);
        self
    }
}

impl TelemetrySource for ReplayTelemetry {
    fn next_altitude(&mut self) -> Result<f64> {
        let sample = self
            .samples
            .pop_front()
            .ok_or(CropsightError::TelemetryClosed)?;
        if let Some(pace) = self.pace {
            std::thread::sleep(pace);
        }
        Ok(sample)
    }
}
