use std::collections::VecDeque;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{CropsightError, Result};
use crate::session::CycleReport;

/// Receives every processed cycle. Failures are logged by the caller and
/// never stop monitoring.
pub trait CommandSink {
    fn name(&self) -> &str;

    fn handle(&mut self, report: &CycleReport) -> Result<()>;
}

/// Accepted commands as JSON lines, keeping only the newest `capacity` records.
pub struct JsonLinesSink {
    path: PathBuf,
    capacity: usize,
    lines: VecDeque<String>,
}

impl JsonLinesSink {
    /// Open `path`, keeping any records already present.
    pub fn open(path: &Path, capacity: usize) -> Result<Self> {
        let capacity = capacity.max(1);
        let mut lines: VecDeque<String> = match fs::read_to_string(path) {
            Ok(text) => text
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(str::to_string)
                .collect(),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => VecDeque::new(),
            Err(err) => return Err(err.into()),
        };
        while lines.len() > capacity {
            lines.pop_front();
        }
        info!(path = %path.display(), existing = lines.len(), capacity, "History file opened");
        Ok(Self {
            path: path.to_path_buf(),
            capacity,
            lines,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Persist `line`, then retain it. A failed write leaves the records untouched.
    fn append(&mut self, line: String) -> Result<()> {
        if self.lines.len() >= self.capacity {
            let evicted = self.lines.len() + 1 - self.capacity;
            self.rewrite(
                self.lines
                    .iter()
                    .skip(evicted)
                    .chain(std::iter::once(&line)),
            )?;
            self.lines.drain(..evicted);
        } else {
            let mut file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            writeln!(file, "{line}")?;
        }
        self.lines.push_back(line);
        Ok(())
    }

    /// Replace the file with `lines` via a temporary file and rename.
    fn rewrite<'a>(&self, lines: impl Iterator<Item = &'a String>) -> Result<()> {
        let tmp = self.path.with_extension("jsonl.tmp");
        let mut written = 0usize;
        {
            let mut file = fs::File::create(&tmp)?;
            for line in lines {
                writeln!(file, "{line}")?;
                written += 1;
            }
            file.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), records = written, "History file compacted");
        Ok(())
    }
}

impl CommandSink for JsonLinesSink {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn handle(&mut self, report: &CycleReport) -> Result<()> {
        let Some(record) = &report.accepted else {
            return Ok(());
        };
        let line = serde_json::to_string(record)?;
        self.append(line).map_err(|e| CropsightError::Sink {
            sink: self.name().to_string(),
            reason: e.to_string(),
        })
    }
}

/// One structured log line per accepted command.
#[derive(Default)]
pub struct TracingSink;

impl CommandSink for TracingSink {
    fn name(&self) -> &str {
        "tracing"
    }

    fn handle(&mut self, report: &CycleReport) -> Result<()> {
        if let Some(record) = &report.accepted {
            info!(
                frame = record.frame_count,
                priority = record.priority,
                directive = %report.advice.directive(),
                action = %report.advice.primary_action(),
                current = record.current_height,
                target = record.target_height,
                score = report.score(),
                reason = %record.reason,
                "Positioning command"
            );
        }
        Ok(())
    }
}
