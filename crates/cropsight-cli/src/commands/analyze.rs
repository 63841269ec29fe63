use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Args;
use cropsight_core::io::image_io::{is_frame_file, load_frame};
use cropsight_core::io::telemetry::SharedAltitude;
use cropsight_core::session::{CycleReport, MonitorSession, SessionConfig};
use tracing::warn;

use super::SessionArgs;
use crate::summary::print_cycle_report;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Image files or directories of images
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub session: SessionArgs,

    /// Altitude reported by telemetry, meters
    #[arg(long)]
    pub telemetry_altitude: Option<f64>,

    /// Print one JSON report per frame instead of the summary
    #[arg(long)]
    pub json: bool,
}

/// Assess each image independently and print its positioning advice.
pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let config = args.session.load()?;
    let paths = collect_images(&args.inputs)?;
    if paths.is_empty() {
        bail!("No images found");
    }

    let mut skipped = 0usize;
    for path in &paths {
        let Some((session, report)) = assess(path, &config, args.telemetry_altitude) else {
            skipped += 1;
            continue;
        };

        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            print_cycle_report(path, &session, &report);
        }
    }

    if skipped == paths.len() {
        bail!("None of the {} images could be analyzed", paths.len());
    }
    Ok(())
}

/// Score one image in a fresh session. Unreadable or unusable frames are
/// logged and skipped.
fn assess(
    path: &Path,
    config: &SessionConfig,
    telemetry_altitude: Option<f64>,
) -> Option<(MonitorSession, CycleReport)> {
    let frame = match load_frame(path) {
        Ok(frame) => frame,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Skipping unreadable image");
            return None;
        }
    };

    let mut session = MonitorSession::new(config);
    if let Some(altitude) = telemetry_altitude {
        let shared = SharedAltitude::new();
        shared.set(altitude);
        session = session.with_telemetry(shared);
    }

    match session.step(&frame, Instant::now()) {
        Some(report) => Some((session, report)),
        None => {
            warn!(path = %path.display(), "Skipping frame that could not be analyzed");
            None
        }
    }
}

fn collect_images(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = std::fs::read_dir(input)
                .with_context(|| format!("Failed to read directory {}", input.display()))?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && is_frame_file(p))
                .collect();
            found.sort();
            paths.extend(found);
        } else {
            paths.push(input.clone());
        }
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropsight_core::frame::Frame;
    use cropsight_core::io::image_io::save_frame;

    #[test]
    fn undecodable_image_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("a_broken.png");
        let good = dir.path().join("b_good.png");
        std::fs::write(&broken, b"not an image").unwrap();
        save_frame(&Frame::filled(8, 8, [0, 200, 0]), &good).unwrap();

        let paths = collect_images(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(paths, vec![broken.clone(), good.clone()]);

        let config = SessionConfig::default();
        assert!(assess(&broken, &config, None).is_none());
        let (session, report) = assess(&good, &config, Some(3.0)).unwrap();
        assert_eq!(report.frame_index, 0);
        assert_eq!(session.frame_counter(), 1);
    }
}
