use std::path::PathBuf;
use std::process::{Child, Command};

use tracing::{debug, info, warn};

use crate::error::{CropsightError, Result};
use crate::session::config::PlannerConfig;
use crate::session::CycleReport;

use super::sink::CommandSink;

/// Field boundary as (lat, lon) vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldPolygon {
    pub vertices: Vec<(f64, f64)>,
}

impl FieldPolygon {
    pub fn new(vertices: Vec<(f64, f64)>) -> Self {
        Self { vertices }
    }
}

impl From<&[[f64; 2]]> for FieldPolygon {
    fn from(points: &[[f64; 2]]) -> Self {
        Self::new(points.iter().map(|p| (p[0], p[1])).collect())
    }
}

/// Formats as `[(lat, lon), ...]`.
impl std::fmt::Display for FieldPolygon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, (lat, lon)) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({lat}, {lon})")?;
        }
        write!(f, "]")
    }
}

/// Survey altitude to request from the planner for a given quality score.
pub fn flight_altitude_for_score(score: f64) -> f64 {
    if score >= 85.0 {
        4.0
    } else if score >= 70.0 {
        3.5
    } else if score >= 50.0 {
        3.0
    } else {
        2.5
    }
}

/// External path planner.
pub trait PathPlanner {
    fn plan(&mut self, altitude: f64, polygon: &FieldPolygon) -> Result<()>;
}

/// Runs a planner program as `program [args..] <altitude> <polygon>`.
///
/// The program runs in the background and is reaped on later calls. At most one
/// run is in flight; requests arriving while it is busy are dropped.
pub struct PlannerProcess {
    program: PathBuf,
    args: Vec<String>,
    running: Option<Child>,
}

impl PlannerProcess {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            running: None,
        }
    }

    pub fn command(&self, altitude: f64, polygon: &FieldPolygon) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(altitude.to_string())
            .arg(polygon.to_string());
        cmd
    }

    /// Collect a finished run. Returns whether one is still in flight.
    fn reap(&mut self) -> bool {
        let Some(child) = self.running.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                if !status.success() {
                    warn!(program = %self.program.display(), %status, "Path planner failed");
                }
                self.running = None;
                false
            }
            Err(err) => {
                warn!(program = %self.program.display(), error = %err, "Lost track of path planner");
                self.running = None;
                false
            }
        }
    }
}

impl PathPlanner for PlannerProcess {
    fn plan(&mut self, altitude: f64, polygon: &FieldPolygon) -> Result<()> {
        if self.reap() {
            warn!(program = %self.program.display(), altitude, "Path planner busy, request dropped");
            return Ok(());
        }
        let child = self
            .command(altitude, polygon)
            .spawn()
            .map_err(|e| CropsightError::Planner(format!("{}: {e}", self.program.display())))?;
        info!(program = %self.program.display(), pid = child.id(), altitude, "Path planner started");
        self.running = Some(child);
        Ok(())
    }
}

impl Drop for PlannerProcess {
    fn drop(&mut self) {
        if self.reap() {
            debug!(program = %self.program.display(), "Path planner still running at shutdown");
        }
    }
}

/// Forwards each accepted command to a planner with a score-derived altitude.
pub struct PlannerSink<P: PathPlanner> {
    planner: P,
    polygon: FieldPolygon,
}

impl<P: PathPlanner> PlannerSink<P> {
    pub fn new(planner: P, polygon: FieldPolygon) -> Self {
        if polygon.vertices.is_empty() {
            warn!("Planner sink has an empty field polygon");
        }
        Self { planner, polygon }
    }
}

impl PlannerSink<PlannerProcess> {
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(
            PlannerProcess::new(config.program.clone(), config.args.clone()),
            FieldPolygon::from(config.polygon.as_slice()),
        )
    }
}

impl<P: PathPlanner> CommandSink for PlannerSink<P> {
    fn name(&self) -> &str {
        "planner"
    }

    fn handle(&mut self, report: &CycleReport) -> Result<()> {
        if report.accepted.is_none() {
            return Ok(());
        }
        let altitude = flight_altitude_for_score(report.score());
        self.planner.plan(altitude, &self.polygon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_formats_as_tuple_list() {
        let polygon = FieldPolygon::new(vec![(12.5, 77.25), (12.75, 77.5)]);
        assert_eq!(polygon.to_string(), "[(12.5, 77.25), (12.75, 77.5)]");
        assert_eq!(FieldPolygon::default().to_string(), "[]");
    }

    #[cfg(unix)]
    #[test]
    fn planner_runs_in_background() {
        let mut planner = PlannerProcess::new("sh", vec!["-c".into(), "sleep 2".into()]);
        let polygon = FieldPolygon::new(vec![(1.0, 2.0)]);

        let started = std::time::Instant::now();
        planner.plan(3.0, &polygon).unwrap();
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
        assert!(planner.reap());
        let first = planner.running.as_ref().map(Child::id);
        assert!(first.is_some());

        // Busy: dropped without spawning a second run.
        planner.plan(3.5, &polygon).unwrap();
        assert_eq!(planner.running.as_ref().map(Child::id), first);

        if let Some(mut child) = planner.running.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    #[cfg(unix)]
    #[test]
    fn finished_run_is_reaped() {
        let mut planner = PlannerProcess::new("sh", vec!["-c".into(), "exit 3".into()]);
        planner.plan(3.0, &FieldPolygon::default()).unwrap();
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while planner.reap() && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert!(planner.running.is_none());
        // Free again, so the next request starts a new run.
        planner.plan(3.0, &FieldPolygon::default()).unwrap();
        assert!(planner.running.is_some());
    }

    #[test]
    fn altitude_bands() {
        assert_eq!(flight_altitude_for_score(85.0), 4.0);
        assert_eq!(flight_altitude_for_score(84.9), 3.5);
        assert_eq!(flight_altitude_for_score(50.0), 3.0);
        assert_eq!(flight_altitude_for_score(10.0), 2.5);
    }
}
