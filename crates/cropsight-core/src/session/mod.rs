pub mod config;
mod engine;
mod history;
mod limiter;
mod record;
mod runner;

pub use config::{PlannerConfig, SessionConfig};
pub use engine::{CycleReport, MonitorSession};
pub use history::CommandHistory;
pub use limiter::RateLimiter;
pub use record::{CommandRecord, QualitySnapshot};
pub use runner::{MonitorLoop, MonitorObserver, MonitorSummary, StopReason};
