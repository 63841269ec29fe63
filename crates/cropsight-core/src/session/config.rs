use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ALTITUDE_M, DEFAULT_COMMAND_INTERVAL_SECS, DEFAULT_HISTORY_CAPACITY};
use crate::profile::{CloseRangeMode, CropProfile, WeatherProfile};

/// Settings for one monitoring session.
///
/// Crop and weather are kept as free-form names so that unknown values load
/// and fall back to the general/clear profiles instead of failing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_crop_type")]
    pub crop_type: String,
    #[serde(default = "default_weather_condition")]
    pub weather_condition: String,
    #[serde(default)]
    pub close_range_mode: CloseRangeMode,
    /// Minimum spacing between accepted commands, seconds.
    #[serde(default = "default_command_interval")]
    pub command_interval_seconds: f64,
    /// Accepted commands kept in memory.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Altitude assumed until the first accepted command, meters.
    #[serde(default = "default_initial_altitude")]
    pub initial_altitude: f64,
    /// JSON-lines file receiving accepted commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planner: Option<PlannerConfig>,
}

fn default_crop_type() -> String {
    "general".to_string()
}
fn default_weather_condition() -> String {
    "clear".to_string()
}
fn default_command_interval() -> f64 {
    DEFAULT_COMMAND_INTERVAL_SECS
}
fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}
fn default_initial_altitude() -> f64 {
    DEFAULT_ALTITUDE_M
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            crop_type: default_crop_type(),
            weather_condition: default_weather_condition(),
            close_range_mode: CloseRangeMode::default(),
            command_interval_seconds: DEFAULT_COMMAND_INTERVAL_SECS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            initial_altitude: DEFAULT_ALTITUDE_M,
            history_path: None,
            planner: None,
        }
    }
}

impl SessionConfig {
    pub fn crop_profile(&self) -> CropProfile {
        CropProfile::from_name(&self.crop_type)
    }

    pub fn weather_profile(&self) -> WeatherProfile {
        WeatherProfile::from_name(&self.weather_condition)
    }
}

/// External path-planning utility invoked with each accepted command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub program: PathBuf,
    /// Extra arguments placed before altitude and polygon.
    #[serde(default)]
    pub args: Vec<String>,
    /// Field boundary as (lat, lon) vertices.
    #[serde(default)]
    pub polygon: Vec<[f64; 2]>,
}
