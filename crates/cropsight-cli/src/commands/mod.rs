pub mod analyze;
pub mod config;
pub mod monitor;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use cropsight_core::profile::CloseRangeMode;
use cropsight_core::session::SessionConfig;

#[derive(Clone, Copy, ValueEnum)]
pub enum CloseRangeArg {
    On,
    Off,
    Auto,
}

impl From<CloseRangeArg> for CloseRangeMode {
    fn from(arg: CloseRangeArg) -> Self {
        match arg {
            CloseRangeArg::On => CloseRangeMode::On,
            CloseRangeArg::Off => CloseRangeMode::Off,
            CloseRangeArg::Auto => CloseRangeMode::Auto,
        }
    }
}

/// Session settings shared by `analyze` and `monitor`. Flags override the
/// config file.
#[derive(Args)]
pub struct SessionArgs {
    /// Session config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Crop type (wheat, corn, rice, cotton, general)
    #[arg(long)]
    pub crop: Option<String>,

    /// Weather condition (clear, cloudy, overcast, sunny, rainy)
    #[arg(long)]
    pub weather: Option<String>,

    /// Close-range threshold mode
    #[arg(long, value_enum)]
    pub close_range: Option<CloseRangeArg>,

    /// Minimum seconds between accepted commands
    #[arg(long)]
    pub interval: Option<f64>,

    /// Starting altitude in meters
    #[arg(long)]
    pub altitude: Option<f64>,
}

impl SessionArgs {
    pub fn load(&self) -> Result<SessionConfig> {
        let mut config = match self.config {
            Some(ref path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                toml::from_str(&contents).context("Invalid session config")?
            }
            None => SessionConfig::default(),
        };

        if let Some(ref crop) = self.crop {
            config.crop_type = crop.clone();
        }
        if let Some(ref weather) = self.weather {
            config.weather_condition = weather.clone();
        }
        if let Some(mode) = self.close_range {
            config.close_range_mode = mode.into();
        }
        if let Some(interval) = self.interval {
            config.command_interval_seconds = interval;
        }
        if let Some(altitude) = self.altitude {
            config.initial_altitude = altitude;
        }
        Ok(config)
    }
}
