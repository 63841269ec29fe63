use thiserror::Error;

/// Input errors raised by the metric extractors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    #[error("Expected 3 color channels, got {channels}")]
    ChannelCount { channels: usize },

    #[error("Invalid frame dimensions: {width}x{height}")]
    EmptyFrame { width: usize, height: usize },

    #[error("Health analysis failed: {0}")]
    Health(String),
}

#[derive(Error, Debug)]
pub enum CropsightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Metric error: {0}")]
    Metric(#[from] MetricError),

    #[error("Sink '{sink}' failed: {reason}")]
    Sink { sink: String, reason: String },

    #[error("Telemetry source closed")]
    TelemetryClosed,

    #[error("Telemetry error: {0}")]
    Telemetry(String),

    #[error("Signal strategy error: {0}")]
    Strategy(String),

    #[error("Path planner error: {0}")]
    Planner(String),
}

pub type Result<T> = std::result::Result<T, CropsightError>;
