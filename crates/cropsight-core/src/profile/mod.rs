pub mod close_range;
pub mod crop;
pub mod thresholds;
pub mod weather;

pub use close_range::{CloseRangeDetector, CloseRangeMode};
pub use crop::{CropKind, CropProfile};
pub use thresholds::{Bounds, ThresholdSet};
pub use weather::{WeatherKind, WeatherProfile};
