use serde::{Deserialize, Serialize};
use tracing::warn;

/// Lighting conditions that shift the brightness/contrast/sharpness bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    #[default]
    Clear,
    Cloudy,
    Overcast,
    Sunny,
    Rainy,
}

impl WeatherKind {
    pub const ALL: [WeatherKind; 5] = [
        WeatherKind::Clear,
        WeatherKind::Cloudy,
        WeatherKind::Overcast,
        WeatherKind::Sunny,
        WeatherKind::Rainy,
    ];

    /// Resolve a weather name, case-insensitively. Unknown names fall back to
    /// `Clear` with a warning.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "clear" => Self::Clear,
            "cloudy" => Self::Cloudy,
            "overcast" => Self::Overcast,
            "sunny" => Self::Sunny,
            "rainy" => Self::Rainy,
            other => {
                warn!(weather = other, "Unknown weather condition, using clear");
                Self::Clear
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Overcast => "overcast",
            Self::Sunny => "sunny",
            Self::Rainy => "rainy",
        }
    }
}

impl std::fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clear => write!(f, "Clear"),
            Self::Cloudy => write!(f, "Cloudy"),
            Self::Overcast => write!(f, "Overcast"),
            Self::Sunny => write!(f, "Sunny"),
            Self::Rainy => write!(f, "Rainy"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherProfile {
    pub kind: WeatherKind,
    pub brightness_mult: f64,
    pub contrast_mult: f64,
    pub sharpness_mult: f64,
}

impl WeatherProfile {
    pub fn for_kind(kind: WeatherKind) -> Self {
        let (brightness_mult, contrast_mult, sharpness_mult) = match kind {
            WeatherKind::Clear => (1.0, 1.0, 1.0),
            WeatherKind::Cloudy => (0.8, 1.2, 0.9),
            WeatherKind::Overcast => (0.7, 1.3, 0.8),
            WeatherKind::Sunny => (1.2, 0.9, 1.1),
            WeatherKind::Rainy => (0.6, 1.4, 0.7),
        };
        Self {
            kind,
            brightness_mult,
            contrast_mult,
            sharpness_mult,
        }
    }

    pub fn from_name(name: &str) -> Self {
        Self::for_kind(WeatherKind::from_name(name))
    }
}

impl Default for WeatherProfile {
    fn default() -> Self {
        Self::for_kind(WeatherKind::Clear)
    }
}
