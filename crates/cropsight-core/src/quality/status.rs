use serde::{Deserialize, Serialize};

use crate::consts::{BRIGHTNESS_OPTIMAL_BAND, NOISE_ACCEPTABLE_LIMIT, NOISE_LOW_LIMIT};
use crate::profile::Bounds;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrightnessStatus {
    TooDark,
    TooBright,
    Optimal,
    Acceptable,
}

impl BrightnessStatus {
    pub fn classify(value: f64, bounds: &Bounds) -> Self {
        if value < bounds.min {
            Self::TooDark
        } else if bounds.max.is_some_and(|max| value > max) {
            Self::TooBright
        } else if (value - bounds.optimal).abs() < BRIGHTNESS_OPTIMAL_BAND {
            Self::Optimal
        } else {
            Self::Acceptable
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Self::TooDark => 30.0,
            Self::TooBright => 40.0,
            Self::Optimal => 100.0,
            Self::Acceptable => 80.0,
        }
    }
}

impl std::fmt::Display for BrightnessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooDark => write!(f, "Too Dark"),
            Self::TooBright => write!(f, "Too Bright"),
            Self::Optimal => write!(f, "Optimal Brightness"),
            Self::Acceptable => write!(f, "Acceptable Brightness"),
        }
    }
}

/// Low / Good / High classification shared by contrast, sharpness, coverage
/// and texture: below `min` is low, above `optimal` is high.
fn band(value: f64, bounds: &Bounds) -> std::cmp::Ordering {
    if value < bounds.min {
        std::cmp::Ordering::Less
    } else if value > bounds.optimal {
        std::cmp::Ordering::Greater
    } else {
        std::cmp::Ordering::Equal
    }
}

macro_rules! banded_status {
    (
        $(#[$meta:meta])*
        $name:ident {
            $low:ident => ($low_label:literal, $low_value:literal),
            $good:ident => ($good_label:literal, $good_value:literal),
            $high:ident => ($high_label:literal, $high_value:literal) $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $low,
            $good,
            $high,
        }

        impl $name {
            pub fn classify(value: f64, bounds: &Bounds) -> Self {
                match band(value, bounds) {
                    std::cmp::Ordering::Less => Self::$low,
                    std::cmp::Ordering::Equal => Self::$good,
                    std::cmp::Ordering::Greater => Self::$high,
                }
            }

            pub fn value(&self) -> f64 {
                match self {
                    Self::$low => $low_value,
                    Self::$good => $good_value,
                    Self::$high => $high_value,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    Self::$low => write!(f, $low_label),
                    Self::$good => write!(f, $good_label),
                    Self::$high => write!(f, $high_label),
                }
            }
        }
    };
}

banded_status! {
    ContrastStatus {
        Low => ("Low Contrast", 40.0),
        Good => ("Good Contrast", 80.0),
        High => ("High Contrast", 90.0),
    }
}

banded_status! {
    SharpnessStatus {
        Blurry => ("Blurry", 20.0),
        Good => ("Good Sharpness", 90.0),
        VerySharp => ("Very Sharp", 100.0),
    }
}

banded_status! {
    CoverageStatus {
        Low => ("Low Coverage", 30.0),
        Good => ("Good Coverage", 80.0),
        High => ("High Coverage", 90.0),
    }
}

banded_status! {
    TextureStatus {
        Low => ("Low Detail", 40.0),
        Good => ("Good Detail", 80.0),
        High => ("High Detail", 90.0),
    }
}

/// Noise uses fixed absolute bands, independent of crop and weather.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseStatus {
    Low,
    Acceptable,
    High,
}

impl NoiseStatus {
    pub fn classify(value: f64) -> Self {
        if value < NOISE_LOW_LIMIT {
            Self::Low
        } else if value < NOISE_ACCEPTABLE_LIMIT {
            Self::Acceptable
        } else {
            Self::High
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Self::Low => 90.0,
            Self::Acceptable => 70.0,
            Self::High => 40.0,
        }
    }
}

impl std::fmt::Display for NoiseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low Noise"),
            Self::Acceptable => write!(f, "Acceptable Noise"),
            Self::High => write!(f, "High Noise"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Excellent,
    Good,
    Moderate,
    Poor,
    /// The health analysis could not run; the reading carries score 0.0.
    Failed,
}

impl HealthStatus {
    pub fn from_score(score: f64) -> Self {
        if score > 0.8 {
            Self::Excellent
        } else if score > 0.6 {
            Self::Good
        } else if score > 0.4 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent Health"),
            Self::Good => write!(f, "Good Health"),
            Self::Moderate => write!(f, "Moderate Health"),
            Self::Poor => write!(f, "Poor Health"),
            Self::Failed => write!(f, "Health Analysis Failed"),
        }
    }
}
