use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::hsv::HsvRange;

/// Crop varieties with dedicated analysis parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropKind {
    Wheat,
    Corn,
    Rice,
    Cotton,
    #[default]
    General,
}

impl CropKind {
    pub const ALL: [CropKind; 5] = [
        CropKind::Wheat,
        CropKind::Corn,
        CropKind::Rice,
        CropKind::Cotton,
        CropKind::General,
    ];

    /// Resolve a crop name, case-insensitively. Unknown names fall back to
    /// `General` with a warning rather than failing.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "wheat" => Self::Wheat,
            "corn" => Self::Corn,
            "rice" => Self::Rice,
            "cotton" => Self::Cotton,
            "general" => Self::General,
            other => {
                warn!(crop = other, "Unknown crop type, using general profile");
                Self::General
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Wheat => "wheat",
            Self::Corn => "corn",
            Self::Rice => "rice",
            Self::Cotton => "cotton",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for CropKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wheat => write!(f, "Wheat"),
            Self::Corn => write!(f, "Corn"),
            Self::Rice => write!(f, "Rice"),
            Self::Cotton => write!(f, "Cotton"),
            Self::General => write!(f, "General"),
        }
    }
}

/// Per-crop analysis parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub kind: CropKind,
    /// Pixels inside this range count as crop-colored.
    pub color_range: HsvRange,
    /// Scales the texture-variance bounds.
    pub texture_sensitivity: f64,
    /// Target flying height, meters.
    pub optimal_altitude: f64,
    /// Allowed deviation from `optimal_altitude` before a correction is issued.
    pub altitude_tolerance: f64,
}

impl CropProfile {
    pub fn for_kind(kind: CropKind) -> Self {
        let (min_sv, texture_sensitivity, optimal_altitude, altitude_tolerance) = match kind {
            CropKind::Wheat => (40, 1.2, 3.0, 0.5),
            CropKind::Corn => (50, 1.0, 4.0, 0.8),
            CropKind::Rice => (60, 1.1, 2.5, 0.4),
            CropKind::Cotton => (40, 0.9, 3.5, 0.6),
            CropKind::General => (50, 1.0, 3.0, 0.5),
        };
        Self {
            kind,
            color_range: HsvRange::new([35, min_sv, min_sv], [85, 255, 255]),
            texture_sensitivity,
            optimal_altitude,
            altitude_tolerance,
        }
    }

    pub fn from_name(name: &str) -> Self {
        Self::for_kind(CropKind::from_name(name))
    }
}

impl Default for CropProfile {
    fn default() -> Self {
        Self::for_kind(CropKind::General)
    }
}
