use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ALTITUDE_M, MIN_ALTITUDE_M};

/// Urgency of a positioning adjustment, 0 (optimal) to 3 (critical).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Priority {
    #[default]
    Optimal = 0,
    Low = 1,
    Moderate = 2,
    Critical = 3,
}

impl Priority {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Baseline urgency implied by a composite score.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Optimal
        } else if score >= 70.0 {
            Self::Low
        } else if score >= 50.0 {
            Self::Moderate
        } else {
            Self::Critical
        }
    }

    pub fn directive(self) -> Directive {
        match self {
            Self::Optimal => Directive::MaintainPosition,
            Self::Low => Directive::FineTune,
            Self::Moderate => Directive::GradualAdjustment,
            Self::Critical => Directive::ImmediateAdjustment,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Coarse instruction for downstream controllers, derived from priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directive {
    MaintainPosition,
    FineTune,
    GradualAdjustment,
    ImmediateAdjustment,
}

impl std::fmt::Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MaintainPosition => write!(f, "maintain_position"),
            Self::FineTune => write!(f, "fine_tune"),
            Self::GradualAdjustment => write!(f, "gradual_adjustment"),
            Self::ImmediateAdjustment => write!(f, "immediate_adjustment"),
        }
    }
}

/// Which aspect of image quality an adjustment addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Lighting,
    Focus,
    Coverage,
    Detail,
    Noise,
    Height,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lighting => write!(f, "lighting"),
            Self::Focus => write!(f, "focus"),
            Self::Coverage => write!(f, "coverage"),
            Self::Detail => write!(f, "detail"),
            Self::Noise => write!(f, "noise"),
            Self::Height => write!(f, "height"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleDirection {
    Downward,
}

/// Symbolic movement. Altitude variants carry the requested magnitude and the
/// resulting target, already clamped to the safety band.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    DecreaseAltitude { meters: f64, target: f64 },
    IncreaseAltitude { meters: f64, target: f64 },
    AdjustAngle { direction: AngleDirection },
    Maintain,
}

impl Action {
    pub fn descend(from: f64, meters: f64) -> Self {
        Self::DecreaseAltitude {
            meters,
            target: clamp_altitude(from - meters),
        }
    }

    pub fn ascend(from: f64, meters: f64) -> Self {
        Self::IncreaseAltitude {
            meters,
            target: clamp_altitude(from + meters),
        }
    }

    /// Altitude after this action starting from `from`.
    pub fn target_altitude(&self, from: f64) -> f64 {
        match self {
            Self::DecreaseAltitude { target, .. } | Self::IncreaseAltitude { target, .. } => {
                *target
            }
            Self::AdjustAngle { .. } | Self::Maintain => from,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DecreaseAltitude { meters, target } => {
                write!(f, "DESCEND_{meters:.2}m (to {target:.2}m)")
            }
            Self::IncreaseAltitude { meters, target } => {
                write!(f, "ASCEND_{meters:.2}m (to {target:.2}m)")
            }
            Self::AdjustAngle { .. } => write!(f, "TILT_DOWNWARD"),
            Self::Maintain => write!(f, "MAINTAIN_POSITION"),
        }
    }
}

/// One recommendation produced by a triggered rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentCommand {
    #[serde(flatten)]
    pub action: Action,
    pub category: Category,
    pub priority: Priority,
    pub reason: String,
}

/// Clamp an altitude into the global safety band.
pub fn clamp_altitude(meters: f64) -> f64 {
    meters.clamp(MIN_ALTITUDE_M, MAX_ALTITUDE_M)
}
