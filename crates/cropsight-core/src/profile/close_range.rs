use serde::{Deserialize, Serialize};
use tracing::info;

/// Whether the near-field threshold table is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseRangeMode {
    On,
    #[default]
    Off,
    /// Switch automatically from frame statistics.
    Auto,
}

impl std::fmt::Display for CloseRangeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => write!(f, "On"),
            Self::Off => write!(f, "Off"),
            Self::Auto => write!(f, "Auto"),
        }
    }
}

/// Hysteresis switch between open-field and close-range thresholds.
///
/// Enters close range on dark, high-spread frames and leaves it on bright,
/// flat ones. Between the two bands the current state is kept.
#[derive(Clone, Debug, Default)]
pub struct CloseRangeDetector {
    active: bool,
}

impl CloseRangeDetector {
    const ENTER_MAX_MEAN: f64 = 100.0;
    const ENTER_MIN_STD: f64 = 40.0;
    const LEAVE_MIN_MEAN: f64 = 120.0;
    const LEAVE_MAX_STD: f64 = 35.0;

    pub fn new(active: bool) -> Self {
        Self { active }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Feed grayscale mean/std of a frame. Returns `true` if the state flipped.
    pub fn observe(&mut self, mean_intensity: f64, std_intensity: f64) -> bool {
        let next = if mean_intensity < Self::ENTER_MAX_MEAN && std_intensity > Self::ENTER_MIN_STD {
            true
        } else if mean_intensity > Self::LEAVE_MIN_MEAN && std_intensity < Self::LEAVE_MAX_STD {
            false
        } else {
            self.active
        };

        let changed = next != self.active;
        if changed {
            info!(
                close_range = next,
                mean = mean_intensity,
                std = std_intensity,
                "Close-range mode switched"
            );
        }
        self.active = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_state_between_bands() {
        let mut d = CloseRangeDetector::default();
        assert!(d.observe(80.0, 50.0));
        assert!(d.is_active());
        // Neither band matches: stay in close range.
        assert!(!d.observe(110.0, 38.0));
        assert!(d.is_active());
        assert!(d.observe(130.0, 20.0));
        assert!(!d.is_active());
    }
}
