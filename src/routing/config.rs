use crate::config::ConfigError;
use crate::config::env;
use crate::constants::{DEFAULT_DIRECT_THRESHOLD, DEFAULT_GAP_THRESHOLD, DEFAULT_MIN_THRESHOLD};

/// Score thresholds that drive mode selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutingThresholds {
    /// Best score at or above this may be answered verbatim.
    pub direct: f64,
    /// Best score below this is a fallback.
    pub min: f64,
    /// Best must lead the runner-up by at least this much for a direct answer.
    pub gap: f64,
}

impl Default for RoutingThresholds {
    fn default() -> Self {
        Self {
            direct: DEFAULT_DIRECT_THRESHOLD,
            min: DEFAULT_MIN_THRESHOLD,
            gap: DEFAULT_GAP_THRESHOLD,
        }
    }
}

impl RoutingThresholds {
    const ENV_DIRECT: &'static str = "FAQ_DIRECT_THRESHOLD";
    const ENV_MIN: &'static str = "FAQ_MIN_THRESHOLD";
    const ENV_GAP: &'static str = "FAQ_GAP_THRESHOLD";

    pub fn new(direct: f64, min: f64, gap: f64) -> Self {
        Self { direct, min, gap }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            direct: env::parse_or(Self::ENV_DIRECT, defaults.direct)?,
            min: env::parse_or(Self::ENV_MIN, defaults.min)?,
            gap: env::parse_or(Self::ENV_GAP, defaults.gap)?,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            (Self::ENV_DIRECT, self.direct),
            (Self::ENV_MIN, self.min),
            (Self::ENV_GAP, self.gap),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }

        if self.gap < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                name: Self::ENV_GAP,
                value: self.gap,
            });
        }

        if self.min > self.direct {
            return Err(ConfigError::ThresholdOrder {
                min: self.min,
                direct: self.direct,
            });
        }

        Ok(())
    }
}
