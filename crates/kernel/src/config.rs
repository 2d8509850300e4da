use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::time::Time;

/// Upper bound for every duration field, in seconds.
pub const MAX_CONFIG_SECS: f64 = 3600.0;

/// Errors from loading or validating a client configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Loop driver tuning. Every field has a default, so partial files are fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Fixed simulation steps per second.
    pub update_frequency: u32,
    /// Sleep only if the next step is at least this far away.
    pub max_sleep_skew_secs: f64,
    /// Cap on a single frame's elapsed time.
    pub max_frame_time_secs: f64,
    /// How long to yield when sleeping.
    pub sleep_quantum_secs: f64,
    pub sleep_enabled: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            update_frequency: 50,
            max_sleep_skew_secs: 0.01,
            max_frame_time_secs: 0.25,
            sleep_quantum_secs: 0.002,
            sleep_enabled: true,
        }
    }
}

impl ClientConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&data)?;
        tracing::debug!(path = %path.as_ref().display(), ?config, "loaded client config");
        Ok(config)
    }

    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_frequency == 0 {
            return Err(ConfigError::Invalid {
                field: "update_frequency",
                reason: "must be at least 1".into(),
            });
        }
        if self.update_period() <= Time::ZERO {
            return Err(ConfigError::Invalid {
                field: "update_frequency",
                reason: format!(
                    "{} Hz is too fast for nanosecond precision",
                    self.update_frequency
                ),
            });
        }
        check_secs("max_sleep_skew_secs", self.max_sleep_skew_secs)?;
        check_secs("sleep_quantum_secs", self.sleep_quantum_secs)?;
        check_secs("max_frame_time_secs", self.max_frame_time_secs)?;
        if self.max_frame_time() <= Time::ZERO {
            return Err(ConfigError::Invalid {
                field: "max_frame_time_secs",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    pub fn update_period(&self) -> Time {
        Time::from_secs_f64(1.0 / f64::from(self.update_frequency))
    }

    pub fn max_sleep_skew(&self) -> Time {
        Time::from_secs_f64(self.max_sleep_skew_secs)
    }

    pub fn max_frame_time(&self) -> Time {
        Time::from_secs_f64(self.max_frame_time_secs)
    }

    pub fn sleep_quantum(&self) -> Time {
        Time::from_secs_f64(self.sleep_quantum_secs)
    }
}

fn check_secs(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=MAX_CONFIG_SECS).contains(&value) {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("expected 0 to {MAX_CONFIG_SECS} seconds, got {value}"),
        });
    }
    Ok(())
}
