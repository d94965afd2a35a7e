//! Configuration for the scheduling engine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::grid::{TimeGrid, TimePoint};

/// Engine configuration: the daily window, grid granularity, and the
/// minimum duration a common free window must reach to be offered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// First time point of the daily window.
    pub window_start: TimePoint,
    /// Last time point of the daily window.
    pub window_end: TimePoint,
    /// Grid granularity in minutes.
    pub granularity_minutes: u16,
    /// Minimum free-window duration in minutes. A hard cutoff: a window of
    /// exactly this length passes, one minute less does not.
    pub min_window_minutes: u16,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        let grid = TimeGrid::default();
        Self {
            window_start: grid.window_start,
            window_end: grid.window_end,
            granularity_minutes: grid.granularity_minutes,
            min_window_minutes: 60,
        }
    }
}

impl ScheduleConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ScheduleConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.window_start >= self.window_end {
            return Err(ConfigError::Invalid(format!(
                "window_start {} must be before window_end {}",
                self.window_start, self.window_end
            ))
            .into());
        }
        if self.granularity_minutes == 0 {
            return Err(ConfigError::Invalid("granularity_minutes must be > 0".to_string()).into());
        }
        let span = self.window_end.minutes() - self.window_start.minutes();
        if span % self.granularity_minutes != 0 {
            return Err(ConfigError::Invalid(format!(
                "daily window span ({span} minutes) is not a multiple of the granularity"
            ))
            .into());
        }
        if self.min_window_minutes == 0 || self.min_window_minutes % self.granularity_minutes != 0 {
            return Err(ConfigError::Invalid(format!(
                "min_window_minutes ({}) must be a positive multiple of the granularity",
                self.min_window_minutes
            ))
            .into());
        }
        Ok(())
    }

    /// Build the time grid this configuration describes.
    pub fn grid(&self) -> TimeGrid {
        TimeGrid::new(self.window_start, self.window_end, self.granularity_minutes)
    }
}
