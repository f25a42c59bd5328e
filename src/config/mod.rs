#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::SchedulerSettings;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_CLIP_DURATION: f64 = 1.0;
pub const DEFAULT_TIME_TOLERANCE: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub min_clip_duration: f64,
    pub time_tolerance: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_clip_duration: DEFAULT_MIN_CLIP_DURATION,
            time_tolerance: DEFAULT_TIME_TOLERANCE,
        }
    }
}

impl SchedulerSettings for SchedulerConfig {
    fn min_clip_duration(&self) -> f64 {
        self.min_clip_duration
    }

    fn time_tolerance(&self) -> f64 {
        self.time_tolerance
    }
}

impl Validate for SchedulerConfig {
    fn validate(&self) -> Result<()> {
        validate_positive("scheduler.min_clip_duration", self.min_clip_duration)?;
        validate_positive("scheduler.time_tolerance", self.time_tolerance)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;
