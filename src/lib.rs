pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::SchedulerConfig;
pub use crate::core::{
    json_runner::run_json,
    playlist::SequentialPlaylist,
    scheduler::{ContentClipParams, ScheduleClipParams, Scheduler, SeekToStartParams},
};
pub use crate::domain::seekbar::SeekPosition;
pub use crate::utils::error::{Result, SchedulerError};
