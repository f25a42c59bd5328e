use crate::utils::error::{Result, SchedulerError};
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "player-sequencer")]
#[command(about = "Build and inspect media playback schedules")]
pub struct CliConfig {
    /// TOML schedule to load before running requests
    #[arg(short, long)]
    pub schedule: Option<PathBuf>,

    /// File with one JSON request per line ("-" reads stdin)
    #[arg(long)]
    pub script: Option<String>,

    /// Print the final playlist as JSON
    #[arg(long)]
    pub dump: bool,

    /// Seek bar position to report against the final playlist
    #[arg(long)]
    pub position: Option<f64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.schedule.is_none() && self.script.is_none() {
            return Err(SchedulerError::config(
                "nothing to do: pass --schedule and/or --script",
            ));
        }
        if let Some(script) = &self.script {
            validate_non_empty_string("script", script)?;
        }
        if let Some(position) = self.position {
            crate::utils::validation::validate_finite("position", position)?;
        }
        Ok(())
    }
}
