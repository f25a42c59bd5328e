use anyhow::Context;
use clap::Parser;
use player_sequencer::config::toml_config::ScheduleFile;
use player_sequencer::core::PlaylistAccess;
use player_sequencer::utils::{logger, validation::Validate};
use player_sequencer::{CliConfig, Scheduler};
use std::io::{BufRead, BufReader, Write};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.log_json);

    tracing::info!("Starting player-sequencer");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證參數
    if let Err(e) = config.validate() {
        tracing::error!("❌ Invalid arguments: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let mut scheduler = match &config.schedule {
        Some(path) => {
            tracing::info!("📁 Loading schedule from: {}", path.display());
            ScheduleFile::from_file(path)
                .and_then(|file| file.build_scheduler())
                .with_context(|| format!("failed to build schedule '{}'", path.display()))?
        }
        None => Scheduler::default(),
    };
    tracing::debug!("Scheduler settings: {:?}", scheduler.config());

    if let Some(script) = &config.script {
        let reader: Box<dyn BufRead> = if script == "-" {
            Box::new(BufReader::new(std::io::stdin()))
        } else {
            let file = std::fs::File::open(script)
                .with_context(|| format!("failed to open script '{}'", script))?;
            Box::new(BufReader::new(file))
        };
        run_script(&mut scheduler, reader)?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if config.dump {
        writeln!(out, "{}", scheduler.playlist().to_json()?)?;
    }
    if let Some(current) = config.position {
        let position = scheduler.playlist().seek_position(current);
        writeln!(out, "{}", serde_json::to_string(&position)?)?;
    }

    tracing::info!(
        "✅ Playlist has {} entries, {}s linear duration",
        scheduler.playlist().len(),
        scheduler.playlist().linear_duration()
    );
    Ok(())
}

/// 每行一個 JSON 請求；空行與 `#` 開頭的行略過
fn run_script(scheduler: &mut Scheduler, reader: Box<dyn BufRead>) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read script line {}", number + 1))?;
        let request = line.trim();
        if request.is_empty() || request.starts_with('#') {
            continue;
        }
        let response = scheduler.run_json(request);
        writeln!(out, "{}", response)?;
    }
    Ok(())
}
