// src/main.rs
use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use log::{error, info};
use scopebench::config::BenchConfig;
use scopebench::engine;
use scopebench::types::ChannelOutcome;
/// Measure frequency and capture waveforms from a bench oscilloscope.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON configuration; the simulated oscilloscope is used when omitted.
    config: Option<PathBuf>,
}
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => BenchConfig::load(&path)?,
        None => {
            info!("no config given, running against the simulated oscilloscope");
            BenchConfig::default()
        }
    };
    let report = engine::run_from_config(&config)?;
    info!("run against {} finished", report.identity);
    for outcome in &report.channels {
        let channel = outcome.channel();
        match outcome {
            ChannelOutcome::Saved { artifacts, .. } => {
                for path in artifacts {
                    println!("{channel}: {}", path.display());
                }
            }
            ChannelOutcome::Skipped { reason, .. } => {
                error!("{channel} skipped: {reason}");
            }
        }
    }
    Ok(())
}
