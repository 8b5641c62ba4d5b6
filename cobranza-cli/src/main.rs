mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::CobranzaConfig;
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so that stdout stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Preview {
            schedule,
            count,
            json,
        } => {
            let config = CobranzaConfig::load()?;
            commands::preview(&mut stdout, schedule.into(), count, json, &config)
        }
        Commands::Check { file } => commands::check(&mut stdout, &file),
        Commands::Next { schedule, after } => {
            let config = CobranzaConfig::load()?;
            commands::next(&mut stdout, schedule.into(), after, &config)
        }
        Commands::ConfigPath => {
            let path = CobranzaConfig::ensure_default_at(&CobranzaConfig::config_path()?)?;
            writeln!(stdout, "{}", path.display())?;
            Ok(())
        }
    }
}
