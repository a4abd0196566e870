//! `recon` - extract, reconcile and store contact information from scraper
//! and harvester output.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::ExtractArgs;
use recon_core::AppConfig;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "recon")]
#[command(about = "Professional contact reconnaissance: extraction, reconciliation, storage")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to the per-user config location)
    #[arg(long, global = true, env = "RECON_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract contacts from a scraped record, optionally merge a harvester
    /// report, and store the result
    Extract(ExtractArgs),

    /// Print a stored result file
    Show {
        /// Result file; defaults to the configured output file
        path: Option<PathBuf>,
    },

    /// Summarize a stored result file
    Summary {
        /// Result file; defaults to the configured output file
        path: Option<PathBuf>,
    },

    /// Print the harvester domain for a URL
    Domain {
        /// Source URL
        url: String,
    },
}

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,recon=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    let mut config = match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load().context("failed to load config")?,
    };
    config.apply_overrides(|key| std::env::var(key).ok());
    config.validate().context("invalid configuration")?;

    debug!(?config, "configuration loaded");
    Ok(config)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    info!("recon v{}", env!("CARGO_PKG_VERSION"));
    let config = load_config(cli.config.as_ref())?;

    let output = match &cli.command {
        Command::Extract(args) => commands::extract(&config, args)?,
        Command::Show { path } => commands::show(&config, path.as_deref())?,
        Command::Summary { path } => commands::summary(&config, path.as_deref())?,
        Command::Domain { url } => commands::domain(url)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
