//! Subcommand implementations.
//!
//! Each command returns the JSON value it prints, so the wiring in `main`
//! stays trivial and the commands can be exercised directly.

use anyhow::{bail, Context, Result};
use clap::Args;
use recon_core::{AppConfig, ContactResult};
use recon_extract::{ExtractionPipeline, ScrapeOutcome};
use recon_harvest::{domain_from_url, merge_outcome, read_harvest};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Options of the `extract` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ExtractArgs {
    /// Scraper output: a record or an `{error, url}` marker (JSON)
    #[arg(long, short = 'r', value_name = "FILE")]
    pub record: PathBuf,

    /// Harvester report to merge in (JSON)
    #[arg(long, value_name = "FILE")]
    pub harvest: Option<PathBuf>,

    /// Harvested domain; derived from the record URL when omitted
    #[arg(long, requires = "harvest")]
    pub domain: Option<String>,

    /// Result file; defaults to the configured output file
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Overwrite the result file with this result instead of appending
    #[arg(long)]
    pub no_append: bool,

    /// Print the result without persisting it
    #[arg(long, conflicts_with_all = ["output", "no_append"])]
    pub no_save: bool,

    /// Also export the result as CSV
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,
}

/// Run the extraction pipeline on one record and persist the result.
pub fn extract(config: &AppConfig, args: &ExtractArgs) -> Result<Value> {
    let outcome: ScrapeOutcome = read_json(&args.record)?;

    let pipeline = ExtractionPipeline::from_config(config);
    let mut result = pipeline.extract_contacts(&outcome);

    if let Some(report) = &args.harvest {
        result = merge_harvest(result, report, args.domain.as_deref());
    }

    if !args.no_save {
        let output = resolve_output(config, args.output.as_deref())?;
        let appending = config.storage.append && !args.no_append;

        let written = if appending {
            recon_store::append(&result, &output)
        } else {
            recon_store::save(&result, &output)
        };
        if !written {
            bail!("failed to write result to {}", output.display());
        }
        info!(appending, "Result stored in {}", output.display());
    }

    if let Some(csv) = args.csv.as_ref().or(config.storage.csv_export.as_ref()) {
        if !recon_store::export_csv(&result, csv) {
            bail!("failed to export CSV to {}", csv.display());
        }
    }

    Ok(serde_json::to_value(&result)?)
}

fn merge_harvest(result: ContactResult, report: &Path, domain: Option<&str>) -> ContactResult {
    let domain = domain.map(str::to_string).or_else(|| {
        result
            .metadata
            .source_url
            .as_deref()
            .and_then(domain_from_url)
    });

    match domain {
        Some(domain) => merge_outcome(result, &read_harvest(report, &domain)),
        None => {
            warn!("No domain for harvester report {}; skipping merge", report.display());
            result
        }
    }
}

/// Load a stored result file.
pub fn show(config: &AppConfig, path: Option<&Path>) -> Result<Value> {
    let path = resolve_output(config, path)?;
    match recon_store::load(&path) {
        Some(document) => Ok(serde_json::to_value(document)?),
        None => bail!("no results found at {}", path.display()),
    }
}

/// Summarize a stored result file.
pub fn summary(config: &AppConfig, path: Option<&Path>) -> Result<Value> {
    let path = resolve_output(config, path)?;
    match recon_store::summarize(&path) {
        Some(summary) => Ok(serde_json::to_value(summary)?),
        None => bail!("no results found at {}", path.display()),
    }
}

/// The harvester domain for a URL.
pub fn domain(url: &str) -> Result<Value> {
    domain_from_url(url)
        .map(Value::String)
        .with_context(|| format!("no host in URL '{url}'"))
}

fn resolve_output(config: &AppConfig, path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => config
            .output_file()
            .context("could not determine the default result file"),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
