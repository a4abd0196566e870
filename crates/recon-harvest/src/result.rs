//! Normalized harvester output.
//!
//! The harvesting tool writes a JSON report with `emails`, `hosts`, `ips`,
//! `time` and optionally `asns`. [`HarvesterResult::from_raw`] turns that
//! report into the shape the reconciler consumes; [`read_harvest`] does the
//! same for a report on disk and folds any failure into a
//! [`HarvestOutcome::Failed`] marker.

use crate::error::{HarvestError, Result};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info, warn};

/// Name recorded in the metadata of every normalized result.
pub const HARVESTER_TOOL: &str = "theHarvester";

/// Timestamp recorded when the report carries none.
const UNKNOWN_TIME: &str = "unknown";

/// Where a harvester result came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvesterMetadata {
    /// Tool that produced the report
    pub tool: String,
    /// Domain the tool was run against
    pub domain: String,
    /// Report time as given by the tool, or `"unknown"`
    pub timestamp: String,
    /// Autonomous system numbers, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asns: Option<Value>,
}

/// Emails, hosts and IPs found for one domain, each deduplicated in
/// first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvesterResult {
    /// Domain the tool was run against
    pub domain: String,
    /// Email addresses
    #[serde(default)]
    pub emails: Vec<String>,
    /// Hosts and subdomains
    #[serde(default)]
    pub hosts: Vec<String>,
    /// IP addresses
    #[serde(default)]
    pub ips: Vec<String>,
    /// Provenance
    pub metadata: HarvesterMetadata,
}

impl HarvesterResult {
    /// Empty result for a domain.
    #[must_use]
    pub fn empty(domain: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            emails: Vec::new(),
            hosts: Vec::new(),
            ips: Vec::new(),
            metadata: HarvesterMetadata {
                tool: HARVESTER_TOOL.to_string(),
                domain: domain.clone(),
                timestamp: UNKNOWN_TIME.to_string(),
                asns: None,
            },
            domain,
        }
    }

    /// Normalize a raw harvester report.
    ///
    /// Missing list fields are empty. Non-string list entries are skipped.
    /// A report carrying an `error` string is turned into
    /// [`HarvestError::Reported`].
    pub fn from_raw(raw: &Value, domain: &str) -> Result<Self> {
        let report = raw.as_object().ok_or_else(|| HarvestError::NotAnObject {
            domain: domain.to_string(),
        })?;

        if let Some(error) = report.get("error").and_then(Value::as_str) {
            return Err(HarvestError::Reported(error.to_string()));
        }

        let mut result = Self::empty(domain);
        result.emails = string_list(report, "emails")?;
        result.hosts = string_list(report, "hosts")?;
        result.ips = string_list(report, "ips")?;

        match report.get("time") {
            Some(Value::String(time)) => result.metadata.timestamp.clone_from(time),
            Some(Value::Null) | None => {}
            Some(other) => result.metadata.timestamp = other.to_string(),
        }
        result.metadata.asns = report.get("asns").cloned();

        debug!(
            domain,
            emails = result.emails.len(),
            hosts = result.hosts.len(),
            ips = result.ips.len(),
            "normalized harvester report"
        );
        Ok(result)
    }
}

fn string_list(report: &Map<String, Value>, field: &str) -> Result<Vec<String>> {
    let items = match report.get(field) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(HarvestError::NotAList {
                field: field.to_string(),
                found: json_type(other),
            })
        }
    };

    let unique: IndexSet<&str> = items.iter().filter_map(Value::as_str).collect();
    if unique.len() < items.len() {
        debug!(field, dropped = items.len() - unique.len(), "dropped duplicate or non-string entries");
    }
    Ok(unique.into_iter().map(str::to_string).collect())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// What the harvester collaborator hands over: a result or a failure marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HarvestOutcome {
    /// The harvest failed upstream
    Failed {
        /// Upstream error message
        error: String,
        /// Domain that was being harvested
        domain: String,
    },
    /// The harvest produced a result
    Harvested(HarvesterResult),
}

impl HarvestOutcome {
    /// Build a failure marker.
    #[must_use]
    pub fn failed(error: impl Into<String>, domain: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
            domain: domain.into(),
        }
    }

    /// The domain of either variant.
    #[must_use]
    pub fn domain(&self) -> &str {
        match self {
            Self::Failed { domain, .. } => domain,
            Self::Harvested(result) => &result.domain,
        }
    }
}

impl From<HarvesterResult> for HarvestOutcome {
    fn from(result: HarvesterResult) -> Self {
        Self::Harvested(result)
    }
}

/// Read and normalize a harvester report from disk.
///
/// Never fails: unreadable files, invalid JSON and reported errors all
/// become [`HarvestOutcome::Failed`].
#[must_use]
pub fn read_harvest(path: &Path, domain: &str) -> HarvestOutcome {
    match try_read_harvest(path, domain) {
        Ok(result) => {
            info!(
                domain,
                emails = result.emails.len(),
                "loaded harvester report from {}",
                path.display()
            );
            result.into()
        }
        Err(e) => {
            warn!(domain, "harvester report unusable: {}", e);
            HarvestOutcome::failed(e.to_string(), domain)
        }
    }
}

fn try_read_harvest(path: &Path, domain: &str) -> Result<HarvesterResult> {
    let content = std::fs::read_to_string(path).map_err(|source| HarvestError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let raw: Value = serde_json::from_str(&content)?;
    HarvesterResult::from_raw(&raw, domain)
}
