//! Quick inspection of a result file.

use crate::document::RESULTS_KEY;
use crate::error::{Result, StoreError};
use crate::store::read_value;
use recon_core::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File statistics plus a glance at the most recent result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSummary {
    /// Summarized file
    pub filepath: PathBuf,
    /// File size in bytes
    pub size_bytes: u64,
    /// Last modification time (RFC3339)
    pub modified_time: String,
    /// Number of stored results; 1 for a bare single-result file
    pub result_count: usize,
    /// Emails in the latest result
    pub latest_emails: usize,
    /// Phones in the latest result
    pub latest_phones: usize,
    /// Source URL of the latest result
    pub latest_source: Option<String>,
}

/// Summarize the result file at `path`.
///
/// Returns `None` if the file is absent, empty or unreadable.
#[must_use]
pub fn summarize(path: &Path) -> Option<StoreSummary> {
    match try_summarize(path) {
        Ok(summary) => summary,
        Err(e) => {
            warn!("Could not summarize {}: {}", path.display(), e);
            None
        }
    }
}

/// Fallible form of [`summarize`].
///
/// Works on the raw JSON rather than a decoded [`StoreDocument`], so a
/// collection holding legacy entries that are not contact results can still
/// be inspected. A document with a `results` key is a collection; anything
/// else counts as one result.
///
/// [`StoreDocument`]: crate::StoreDocument
pub fn try_summarize(path: &Path) -> Result<Option<StoreSummary>> {
    let Some(document) = read_value(path)? else {
        return Ok(None);
    };
    let stat = fs::metadata(path).map_err(|e| StoreError::io(path, e))?;
    let modified = stat.modified().map_err(|e| StoreError::io(path, e))?;

    let (result_count, latest) = match document.get(RESULTS_KEY) {
        Some(results) => {
            let results = results.as_array().map(Vec::as_slice).unwrap_or_default();
            (results.len(), results.last())
        }
        None => (1, Some(&document)),
    };

    Ok(Some(StoreSummary {
        filepath: path.to_path_buf(),
        size_bytes: stat.len(),
        modified_time: Timestamp::from(modified).to_rfc3339(),
        result_count,
        latest_emails: list_len(latest, "emails"),
        latest_phones: list_len(latest, "phones"),
        latest_source: latest
            .and_then(|entry| entry.pointer("/metadata/source_url"))
            .and_then(Value::as_str)
            .map(str::to_string),
    }))
}

fn list_len(entry: Option<&Value>, key: &str) -> usize {
    entry
        .and_then(|entry| entry.get(key))
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{append, save};
    use recon_core::ContactResult;
    use tempfile::TempDir;

    fn result(url: &str, emails: &[&str], phones: &[&str]) -> ContactResult {
        let mut result = ContactResult {
            emails: emails.iter().copied().collect(),
            phones: phones.iter().copied().collect(),
            ..ContactResult::default()
        };
        result.metadata.source_url = Some(url.to_string());
        result
    }

    #[test]
    fn test_summary_of_single_result() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("result.json");
        assert!(save(&result("https://a.example", &["a@a.example"], &[]), &path));

        let summary = summarize(&path).expect("summary");
        assert_eq!(summary.result_count, 1);
        assert_eq!(summary.latest_emails, 1);
        assert_eq!(summary.latest_phones, 0);
        assert_eq!(summary.latest_source.as_deref(), Some("https://a.example"));
        assert_eq!(summary.filepath, path);
        assert!(summary.size_bytes > 0);
        assert!(Timestamp::from_rfc3339(&summary.modified_time).is_ok());
    }

    #[test]
    fn test_summary_reports_latest_of_collection() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("results.json");
        assert!(append(&result("https://a.example", &["a@a.example"], &[]), &path));
        assert!(append(
            &result("https://b.example", &[], &["2125550100", "4155551212"]),
            &path
        ));

        let summary = summarize(&path).expect("summary");
        assert_eq!(summary.result_count, 2);
        assert_eq!(summary.latest_emails, 0);
        assert_eq!(summary.latest_phones, 2);
        assert_eq!(summary.latest_source.as_deref(), Some("https://b.example"));
    }

    #[test]
    fn test_summary_of_empty_collection() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("results.json");
        fs::write(&path, r#"{"results": []}"#).expect("write file");

        let summary = summarize(&path).expect("summary");
        assert_eq!(summary.result_count, 0);
        assert!(summary.latest_source.is_none());
    }

    #[test]
    fn test_summary_counts_collection_with_legacy_entry() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("results.json");
        fs::write(&path, "[1, 2]").expect("write legacy file");

        assert!(append(&result("https://a.example", &["a@a.example"], &[]), &path));
        assert!(append(
            &result("https://b.example", &["b@b.example", "c@b.example"], &["2125550100"]),
            &path
        ));

        let summary = summarize(&path).expect("summary");
        assert_eq!(summary.result_count, 3);
        assert_eq!(summary.latest_emails, 2);
        assert_eq!(summary.latest_phones, 1);
        assert_eq!(summary.latest_source.as_deref(), Some("https://b.example"));
    }

    #[test]
    fn test_summary_of_collection_with_null_counters() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("results.json");
        fs::write(
            &path,
            r#"{"results": [
                {"emails": ["a@a.example"], "metadata": {"total_emails_found": null}},
                {"emails": [], "phones": ["2125550100"], "metadata": {"source_url": "https://b.example"}}
            ]}"#,
        )
        .expect("write file");

        let summary = summarize(&path).expect("summary");
        assert_eq!(summary.result_count, 2);
        assert_eq!(summary.latest_emails, 0);
        assert_eq!(summary.latest_phones, 1);
        assert_eq!(summary.latest_source.as_deref(), Some("https://b.example"));
    }

    #[test]
    fn test_summary_absent_or_unreadable() {
        let dir = TempDir::new().expect("create temp dir");
        assert!(summarize(&dir.path().join("missing.json")).is_none());

        let empty = dir.path().join("empty.json");
        fs::write(&empty, "   ").expect("write file");
        assert!(summarize(&empty).is_none());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{oops").expect("write file");
        assert!(summarize(&broken).is_none());
    }
}
