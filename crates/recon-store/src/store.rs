//! Saving, loading and appending result files.
//!
//! Every write replaces the whole file: the new content goes to a temporary
//! file in the destination directory, which is then renamed over the
//! target. A crash mid-write leaves the previous file intact.
//!
//! `append` is a read-modify-write cycle. Within one process, appends made
//! through a shared [`ResultStore`] are serialized. Across processes there
//! is no locking: one writer per file is a precondition.
//!
//! The public functions follow the store's reporting contract: `save` and
//! `append` return `bool`, `load` returns `Option`. Each has a `try_*`
//! counterpart returning the underlying [`StoreError`].

use crate::document::{StoreDocument, RESULTS_KEY};
use crate::error::{Result, StoreError};
use recon_core::{ContactResult, Timestamp};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

/// Save a single result, replacing whatever is at `path`.
///
/// Stamps `extraction_timestamp` with the current time when it is missing.
pub fn save(result: &ContactResult, path: &Path) -> bool {
    report("save", path, try_save(result, path))
}

/// Fallible form of [`save`].
pub fn try_save(result: &ContactResult, path: &Path) -> Result<()> {
    let mut result = result.clone();
    if result.metadata.extraction_timestamp.is_none() {
        result.metadata.extraction_timestamp = Some(Timestamp::now().to_rfc3339());
    }

    write_json_atomic(path, &result)?;
    info!("Saved result to {}", path.display());
    Ok(())
}

/// Load a result file.
///
/// Returns `None` if the file is absent, empty or cannot be decoded.
#[must_use]
pub fn load(path: &Path) -> Option<StoreDocument> {
    match try_load(path) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("Could not load {}: {}", path.display(), e);
            None
        }
    }
}

/// Fallible form of [`load`]; `Ok(None)` means there is nothing stored yet.
pub fn try_load(path: &Path) -> Result<Option<StoreDocument>> {
    read_value(path)?
        .map(serde_json::from_value::<StoreDocument>)
        .transpose()
        .map_err(StoreError::from)
}

/// Append a result to the collection at `path`.
///
/// A missing file starts a new collection. A bare single-result document, or
/// any other JSON value without a `results` list, is wrapped as the first
/// element of a new collection. The appended result is stamped with
/// `saved_timestamp`. A file that exists but cannot be decoded is left
/// untouched and the append fails.
pub fn append(result: &ContactResult, path: &Path) -> bool {
    report("append", path, try_append(result, path))
}

/// Fallible form of [`append`].
pub fn try_append(result: &ContactResult, path: &Path) -> Result<()> {
    let mut document = match read_value(path)? {
        Some(existing) => into_collection(existing),
        None => Map::from_iter([(RESULTS_KEY.to_string(), Value::Array(Vec::new()))]),
    };

    let mut entry = result.clone();
    entry.metadata.saved_timestamp = Some(Timestamp::now().to_rfc3339());
    let entry = serde_json::to_value(entry)?;

    let Some(results) = document.get_mut(RESULTS_KEY).and_then(Value::as_array_mut) else {
        return Err(StoreError::Malformed {
            path: path.to_path_buf(),
            reason: "results is not a list".to_string(),
        });
    };
    results.push(entry);
    let count = results.len();

    write_json_atomic(path, &document)?;
    info!(results = count, "Appended result to {}", path.display());
    Ok(())
}

/// Coerce any decoded document into a `{"results": [...]}` object.
fn into_collection(existing: Value) -> Map<String, Value> {
    match existing {
        Value::Object(map) if matches!(map.get(RESULTS_KEY), Some(Value::Array(_))) => map,
        other => {
            debug!("Wrapping legacy document into a results collection");
            Map::from_iter([(RESULTS_KEY.to_string(), Value::Array(vec![other]))])
        }
    }
}

/// Read and decode `path`; absent or blank files are `None`.
pub(crate) fn read_value(path: &Path) -> Result<Option<Value>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| StoreError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Pretty-print `value` to `path` through a temporary file and a rename.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let dir = parent_dir(path);
    fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

    let temp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush().map_err(|e| StoreError::io(temp.path(), e))?;
    }

    temp.persist(path).map_err(|e| StoreError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

pub(crate) fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

fn report(operation: &str, path: &Path, outcome: Result<()>) -> bool {
    match outcome {
        Ok(()) => true,
        Err(e) => {
            error!("Failed to {} {}: {}", operation, path.display(), e);
            false
        }
    }
}

/// A result file shared by several threads of one process.
///
/// Writes made through the same handle never interleave, so concurrent
/// appends are never lost. Handles in different processes do not
/// coordinate.
#[derive(Debug)]
pub struct ResultStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ResultStore {
    /// Create a handle for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The file this handle writes to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// See [`save`].
    pub fn save(&self, result: &ContactResult) -> bool {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        save(result, &self.path)
    }

    /// See [`append`].
    pub fn append(&self, result: &ContactResult) -> bool {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        append(result, &self.path)
    }

    /// See [`load`].
    #[must_use]
    pub fn load(&self) -> Option<StoreDocument> {
        load(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recon_core::ValidatedSet;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn sample(email: &str) -> ContactResult {
        let mut result = ContactResult {
            emails: [email].into_iter().collect::<ValidatedSet>(),
            ..ContactResult::default()
        };
        result.metadata.source_url = Some("https://example.com".to_string());
        result.metadata.validated_emails = 1;
        result.metadata.total_emails_found = 1;
        result
    }

    fn read_json(path: &Path) -> Value {
        let content = fs::read_to_string(path).expect("read result file");
        serde_json::from_str(&content).expect("parse result file")
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("nested/out/result.json");
        let result = sample("a@b.com");

        assert!(save(&result, &path));

        let loaded = load(&path).expect("load saved result");
        let StoreDocument::Single(mut loaded) = loaded else {
            panic!("expected a single-result document");
        };
        assert!(loaded.metadata.extraction_timestamp.is_some());
        loaded.metadata.extraction_timestamp = None;
        assert_eq!(loaded, result);
    }

    #[test]
    fn test_save_keeps_existing_timestamp() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("result.json");
        let mut result = sample("a@b.com");
        result.metadata.extraction_timestamp = Some("2024-01-01T00:00:00+00:00".to_string());

        assert!(save(&result, &path));
        assert_eq!(
            read_json(&path)["metadata"]["extraction_timestamp"],
            "2024-01-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_save_output_format() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("result.json");
        let mut result = sample("a@b.com");
        result.metadata.name = Some("Jürgen Müller".to_string());

        assert!(save(&result, &path));

        let content = fs::read_to_string(&path).expect("read result file");
        assert!(content.contains("Jürgen Müller"));
        assert!(content.contains("\n  \"emails\": [\n    \"a@b.com\"\n  ]"));
    }

    #[test]
    fn test_load_absent_empty_and_malformed() {
        let dir = TempDir::new().expect("create temp dir");

        assert!(load(&dir.path().join("missing.json")).is_none());

        let empty = dir.path().join("empty.json");
        fs::write(&empty, "").expect("write empty file");
        assert!(load(&empty).is_none());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{\"results\": [").expect("write broken file");
        assert!(load(&broken).is_none());
        assert!(matches!(try_load(&broken), Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn test_append_to_nonexistent_path() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("results.json");

        assert!(append(&sample("a@b.com"), &path));

        let value = read_json(&path);
        let results = value["results"].as_array().expect("results list");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["emails"][0], "a@b.com");
        assert!(results[0]["metadata"]["saved_timestamp"].is_string());
    }

    #[test]
    fn test_append_promotes_single_result() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("results.json");
        assert!(save(&sample("old@b.com"), &path));

        assert!(append(&sample("new@b.com"), &path));

        let value = read_json(&path);
        let results = value["results"].as_array().expect("results list");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["emails"][0], "old@b.com");
        assert_eq!(results[1]["emails"][0], "new@b.com");

        let doc = load(&path).expect("load collection");
        assert!(!doc.is_single());
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_append_wraps_non_container_values() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("results.json");
        fs::write(&path, "[1, 2]").expect("write legacy file");

        assert!(append(&sample("a@b.com"), &path));

        let value = read_json(&path);
        assert_eq!(value["results"][0], serde_json::json!([1, 2]));
        assert_eq!(value["results"][1]["emails"][0], "a@b.com");
    }

    #[test]
    fn test_append_keeps_unknown_keys() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("results.json");
        fs::write(&path, r#"{"results": [{"custom": true}], "owner": "ops"}"#)
            .expect("write existing file");

        assert!(append(&sample("a@b.com"), &path));

        let value = read_json(&path);
        assert_eq!(value["owner"], "ops");
        assert_eq!(value["results"][0]["custom"], true);
        assert_eq!(value["results"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_append_refuses_malformed_file() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("results.json");
        fs::write(&path, "not json at all").expect("write malformed file");

        assert!(!append(&sample("a@b.com"), &path));
        assert_eq!(
            fs::read_to_string(&path).expect("read file"),
            "not json at all"
        );
    }

    #[test]
    fn test_concurrent_appends_are_not_lost() {
        let dir = TempDir::new().expect("create temp dir");
        let store = Arc::new(ResultStore::new(dir.path().join("results.json")));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.append(&sample(&format!("user{i}@example.com"))))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().expect("append thread"));
        }

        let doc = store.load().expect("load collection");
        assert_eq!(doc.len(), 8);
    }

    #[test]
    fn test_parent_dir_of_bare_file_name() {
        assert_eq!(parent_dir(Path::new("results.json")), Path::new("."));
        assert_eq!(parent_dir(Path::new("out/results.json")), Path::new("out"));
    }
}
