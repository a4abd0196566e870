//! Flat CSV export of one contact result.

use crate::error::{Result, StoreError};
use crate::store::parent_dir;
use recon_core::{ContactKind, ContactResult};
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Column header of the export.
pub const CSV_HEADER: [&str; 7] = [
    "Type",
    "Value",
    "Source_URL",
    "Name",
    "Title",
    "Company",
    "Location",
];

/// Write one row per email and one row per phone to `path`.
///
/// Every row repeats the subject columns from the result's metadata;
/// missing values are written as empty cells.
pub fn export_csv(result: &ContactResult, path: &Path) -> bool {
    match try_export_csv(result, path) {
        Ok(rows) => {
            info!(rows, "Exported contacts to CSV {}", path.display());
            true
        }
        Err(e) => {
            error!("Failed to export CSV {}: {}", path.display(), e);
            false
        }
    }
}

/// Fallible form of [`export_csv`]; returns the number of data rows.
pub fn try_export_csv(result: &ContactResult, path: &Path) -> Result<usize> {
    let dir = parent_dir(path);
    fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADER)?;

    let m = &result.metadata;
    let subject = [&m.source_url, &m.name, &m.title, &m.company, &m.location]
        .map(|field| field.as_deref().unwrap_or_default());

    let mut rows = 0;
    for kind in ContactKind::all() {
        for value in result.contacts(kind) {
            let mut record = vec![kind.csv_label(), value.as_str()];
            record.extend(subject);
            writer.write_record(&record)?;
            rows += 1;
        }
    }

    writer.flush().map_err(|e| StoreError::io(path, e))?;
    Ok(rows)
}
