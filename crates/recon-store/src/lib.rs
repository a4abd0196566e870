//! Recon Store - Durable, appendable storage for contact results.
//!
//! Results are kept as pretty-printed UTF-8 JSON, either as a single bare
//! result or as a `{"results": [...]}` collection that grows with every
//! append. Legacy single-result files are promoted to a collection on the
//! first append.
//!
//! # Example
//!
//! ```rust,no_run
//! use recon_core::ContactResult;
//! use std::path::Path;
//!
//! let path = Path::new("data/results.json");
//! if recon_store::append(&ContactResult::default(), path) {
//!     if let Some(summary) = recon_store::summarize(path) {
//!         println!("{} results stored", summary.result_count);
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod document;
pub mod error;
pub mod export;
pub mod store;
pub mod summary;

pub use document::StoreDocument;
pub use error::{Result, StoreError};
pub use export::{export_csv, try_export_csv, CSV_HEADER};
pub use store::{append, load, save, try_append, try_load, try_save, ResultStore};
pub use summary::{summarize, try_summarize, StoreSummary};
