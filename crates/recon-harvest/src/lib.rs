//! Recon Harvest - Harvester output and cross-source reconciliation.
//!
//! The harvesting tool runs against a domain and reports emails, hosts and
//! IPs. This crate normalizes that report and merges its emails into a
//! contact result produced by the extraction pipeline.
//!
//! # Example
//!
//! ```rust
//! use recon_core::ContactResult;
//! use recon_harvest::{domain_from_url, merge, HarvesterResult};
//!
//! let domain = domain_from_url("https://www.acme.io/team").unwrap_or_default();
//! let report = serde_json::json!({"emails": ["info@acme.io"]});
//! let harvested = HarvesterResult::from_raw(&report, &domain)?;
//!
//! let merged = merge(ContactResult::default(), &harvested);
//! assert_eq!(merged.metadata.harvester_domain.as_deref(), Some("acme.io"));
//! # Ok::<(), recon_harvest::HarvestError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod domain;
pub mod error;
pub mod merge;
pub mod result;

pub use domain::domain_from_url;
pub use error::{HarvestError, Result};
pub use merge::{merge, merge_outcome};
pub use result::{read_harvest, HarvestOutcome, HarvesterMetadata, HarvesterResult, HARVESTER_TOOL};
