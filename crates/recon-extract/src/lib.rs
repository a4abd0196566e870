//! Recon Extract - Contact extraction from semi-structured scraper records.
//!
//! Turns a raw record handed over by a scraper collaborator into a
//! validated [`ContactResult`](recon_core::ContactResult).
//!
//! # Architecture
//!
//! - **Records** ([`record`]): Typed raw records and the scrape outcome union
//! - **Aggregation** ([`aggregate`]): Flattens a record into one text corpus
//! - **Patterns** ([`patterns`]): Ordered regex families producing candidates
//! - **Validation** ([`validate`]): Strong and fallback validators per kind
//! - **Pipeline** ([`pipeline`]): The end-to-end extraction flow
//!
//! # Example
//!
//! ```rust
//! use recon_core::AppConfig;
//! use recon_extract::{ExtractionPipeline, ScrapeOutcome};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let outcome: ScrapeOutcome = serde_json::from_str(
//!     r#"{"url": "https://example.org/team", "about": "Write to jane[at]example.org"}"#,
//! )?;
//!
//! let pipeline = ExtractionPipeline::from_config(&AppConfig::default());
//! let result = pipeline.extract_contacts(&outcome);
//! assert!(result.emails.contains("jane@example.org"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod aggregate;
pub mod candidate;
pub mod patterns;
pub mod pipeline;
pub mod record;
pub mod validate;

// Re-export commonly used types
pub use aggregate::TextAggregator;
pub use candidate::CandidateSet;
pub use patterns::{digits_only, PatternExtractor};
pub use pipeline::{CombinedContacts, ExtractionPipeline};
pub use record::{Entry, RawRecord, ScrapeOutcome};
pub use validate::{
    compiled_capabilities, validate, BasicEmailValidator, BasicPhoneValidator, ContactValidator,
    ValidatorSet, Verdict,
};

#[cfg(feature = "strong-email")]
pub use validate::StrongEmailValidator;
#[cfg(feature = "strong-phone")]
pub use validate::StrongPhoneValidator;
