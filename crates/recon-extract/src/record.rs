//! Raw records handed to the core by scraper collaborators.
//!
//! A scraper either produces a record or an error marker `{error, url}`.
//! The two are kept apart by [`ScrapeOutcome`] so that a failed fetch can
//! never reach aggregation.

use indexmap::IndexMap;
use recon_core::null_as_default;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One experience or education entry: field name to value, in page order.
pub type Entry = IndexMap<String, Value>;

/// A semi-structured record produced by a profile or website scraper.
///
/// All fields are optional. Profile scrapers fill the person fields and the
/// experience/education lists; general website scrapers fill
/// `description` and `contact_info`. Both may carry a raw markup snippet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    /// Source URL
    pub url: Option<String>,
    /// Person name
    pub name: Option<String>,
    /// Current job title (or page title for general sites)
    pub title: Option<String>,
    /// Current employer
    pub company: Option<String>,
    /// Location
    pub location: Option<String>,
    /// Free-text about section
    pub about: Option<String>,
    /// Meta description of a general website
    pub description: Option<String>,
    /// Contact section text keyed by the selector it was found under
    #[serde(deserialize_with = "null_as_default")]
    pub contact_info: IndexMap<String, String>,
    /// Experience entries
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<Entry>,
    /// Education entries
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<Entry>,
    /// Raw page markup, used as a last-resort text source
    pub raw_html: Option<String>,
    /// When the scraper fetched the page
    pub timestamp: Option<String>,
}

impl RawRecord {
    /// Whether the record carries no usable field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let blank = |field: &Option<String>| field.as_deref().map_or(true, str::is_empty);

        [
            &self.url,
            &self.name,
            &self.title,
            &self.company,
            &self.location,
            &self.about,
            &self.description,
            &self.raw_html,
        ]
        .into_iter()
        .all(blank)
            && self.contact_info.values().all(String::is_empty)
            && self.experience.iter().all(IndexMap::is_empty)
            && self.education.iter().all(IndexMap::is_empty)
    }
}

/// What a scraper collaborator hands over: a record or a failure marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrapeOutcome {
    /// The fetch failed upstream
    Failed {
        /// Upstream error message
        error: String,
        /// URL that was being fetched
        #[serde(default)]
        url: Option<String>,
    },
    /// The fetch produced a record
    Record(RawRecord),
}

impl ScrapeOutcome {
    /// Build a failure marker.
    #[must_use]
    pub fn failed(error: impl Into<String>, url: Option<String>) -> Self {
        Self::Failed {
            error: error.into(),
            url,
        }
    }

    /// The record, if the fetch succeeded.
    #[must_use]
    pub fn record(&self) -> Option<&RawRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Failed { .. } => None,
        }
    }

    /// Source URL of either variant.
    #[must_use]
    pub fn source_url(&self) -> Option<&str> {
        match self {
            Self::Record(record) => record.url.as_deref(),
            Self::Failed { url, .. } => url.as_deref(),
        }
    }
}

impl From<RawRecord> for ScrapeOutcome {
    fn from(record: RawRecord) -> Self {
        Self::Record(record)
    }
}
