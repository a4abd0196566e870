//! The contact result produced by one extraction run.
//!
//! A `ContactResult` is created fresh by the extraction pipeline, may be
//! annotated by the reconciler, and is finally handed to the store. Its JSON
//! shape is the persisted format, so field names here are part of the file
//! format.

use crate::types::{ContactKind, SiteKind};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Field deserializer reading an explicit `null` like a missing field.
///
/// Use together with `#[serde(default)]` on fields whose producers write
/// `null` for "nothing".
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An ordered list of normalized contact strings of one kind.
///
/// Every entry has passed the kind's validation rule. Insertion order is
/// preserved and duplicates are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatedSet(Vec<String>);

impl ValidatedSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning `false` if it was already present.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.contains(&value) {
            return false;
        }
        self.0.push(value);
        true
    }

    /// Exact string membership.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// View as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ValidatedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ValidatedSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Provenance and counters attached to a contact result.
///
/// Known keys are typed; anything else found in a persisted document is kept
/// in `extra` so a read-modify-write cycle never drops data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactMetadata {
    /// URL the raw record was fetched from
    pub source_url: Option<String>,
    /// Subject name
    pub name: Option<String>,
    /// Subject job title
    pub title: Option<String>,
    /// Subject employer
    pub company: Option<String>,
    /// Subject location
    pub location: Option<String>,
    /// When the contacts were extracted (RFC3339)
    pub extraction_timestamp: Option<String>,
    /// Email candidates found before validation
    #[serde(deserialize_with = "null_as_default")]
    pub total_emails_found: usize,
    /// Phone candidates found before validation
    #[serde(deserialize_with = "null_as_default")]
    pub total_phones_found: usize,
    /// Emails in the result
    #[serde(deserialize_with = "null_as_default")]
    pub validated_emails: usize,
    /// Phones in the result
    #[serde(deserialize_with = "null_as_default")]
    pub validated_phones: usize,

    /// Classified source site
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_type: Option<SiteKind>,
    /// Upstream failure that short-circuited extraction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether harvester output was merged in
    #[serde(rename = "theharvester_used", skip_serializing_if = "Option::is_none")]
    pub harvester_used: Option<bool>,
    /// Domain the harvester was run against
    #[serde(rename = "theharvester_domain", skip_serializing_if = "Option::is_none")]
    pub harvester_domain: Option<String>,
    /// Emails contributed by the harvester merge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_emails_from_harvester: Option<usize>,
    /// Harvester failure, when the harvest branch failed upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harvester_error: Option<String>,
    /// When the result was appended to a store document (RFC3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_timestamp: Option<String>,

    /// Unrecognized keys, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Deduplicated, validated contacts plus provenance for one subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactResult {
    /// Validated, lower-cased email addresses
    #[serde(deserialize_with = "null_as_default")]
    pub emails: ValidatedSet,
    /// Validated phone numbers
    #[serde(deserialize_with = "null_as_default")]
    pub phones: ValidatedSet,
    /// Provenance and counters
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: ContactMetadata,
}

impl ContactResult {
    /// Empty result standing in for an upstream failure.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            metadata: ContactMetadata {
                error: Some(error.into()),
                ..ContactMetadata::default()
            },
            ..Self::default()
        }
    }

    /// Whether this result stands in for an upstream failure.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.metadata.error.is_some()
    }

    /// The validated set for a contact kind.
    #[must_use]
    pub fn contacts(&self, kind: ContactKind) -> &ValidatedSet {
        match kind {
            ContactKind::Email => &self.emails,
            ContactKind::Phone => &self.phones,
        }
    }

    /// Check the counter invariants: `validated_* == len(*)` and
    /// `total_*_found >= validated_*`.
    #[must_use]
    pub fn counts_consistent(&self) -> bool {
        let m = &self.metadata;
        m.validated_emails == self.emails.len()
            && m.validated_phones == self.phones.len()
            && m.total_emails_found >= m.validated_emails
            && m.total_phones_found >= m.validated_phones
    }
}
