//! Corpus building: flattening a raw record into one searchable string.

use crate::record::{Entry, RawRecord, ScrapeOutcome};
use recon_core::ExtractionConfig;
use serde_json::Value;

/// Flattens raw records into a single text corpus.
///
/// Fields are joined by a single space in a fixed order: name, title,
/// company, location, about, description, contact sections, every value of
/// every experience entry, every value of every education entry, and finally
/// the raw markup cut to `max_markup_chars` characters. Missing and empty
/// fields are skipped.
#[derive(Debug, Clone)]
pub struct TextAggregator {
    max_markup_chars: usize,
}

impl Default for TextAggregator {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl TextAggregator {
    /// Create an aggregator with an explicit markup bound.
    #[must_use]
    pub fn new(max_markup_chars: usize) -> Self {
        Self { max_markup_chars }
    }

    /// Create an aggregator from extraction settings.
    #[must_use]
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.max_markup_chars)
    }

    /// Build the corpus for a record.
    #[must_use]
    pub fn aggregate(&self, record: &RawRecord) -> String {
        let mut parts: Vec<String> = Vec::new();

        for field in [
            &record.name,
            &record.title,
            &record.company,
            &record.location,
            &record.about,
            &record.description,
        ] {
            push_text(&mut parts, field.as_deref());
        }

        for section in record.contact_info.values() {
            push_text(&mut parts, Some(section));
        }

        for entry in record.experience.iter().chain(&record.education) {
            push_entry(&mut parts, entry);
        }

        if let Some(markup) = record.raw_html.as_deref() {
            push_text(&mut parts, Some(truncate_chars(markup, self.max_markup_chars)));
        }

        parts.join(" ")
    }

    /// Build the corpus for a scrape outcome.
    ///
    /// Absent records and failure markers yield an empty corpus; callers are
    /// expected to short-circuit before getting here.
    #[must_use]
    pub fn aggregate_outcome(&self, outcome: Option<&ScrapeOutcome>) -> String {
        match outcome {
            Some(ScrapeOutcome::Record(record)) => self.aggregate(record),
            Some(ScrapeOutcome::Failed { .. }) | None => String::new(),
        }
    }
}

fn push_text(parts: &mut Vec<String>, text: Option<&str>) {
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        parts.push(text.to_string());
    }
}

fn push_entry(parts: &mut Vec<String>, entry: &Entry) {
    for value in entry.values() {
        match value {
            Value::Null => {}
            Value::String(s) => push_text(parts, Some(s)),
            Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
                parts.push(value.to_string());
            }
        }
    }
}

/// Cut `text` to at most `max` characters without splitting a character.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
