//! End-to-end extraction: record → corpus → candidates → validated result.

use crate::aggregate::TextAggregator;
use crate::patterns::PatternExtractor;
use crate::record::{RawRecord, ScrapeOutcome};
use crate::validate::{compiled_capabilities, ValidatorSet};
use recon_core::{AppConfig, ContactMetadata, ContactResult, ExtractionConfig, SiteKind, ValidatedSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Error recorded when a record carries no usable field.
const NO_DATA: &str = "No data";

/// Contacts gathered from several records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedContacts {
    /// One result per input, in input order
    pub results: Vec<ContactResult>,
    /// Union of every result's emails, first-seen order
    pub emails: ValidatedSet,
    /// Union of every result's phones, first-seen order
    pub phones: ValidatedSet,
}

/// The extraction flow with its validators resolved.
#[derive(Debug)]
pub struct ExtractionPipeline {
    aggregator: TextAggregator,
    extractor: PatternExtractor,
    validators: ValidatorSet,
}

impl ExtractionPipeline {
    /// Create a pipeline with explicit validators.
    #[must_use]
    pub fn new(config: &ExtractionConfig, validators: ValidatorSet) -> Self {
        Self {
            aggregator: TextAggregator::from_config(config),
            extractor: PatternExtractor::from_config(config),
            validators,
        }
    }

    /// Create a pipeline using every compiled-in strong validator the
    /// configuration leaves switched on.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let mut registry = compiled_capabilities();
        registry.apply_config(&config.validation);

        let validators = ValidatorSet::resolve(&registry, &config.extraction);
        Self::new(&config.extraction, validators)
    }

    /// The resolved validators.
    #[must_use]
    pub fn validators(&self) -> &ValidatorSet {
        &self.validators
    }

    /// Extract contacts from one scrape outcome.
    ///
    /// A failure marker or an empty record short-circuits to an empty result
    /// carrying the error; nothing is aggregated or validated in that case.
    #[must_use]
    pub fn extract_contacts(&self, outcome: &ScrapeOutcome) -> ContactResult {
        match outcome {
            ScrapeOutcome::Failed { error, url } => {
                warn!(url = url.as_deref().unwrap_or("-"), "scrape failed upstream: {}", error);
                failed_result(error, url.as_deref())
            }
            ScrapeOutcome::Record(record) if record.is_empty() => {
                warn!("record carries no data");
                failed_result(NO_DATA, record.url.as_deref())
            }
            ScrapeOutcome::Record(record) => self.extract_record(record),
        }
    }

    /// Extract contacts from several outcomes and union the results.
    #[must_use]
    pub fn extract_many<'a, I>(&self, outcomes: I) -> CombinedContacts
    where
        I: IntoIterator<Item = &'a ScrapeOutcome>,
    {
        let mut combined = CombinedContacts::default();

        for outcome in outcomes {
            let result = self.extract_contacts(outcome);
            for email in &result.emails {
                combined.emails.insert(email.as_str());
            }
            for phone in &result.phones {
                combined.phones.insert(phone.as_str());
            }
            combined.results.push(result);
        }

        info!(
            records = combined.results.len(),
            emails = combined.emails.len(),
            phones = combined.phones.len(),
            "combined extraction complete"
        );
        combined
    }

    fn extract_record(&self, record: &RawRecord) -> ContactResult {
        let corpus = self.aggregator.aggregate(record);
        debug!(chars = corpus.chars().count(), "built corpus");

        let email_candidates = self.extractor.extract_emails(&corpus);
        let phone_candidates = self.extractor.extract_phones(&corpus);

        let emails = self.validators.validate_emails(&email_candidates);
        let phones = self.validators.validate_phones(&phone_candidates);

        let metadata = ContactMetadata {
            source_url: record.url.clone(),
            name: record.name.clone(),
            title: record.title.clone(),
            company: record.company.clone(),
            location: record.location.clone(),
            extraction_timestamp: record.timestamp.clone(),
            total_emails_found: email_candidates.len(),
            total_phones_found: phone_candidates.len(),
            validated_emails: emails.len(),
            validated_phones: phones.len(),
            site_type: record.url.as_deref().map(SiteKind::detect),
            ..ContactMetadata::default()
        };

        info!(
            url = record.url.as_deref().unwrap_or("-"),
            emails = emails.len(),
            phones = phones.len(),
            "extracted contacts"
        );

        ContactResult {
            emails,
            phones,
            metadata,
        }
    }
}

fn failed_result(error: &str, url: Option<&str>) -> ContactResult {
    let mut result = ContactResult::failed(error);
    result.metadata.source_url = url.map(str::to_string);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fallback_pipeline() -> ExtractionPipeline {
        let config = ExtractionConfig::default();
        ExtractionPipeline::new(&config, ValidatorSet::fallback(&config))
    }

    fn outcome(value: serde_json::Value) -> ScrapeOutcome {
        serde_json::from_value(value).expect("parse test outcome")
    }

    #[test]
    fn test_failed_outcome_short_circuits() {
        let result = fallback_pipeline().extract_contacts(&ScrapeOutcome::failed(
            "403 Forbidden",
            Some("https://www.linkedin.com/in/x".into()),
        ));

        assert!(result.is_failed());
        assert_eq!(result.metadata.error.as_deref(), Some("403 Forbidden"));
        assert_eq!(
            result.metadata.source_url.as_deref(),
            Some("https://www.linkedin.com/in/x")
        );
        assert!(result.emails.is_empty());
        assert!(result.counts_consistent());
    }

    #[test]
    fn test_empty_record_is_no_data() {
        let result = fallback_pipeline().extract_contacts(&RawRecord::default().into());
        assert_eq!(result.metadata.error.as_deref(), Some(NO_DATA));
    }

    #[test]
    fn test_metadata_is_filled() {
        let result = fallback_pipeline().extract_contacts(&outcome(json!({
            "url": "https://www.linkedin.com/in/jane",
            "name": "Jane Doe",
            "title": "CTO",
            "company": "Acme",
            "location": "Berlin",
            "about": "jane@acme.io, x@y, call 212-555-0100",
            "timestamp": "2024-03-01T10:00:00+00:00"
        })));

        let m = &result.metadata;
        assert_eq!(m.name.as_deref(), Some("Jane Doe"));
        assert_eq!(m.site_type, Some(SiteKind::Linkedin));
        assert_eq!(m.extraction_timestamp.as_deref(), Some("2024-03-01T10:00:00+00:00"));
        assert_eq!(result.emails.as_slice(), &["jane@acme.io".to_string()]);
        assert_eq!(result.phones.as_slice(), &["2125550100".to_string()]);
        assert_eq!(m.total_phones_found, 1);
        assert!(result.counts_consistent());
        assert!(!result.is_failed());
    }

    #[test]
    fn test_rejected_candidates_widen_the_gap() {
        // 16 digits: extracted, but above the phone digit bound
        let result = fallback_pipeline().extract_contacts(&outcome(json!({
            "about": "+1 234 5678 9012 3456"
        })));

        assert!(result.metadata.total_phones_found >= 1);
        assert!(result.phones.is_empty());
        assert!(result.counts_consistent());
    }

    #[test]
    fn test_extract_many_unions_in_order() {
        let outcomes = vec![
            outcome(json!({"about": "b@x.com a@x.com"})),
            ScrapeOutcome::failed("timeout", None),
            outcome(json!({"about": "a@x.com c@x.com"})),
        ];

        let combined = fallback_pipeline().extract_many(&outcomes);
        assert_eq!(combined.results.len(), 3);
        assert!(combined.results[1].is_failed());
        assert_eq!(
            combined.emails.as_slice(),
            &["b@x.com".to_string(), "a@x.com".to_string(), "c@x.com".to_string()]
        );
    }
}
