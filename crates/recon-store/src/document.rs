//! The two shapes a result file can take.

use recon_core::ContactResult;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Key of the result list in a collection document.
pub(crate) const RESULTS_KEY: &str = "results";

/// A persisted result file: one bare result, or a `{"results": [...]}`
/// collection built up by appends.
///
/// The shape is decided by the presence of a `results` key. An object with
/// that key is always a collection; if one of its entries is not a contact
/// result the whole document fails to decode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StoreDocument {
    /// Accumulated results, oldest first
    Collection {
        /// Stored results
        results: Vec<ContactResult>,
    },
    /// A single result written by `save`
    Single(ContactResult),
}

impl StoreDocument {
    /// Every result in the document, oldest first.
    #[must_use]
    pub fn results(&self) -> &[ContactResult] {
        match self {
            Self::Collection { results } => results,
            Self::Single(result) => std::slice::from_ref(result),
        }
    }

    /// The most recent result, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&ContactResult> {
        self.results().last()
    }

    /// Number of results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results().len()
    }

    /// Whether the document holds no result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results().is_empty()
    }

    /// Whether the document is a bare single result.
    #[must_use]
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    /// Take ownership of the results.
    #[must_use]
    pub fn into_results(self) -> Vec<ContactResult> {
        match self {
            Self::Collection { results } => results,
            Self::Single(result) => vec![result],
        }
    }
}

impl<'de> Deserialize<'de> for StoreDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Object(mut map) if map.contains_key(RESULTS_KEY) => {
                let Some(Value::Array(entries)) = map.remove(RESULTS_KEY) else {
                    return Err(D::Error::custom("`results` is not a list"));
                };
                let results = entries
                    .into_iter()
                    .enumerate()
                    .map(|(i, entry)| {
                        serde_json::from_value(entry)
                            .map_err(|e| D::Error::custom(format!("results[{i}]: {e}")))
                    })
                    .collect::<Result<_, _>>()?;
                Ok(Self::Collection { results })
            }
            other => serde_json::from_value(other)
                .map(Self::Single)
                .map_err(D::Error::custom),
        }
    }
}

impl From<ContactResult> for StoreDocument {
    fn from(result: ContactResult) -> Self {
        Self::Single(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_shape() {
        let doc: StoreDocument = serde_json::from_str(
            r#"{"results": [{"emails": ["a@b.com"]}, {"emails": ["c@d.com"], "phones": []}]}"#,
        )
        .expect("parse collection");

        assert!(!doc.is_single());
        assert_eq!(doc.len(), 2);
        let latest = doc.latest().expect("latest result");
        assert_eq!(latest.emails.as_slice(), &["c@d.com".to_string()]);
    }

    #[test]
    fn test_single_shape() {
        let doc: StoreDocument =
            serde_json::from_str(r#"{"emails": [], "phones": ["2125550100"], "metadata": {}}"#)
                .expect("parse single result");

        assert!(doc.is_single());
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.into_results()[0].phones.len(), 1);
    }

    #[test]
    fn test_results_key_never_reads_as_single() {
        let err = serde_json::from_str::<StoreDocument>(
            r#"{"results": [[1, 2], {"emails": ["a@b.com"]}]}"#,
        )
        .expect_err("a non-result entry must fail the collection");
        assert!(err.to_string().contains("results[0]"));

        assert!(serde_json::from_str::<StoreDocument>(r#"{"results": 3}"#).is_err());
    }

    #[test]
    fn test_null_counters_inside_collection() {
        let doc: StoreDocument = serde_json::from_str(
            r#"{"results": [
                {"emails": ["a@b.com"], "metadata": {"total_emails_found": null}},
                {"emails": ["c@d.com", "e@f.com"]}
            ]}"#,
        )
        .expect("parse collection");

        assert!(!doc.is_single());
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.latest().map(|r| r.emails.len()), Some(2));
    }

    #[test]
    fn test_empty_collection() {
        let doc: StoreDocument = serde_json::from_str(r#"{"results": []}"#).expect("parse");
        assert!(doc.is_empty());
        assert!(doc.latest().is_none());
    }

    #[test]
    fn test_single_serializes_bare() {
        let value = serde_json::to_value(StoreDocument::from(ContactResult::default()))
            .expect("serialize document");
        assert!(value.get("results").is_none());
        assert!(value.get("emails").is_some());
    }
}
