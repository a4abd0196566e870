//! Ordered regex families that mine contact candidates from a corpus.
//!
//! Email patterns cover plain addresses and the two common `@`
//! obfuscations. Phone patterns run from most to least specific; their
//! matches may overlap, and overlapping matches collapse only through
//! digit-string equality.
//!
//! A phone candidate is its digit string, prefixed with `+` when any match
//! producing those digits was written with an explicit international `+`.
//! Only such candidates carry a country code.

use crate::candidate::CandidateSet;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use recon_core::{ContactKind, ExtractionConfig};
use regex::Regex;
use tracing::debug;

/// Email patterns, applied in order (all case-insensitive).
static EMAIL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Plain local@domain.tld
        r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b",
        // local[at]domain.tld
        r"(?i)\b[A-Z0-9._%+-]+\[at\][A-Z0-9.-]+\.[A-Z]{2,}\b",
        // local(at)domain.tld
        r"(?i)\b[A-Z0-9._%+-]+\(at\)[A-Z0-9.-]+\.[A-Z]{2,}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Email regex is hardcoded and valid"))
    .collect()
});

/// Phone patterns, most specific first.
static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // International: +CC followed by up to four separated groups
        r"\+[0-9]{1,3}[\s.-]?\(?[0-9]{1,4}\)?[\s.-]?[0-9]{1,4}[\s.-]?[0-9]{1,4}[\s.-]?[0-9]{0,4}",
        // US: (123) 456-7890
        r"\([0-9]{3}\)\s*[0-9]{3}[\s-]?[0-9]{4}",
        // US: 123-456-7890
        r"[0-9]{3}[\s-][0-9]{3}[\s-][0-9]{4}",
        // Bare digit run
        r"[0-9]{10,15}",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Phone regex is hardcoded and valid"))
    .collect()
});

/// Obfuscation tokens standing in for `@`, in lower case.
const AT_TOKENS: [&str; 2] = ["[at]", "(at)"];

/// Strip everything except ASCII digits.
#[must_use]
pub fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Lower-case an email match and undo `@` obfuscation.
fn normalize_email(matched: &str) -> String {
    AT_TOKENS
        .iter()
        .fold(matched.to_lowercase(), |email, token| email.replace(token, "@"))
}

/// Runs the email and phone pattern families over a corpus.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    min_phone_digits: usize,
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl PatternExtractor {
    /// Create an extractor keeping phone matches of at least `min_phone_digits` digits.
    #[must_use]
    pub fn new(min_phone_digits: usize) -> Self {
        Self { min_phone_digits }
    }

    /// Create an extractor from extraction settings.
    #[must_use]
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.min_phone_digits)
    }

    /// Extract lower-cased, de-obfuscated email candidates.
    #[must_use]
    pub fn extract_emails(&self, corpus: &str) -> CandidateSet {
        let mut candidates = CandidateSet::new(ContactKind::Email);

        for pattern in EMAIL_PATTERNS.iter() {
            for m in pattern.find_iter(corpus) {
                candidates.insert(normalize_email(m.as_str()));
            }
        }

        debug!(count = candidates.len(), "extracted email candidates");
        candidates
    }

    /// Extract phone candidates: digit strings, `+`-prefixed when written
    /// in international form.
    #[must_use]
    pub fn extract_phones(&self, corpus: &str) -> CandidateSet {
        // digits -> seen with a leading `+`
        let mut found: IndexMap<String, bool> = IndexMap::new();

        for pattern in PHONE_PATTERNS.iter() {
            for m in pattern.find_iter(corpus) {
                let digits = digits_only(m.as_str());
                if digits.len() >= self.min_phone_digits {
                    let international = m.as_str().starts_with('+');
                    *found.entry(digits).or_default() |= international;
                }
            }
        }

        let candidates = CandidateSet::from_values(
            ContactKind::Phone,
            found.into_iter().map(|(digits, international)| {
                if international {
                    format!("+{digits}")
                } else {
                    digits
                }
            }),
        );

        debug!(count = candidates.len(), "extracted phone candidates");
        candidates
    }
}
