//! Shared types used across the reconnaissance crates.

use crate::error::{CoreError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of contact identifier the pipeline extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    /// Email address
    Email,
    /// Phone number
    Phone,
}

impl ContactKind {
    /// Get a human-readable display name for the contact kind.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
        }
    }

    /// Label used in the `Type` column of CSV exports.
    #[must_use]
    pub fn csv_label(&self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }

    /// All contact kinds, in export order.
    #[must_use]
    pub fn all() -> [ContactKind; 2] {
        [Self::Email, Self::Phone]
    }
}

impl fmt::Display for ContactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Professional sites the scraper collaborators know how to fetch.
///
/// Detection is a plain domain-substring check on the source URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteKind {
    /// linkedin.com profile
    Linkedin,
    /// xing.com profile
    Xing,
    /// viadeo.com profile
    Viadeo,
    /// about.me page
    AboutMe,
    /// angel.co profile
    AngelList,
    /// crunchbase.com entry
    Crunchbase,
    /// Any other website
    General,
}

impl SiteKind {
    const KNOWN: [(SiteKind, &'static str); 6] = [
        (SiteKind::Linkedin, "linkedin.com"),
        (SiteKind::Xing, "xing.com"),
        (SiteKind::Viadeo, "viadeo.com"),
        (SiteKind::AboutMe, "about.me"),
        (SiteKind::AngelList, "angel.co"),
        (SiteKind::Crunchbase, "crunchbase.com"),
    ];

    /// Classify a source URL.
    #[must_use]
    pub fn detect(url: &str) -> Self {
        let url = url.to_ascii_lowercase();
        Self::KNOWN
            .iter()
            .find(|(_, domain)| url.contains(domain))
            .map_or(Self::General, |(kind, _)| *kind)
    }

    /// The domain that identifies this site, if it is a known one.
    #[must_use]
    pub fn domain(&self) -> Option<&'static str> {
        Self::KNOWN
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, domain)| *domain)
    }
}

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
///
/// Persisted documents carry timestamps as RFC3339 strings; this type is the
/// single place they are produced and parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parse a timestamp from an RFC3339 string.
    pub fn from_rfc3339(s: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| CoreError::InvalidInput(format!("invalid timestamp: {e}")))
    }

    /// Format as RFC3339 string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Get seconds since Unix epoch.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<std::time::SystemTime> for Timestamp {
    fn from(time: std::time::SystemTime) -> Self {
        Self(DateTime::<Utc>::from(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_kind_labels() {
        assert_eq!(ContactKind::Email.csv_label(), "Email");
        assert_eq!(ContactKind::Phone.csv_label(), "Phone");
        assert_eq!(ContactKind::Phone.to_string(), "Phone Number");
    }

    #[test]
    fn test_contact_kind_serialization() {
        let json = serde_json::to_string(&ContactKind::Email).expect("serialize kind");
        assert_eq!(json, "\"email\"");

        let kind: ContactKind = serde_json::from_str("\"phone\"").expect("deserialize kind");
        assert_eq!(kind, ContactKind::Phone);
    }

    #[test]
    fn test_site_kind_detect() {
        assert_eq!(
            SiteKind::detect("https://www.linkedin.com/in/jane-doe"),
            SiteKind::Linkedin
        );
        assert_eq!(SiteKind::detect("https://about.me/jdoe"), SiteKind::AboutMe);
        assert_eq!(
            SiteKind::detect("https://WWW.CRUNCHBASE.COM/person/x"),
            SiteKind::Crunchbase
        );
        assert_eq!(SiteKind::detect("https://example.org/team"), SiteKind::General);
        assert_eq!(SiteKind::General.domain(), None);
        assert_eq!(SiteKind::AngelList.domain(), Some("angel.co"));
    }

    #[test]
    fn test_site_kind_serialization() {
        let json = serde_json::to_string(&SiteKind::AngelList).expect("serialize site kind");
        assert_eq!(json, "\"angel_list\"");
    }

    #[test]
    fn test_timestamp_rfc3339() {
        let ts = Timestamp::now();
        let s = ts.to_rfc3339();
        let parsed = Timestamp::from_rfc3339(&s).expect("parse RFC3339 timestamp");
        assert_eq!(ts.timestamp(), parsed.timestamp());
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        assert!(Timestamp::from_rfc3339("yesterday").is_err());
    }

    #[test]
    fn test_timestamp_from_system_time() {
        let ts = Timestamp::from(std::time::UNIX_EPOCH);
        assert_eq!(ts.timestamp(), 0);
    }
}
