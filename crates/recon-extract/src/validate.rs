//! Candidate validation with a strong and a fallback validator per kind.
//!
//! Which validator a kind uses is decided once, when a [`ValidatorSet`] is
//! resolved from the capability registry. After that every candidate of the
//! kind goes through the same validator; strong and fallback are never
//! mixed within a run.
//!
//! A candidate that fails validation is not an error. Validators return
//! [`Verdict::Rejected`] and [`validate`] filters those out.

use crate::patterns::digits_only;
use recon_core::{Capability, CapabilityRegistry, ContactKind, ExtractionConfig, ValidatedSet};
use std::fmt::Debug;
use tracing::{debug, warn};

/// Outcome of validating one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The candidate is valid; carries its canonical form
    Found(String),
    /// The candidate is not a valid contact of this kind
    Rejected,
}

impl Verdict {
    /// The canonical form, if the candidate was accepted.
    #[must_use]
    pub fn found(self) -> Option<String> {
        match self {
            Self::Found(value) => Some(value),
            Self::Rejected => None,
        }
    }
}

/// Validates and canonicalizes candidates of one contact kind.
pub trait ContactValidator: Send + Sync + Debug {
    /// Contact kind this validator handles.
    fn kind(&self) -> ContactKind;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Check one candidate.
    fn check(&self, candidate: &str) -> Verdict;
}

/// Run every candidate through `validator`, keeping accepted canonical forms.
///
/// Canonical forms are deduplicated in first-seen order, so two candidates
/// that normalize to the same value yield one entry.
pub fn validate<I>(validator: &dyn ContactValidator, candidates: I) -> ValidatedSet
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut total = 0usize;
    let validated: ValidatedSet = candidates
        .into_iter()
        .inspect(|_| total += 1)
        .filter_map(|candidate| validator.check(candidate.as_ref()).found())
        .collect();

    debug!(
        validator = validator.name(),
        candidates = total,
        accepted = validated.len(),
        "validated {} candidates",
        validator.kind().display_name()
    );
    validated
}

/// Fallback email check: `local@domain` with a dotted domain longer than two characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicEmailValidator;

impl ContactValidator for BasicEmailValidator {
    fn kind(&self) -> ContactKind {
        ContactKind::Email
    }

    fn name(&self) -> &'static str {
        "basic-email"
    }

    fn check(&self, candidate: &str) -> Verdict {
        let mut parts = candidate.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None)
                if !local.is_empty() && domain.contains('.') && domain.len() > 2 =>
            {
                Verdict::Found(candidate.to_string())
            }
            _ => Verdict::Rejected,
        }
    }
}

/// Fallback phone check: digit count within bounds.
#[derive(Debug, Clone, Copy)]
pub struct BasicPhoneValidator {
    min_digits: usize,
    max_digits: usize,
}

impl BasicPhoneValidator {
    /// Accept numbers with `min_digits..=max_digits` digits.
    #[must_use]
    pub fn new(min_digits: usize, max_digits: usize) -> Self {
        Self {
            min_digits,
            max_digits,
        }
    }

    /// Bounds taken from extraction settings.
    #[must_use]
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.min_phone_digits, config.max_phone_digits)
    }
}

impl Default for BasicPhoneValidator {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl ContactValidator for BasicPhoneValidator {
    fn kind(&self) -> ContactKind {
        ContactKind::Phone
    }

    fn name(&self) -> &'static str {
        "basic-phone"
    }

    fn check(&self, candidate: &str) -> Verdict {
        let digits = digits_only(candidate);
        if (self.min_digits..=self.max_digits).contains(&digits.len()) {
            Verdict::Found(digits)
        } else {
            Verdict::Rejected
        }
    }
}

/// Full syntax validation via `email_address`, plus domain structure checks.
///
/// No deliverability or DNS checks are made. Accepted addresses are
/// lower-cased.
#[cfg(feature = "strong-email")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StrongEmailValidator;

#[cfg(feature = "strong-email")]
impl StrongEmailValidator {
    /// Domain has at least two non-empty labels, no label edged by `-`, and
    /// an alphabetic TLD of two or more characters.
    fn domain_is_sound(domain: &str) -> bool {
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2
            || labels
                .iter()
                .any(|l| l.is_empty() || l.starts_with('-') || l.ends_with('-'))
        {
            return false;
        }

        labels
            .last()
            .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
    }
}

#[cfg(feature = "strong-email")]
impl ContactValidator for StrongEmailValidator {
    fn kind(&self) -> ContactKind {
        ContactKind::Email
    }

    fn name(&self) -> &'static str {
        "strong-email"
    }

    fn check(&self, candidate: &str) -> Verdict {
        if !email_address::EmailAddress::is_valid(candidate) {
            return Verdict::Rejected;
        }

        match candidate.rsplit_once('@') {
            Some((_, domain)) if Self::domain_is_sound(domain) => {
                Verdict::Found(candidate.to_lowercase())
            }
            _ => Verdict::Rejected,
        }
    }
}

/// Numbering-plan validation via `phonenumber`.
///
/// No default region is assumed, so only candidates written with a leading
/// `+` can be parsed; national-format numbers are rejected. Accepted numbers
/// are rendered in international display form, e.g. `+1 650-253-0000`.
#[cfg(feature = "strong-phone")]
#[derive(Debug, Clone, Copy)]
pub struct StrongPhoneValidator {
    min_digits: usize,
    max_digits: usize,
}

#[cfg(feature = "strong-phone")]
impl StrongPhoneValidator {
    /// Bounds taken from extraction settings.
    #[must_use]
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            min_digits: config.min_phone_digits,
            max_digits: config.max_phone_digits,
        }
    }
}

#[cfg(feature = "strong-phone")]
impl Default for StrongPhoneValidator {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

#[cfg(feature = "strong-phone")]
impl ContactValidator for StrongPhoneValidator {
    fn kind(&self) -> ContactKind {
        ContactKind::Phone
    }

    fn name(&self) -> &'static str {
        "strong-phone"
    }

    fn check(&self, candidate: &str) -> Verdict {
        if !candidate.trim_start().starts_with('+') {
            return Verdict::Rejected;
        }

        let digits = digits_only(candidate);
        if !(self.min_digits..=self.max_digits).contains(&digits.len()) {
            return Verdict::Rejected;
        }

        match phonenumber::parse(None, format!("+{digits}")) {
            Ok(number) if phonenumber::is_valid(&number) => Verdict::Found(
                number
                    .format()
                    .mode(phonenumber::Mode::International)
                    .to_string(),
            ),
            _ => Verdict::Rejected,
        }
    }
}

fn warn_fallback(capability: Capability) {
    warn!(
        "{} unavailable, {}",
        capability.display_name(),
        capability.fallback_description()
    );
}

#[cfg(feature = "strong-email")]
fn strong_email() -> Option<Box<dyn ContactValidator>> {
    Some(Box::new(StrongEmailValidator))
}

#[cfg(not(feature = "strong-email"))]
fn strong_email() -> Option<Box<dyn ContactValidator>> {
    None
}

#[cfg(feature = "strong-phone")]
fn strong_phone(config: &ExtractionConfig) -> Option<Box<dyn ContactValidator>> {
    Some(Box::new(StrongPhoneValidator::from_config(config)))
}

#[cfg(not(feature = "strong-phone"))]
fn strong_phone(_config: &ExtractionConfig) -> Option<Box<dyn ContactValidator>> {
    None
}

/// Registry of the strong backends compiled into this build.
#[must_use]
pub fn compiled_capabilities() -> CapabilityRegistry {
    let mut registry = CapabilityRegistry::new();
    if cfg!(feature = "strong-email") {
        registry.enable(Capability::StrongEmailValidation);
    }
    if cfg!(feature = "strong-phone") {
        registry.enable(Capability::StrongPhoneValidation);
    }
    registry
}

/// The validator chosen for each contact kind.
#[derive(Debug)]
pub struct ValidatorSet {
    email: Box<dyn ContactValidator>,
    phone: Box<dyn ContactValidator>,
}

impl ValidatorSet {
    /// Build a set from explicit validators.
    #[must_use]
    pub fn new(email: Box<dyn ContactValidator>, phone: Box<dyn ContactValidator>) -> Self {
        Self { email, phone }
    }

    /// Fallback validators for both kinds.
    #[must_use]
    pub fn fallback(config: &ExtractionConfig) -> Self {
        Self::new(
            Box::new(BasicEmailValidator),
            Box::new(BasicPhoneValidator::from_config(config)),
        )
    }

    /// Choose strong or fallback per kind from the registry.
    ///
    /// Emits one warning for each kind that falls back.
    #[must_use]
    pub fn resolve(registry: &CapabilityRegistry, config: &ExtractionConfig) -> Self {
        let email = registry
            .is_available(Capability::StrongEmailValidation)
            .then(strong_email)
            .flatten()
            .unwrap_or_else(|| {
                warn_fallback(Capability::StrongEmailValidation);
                Box::new(BasicEmailValidator)
            });

        let phone = registry
            .is_available(Capability::StrongPhoneValidation)
            .then(|| strong_phone(config))
            .flatten()
            .unwrap_or_else(|| {
                warn_fallback(Capability::StrongPhoneValidation);
                Box::new(BasicPhoneValidator::from_config(config))
            });

        debug!(email = email.name(), phone = phone.name(), "resolved validators");
        Self::new(email, phone)
    }

    /// The validator used for a contact kind.
    #[must_use]
    pub fn validator(&self, kind: ContactKind) -> &dyn ContactValidator {
        match kind {
            ContactKind::Email => self.email.as_ref(),
            ContactKind::Phone => self.phone.as_ref(),
        }
    }

    /// Validate email candidates.
    pub fn validate_emails<I>(&self, candidates: I) -> ValidatedSet
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        validate(self.email.as_ref(), candidates)
    }

    /// Validate phone candidates.
    pub fn validate_phones<I>(&self, candidates: I) -> ValidatedSet
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        validate(self.phone.as_ref(), candidates)
    }
}
