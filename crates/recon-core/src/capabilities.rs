//! Capability registry for optional validation backends.
//!
//! The pipeline has a strong and a fallback validator for each contact kind.
//! Whether the strong one is usable is decided here, once, and the
//! validator set built from the registry never changes afterwards.

use crate::config::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Optional capabilities the pipeline can run with or without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Full syntactic email validation with canonicalization
    StrongEmailValidation,
    /// Phone number validation against numbering-plan metadata
    StrongPhoneValidation,
}

impl Capability {
    /// Get a human-readable name for this capability.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::StrongEmailValidation => "Strong Email Validation",
            Self::StrongPhoneValidation => "Strong Phone Validation",
        }
    }

    /// Get a description of what is lost when this capability is missing.
    #[must_use]
    pub fn fallback_description(&self) -> &'static str {
        match self {
            Self::StrongEmailValidation => {
                "emails are checked with a basic local@domain.tld heuristic"
            }
            Self::StrongPhoneValidation => "phones are checked by digit count only (10-15 digits)",
        }
    }

    /// Get all capabilities.
    #[must_use]
    pub fn all() -> &'static [Capability] {
        &[Self::StrongEmailValidation, Self::StrongPhoneValidation]
    }
}

/// Registry tracking which optional capabilities are currently available.
#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    enabled: HashSet<Capability>,
}

impl CapabilityRegistry {
    /// Create an empty registry: every kind uses its fallback validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the given capabilities enabled.
    #[must_use]
    pub fn with_capabilities(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            enabled: capabilities.into_iter().collect(),
        }
    }

    /// Check if a capability is currently available.
    #[must_use]
    pub fn is_available(&self, capability: Capability) -> bool {
        self.enabled.contains(&capability)
    }

    /// Enable a capability.
    pub fn enable(&mut self, capability: Capability) {
        tracing::debug!("Enabling capability: {:?}", capability);
        self.enabled.insert(capability);
    }

    /// Disable a capability.
    pub fn disable(&mut self, capability: Capability) {
        tracing::debug!("Disabling capability: {:?}", capability);
        self.enabled.remove(&capability);
    }

    /// Disable every capability the operator switched off in config.
    ///
    /// Config can only take capabilities away; it cannot enable a backend
    /// that was not compiled in.
    pub fn apply_config(&mut self, config: &ValidationConfig) {
        if !config.strong_email {
            self.disable(Capability::StrongEmailValidation);
        }
        if !config.strong_phone {
            self.disable(Capability::StrongPhoneValidation);
        }
    }

    /// Get all currently enabled capabilities.
    #[must_use]
    pub fn enabled(&self) -> Vec<Capability> {
        Capability::all()
            .iter()
            .copied()
            .filter(|c| self.is_available(*c))
            .collect()
    }
}
