//! Recon Core - Foundation crate for the contact reconnaissance pipeline.
//!
//! This crate provides the shared types, error handling, configuration
//! management and capability detection that the extraction, harvesting and
//! storage crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`contact`] - The `ContactResult` unit shared by the reconciler and the store
//! - [`types`] - Shared enums and newtypes (`ContactKind`, `SiteKind`, `Timestamp`)
//! - [`capabilities`] - Registry of optional validation backends
//!
//! # Example
//!
//! ```rust
//! use recon_core::{AppConfig, Capability, CapabilityRegistry};
//!
//! let config = AppConfig::default();
//! let mut registry = CapabilityRegistry::with_capabilities([Capability::StrongEmailValidation]);
//! registry.apply_config(&config.validation);
//!
//! if registry.is_available(Capability::StrongEmailValidation) {
//!     println!("emails get full syntax validation");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod capabilities;
pub mod config;
pub mod contact;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use capabilities::{Capability, CapabilityRegistry};
pub use config::{AppConfig, ExtractionConfig, StorageConfig, ValidationConfig};
pub use contact::{null_as_default, ContactMetadata, ContactResult, ValidatedSet};
pub use error::{ConfigError, ConfigResult, CoreError, Result};
pub use types::{ContactKind, SiteKind, Timestamp};
