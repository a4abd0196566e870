//! Configuration management for the reconnaissance pipeline.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the default result document inside the data directory.
const DEFAULT_RESULTS_FILE: &str = "results.json";

/// Main application configuration.
///
/// This is loaded from `~/.config/recon/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Corpus building and pattern extraction settings
    pub extraction: ExtractionConfig,
    /// Validation backend switches
    pub validation: ValidationConfig,
    /// Result persistence settings
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, falling back to defaults if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply overrides from a key lookup (the process environment in
    /// production). Unparseable values are ignored.
    ///
    /// Recognized keys:
    /// - `RECON_OUTPUT_FILE`: Override the result document path
    /// - `RECON_STRONG_EMAIL`: Enable/disable strong email validation (true/false)
    /// - `RECON_STRONG_PHONE`: Enable/disable strong phone validation (true/false)
    /// - `RECON_MAX_MARKUP_CHARS`: Override the raw markup bound
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("RECON_OUTPUT_FILE") {
            tracing::debug!("Override storage.output_file from env: {}", path);
            self.storage.output_file = Some(PathBuf::from(path));
        }

        if let Some(enabled) = lookup("RECON_STRONG_EMAIL").and_then(|v| v.parse().ok()) {
            self.validation.strong_email = enabled;
            tracing::debug!("Override validation.strong_email from env: {}", enabled);
        }

        if let Some(enabled) = lookup("RECON_STRONG_PHONE").and_then(|v| v.parse().ok()) {
            self.validation.strong_phone = enabled;
            tracing::debug!("Override validation.strong_phone from env: {}", enabled);
        }

        if let Some(chars) = lookup("RECON_MAX_MARKUP_CHARS").and_then(|v| v.parse().ok()) {
            self.extraction.max_markup_chars = chars;
            tracing::debug!("Override extraction.max_markup_chars from env: {}", chars);
        }
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        let extraction = &self.extraction;
        if extraction.min_phone_digits == 0 {
            return Err(ConfigError::InvalidValue {
                field: "extraction.min_phone_digits".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if extraction.max_phone_digits < extraction.min_phone_digits {
            return Err(ConfigError::InvalidValue {
                field: "extraction.max_phone_digits".to_string(),
                reason: format!(
                    "must not be below min_phone_digits ({})",
                    extraction.min_phone_digits
                ),
            });
        }
        Ok(())
    }

    /// Save configuration to a specific file, creating its directory.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/recon/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/recon`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs = project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Resolve the result document path: the configured one, or
    /// `results.json` in the data directory.
    pub fn output_file(&self) -> ConfigResult<PathBuf> {
        match &self.storage.output_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join(DEFAULT_RESULTS_FILE)),
        }
    }
}

fn project_dirs() -> ConfigResult<ProjectDirs> {
    ProjectDirs::from("com", "recon", "recon").ok_or(ConfigError::NoConfigDir)
}

/// Corpus building and pattern extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Upper bound on raw markup characters fed into the corpus
    pub max_markup_chars: usize,
    /// Minimum digit count for a phone candidate
    pub min_phone_digits: usize,
    /// Maximum digit count accepted by the fallback phone check
    pub max_phone_digits: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_markup_chars: 5000,
            min_phone_digits: 10,
            max_phone_digits: 15,
        }
    }
}

/// Validation backend switches.
///
/// A strong validator runs only if it is compiled in *and* switched on here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Use full email syntax validation when available
    pub strong_email: bool,
    /// Use numbering-plan phone validation when available
    pub strong_phone: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strong_email: true,
            strong_phone: true,
        }
    }
}

/// Result persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Result document path (defaults to the data directory)
    pub output_file: Option<PathBuf>,
    /// Append to the result document instead of overwriting it
    pub append: bool,
    /// Also export each result as CSV to this path
    pub csv_export: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_file: None,
            append: true,
            csv_export: None,
        }
    }
}
