//! Error types for harvester output handling.

use thiserror::Error;

/// Errors that can occur while reading harvester output.
#[derive(Error, Debug)]
pub enum HarvestError {
    /// Harvester output is not a JSON object
    #[error("harvester output for {domain} is not a JSON object")]
    NotAnObject {
        /// Domain the harvester was run against
        domain: String,
    },

    /// A list field holds something other than a list
    #[error("harvester field '{field}' must be a list, got {found}")]
    NotAList {
        /// Offending field
        field: String,
        /// JSON type actually found
        found: &'static str,
    },

    /// The harvester reported its own failure
    #[error("harvester reported an error: {0}")]
    Reported(String),

    /// Failed to read the harvester output file
    #[error("failed to read harvester output from {path}: {source}")]
    Read {
        /// Path to the output file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Harvester output is not valid JSON
    #[error("failed to parse harvester output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HarvestError::NotAList {
            field: "emails".to_string(),
            found: "string",
        };
        assert_eq!(err.to_string(), "harvester field 'emails' must be a list, got string");

        let err = HarvestError::Reported("rate limited".to_string());
        assert!(err.to_string().contains("rate limited"));
    }
}
