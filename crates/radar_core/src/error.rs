//! Error types for position loading and scenario enumeration.
//!
//! This module provides structured error types using `thiserror` for
//! derivation.

use thiserror::Error;

/// Errors that can occur while loading positions or scanning scenarios.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Positions file could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Path that failed to open
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Positions document is not valid JSON or has the wrong shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A required field is absent from an asset entry.
    #[error("Missing field '{field}' for asset '{asset}'")]
    MissingField {
        /// Asset name
        asset: String,
        /// Name of the absent field
        field: &'static str,
    },

    /// An asset entry carries an unusable value.
    #[error("Invalid asset '{asset}': {reason}")]
    InvalidAsset {
        /// Asset name
        asset: String,
        /// Human readable reason
        reason: String,
    },

    /// Invalid scan parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Enumeration space exceeds the configured limit.
    #[error("Scenario space of {count} tuples exceeds limit of {limit}")]
    TooManyScenarios {
        /// Size of the requested enumeration space
        count: u128,
        /// Configured limit
        limit: usize,
    },
}

impl CoreError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invalid asset error
    pub fn invalid_asset(asset: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAsset {
            asset: asset.into(),
            reason: reason.into(),
        }
    }
}
