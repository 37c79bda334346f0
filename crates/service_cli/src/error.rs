//! CLI error types.

use radar_core::CoreError;
use radar_plot::PlotError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Command-line argument is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration file could not be loaded or validated.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Position loading or scenario enumeration failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Plot construction or rendering failed.
    #[error(transparent)]
    Plot(#[from] PlotError),

    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario report could not be written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::FileNotFound("positions.json".to_string());
        assert_eq!(err.to_string(), "File not found: positions.json");

        let err: CliError = PlotError::AxesNotInitialized.into();
        assert!(err.to_string().contains("Axes not initialized"));

        let err: CliError = CoreError::invalid_input("ticks must be at least 2").into();
        assert_eq!(err.to_string(), "Invalid input: ticks must be at least 2");
    }

    #[test]
    fn test_config_error_wrapped() {
        let err: CliError = ConfigError::Validation(vec!["dpi must be positive".into()]).into();
        assert!(err.to_string().starts_with("Configuration error"));
        assert!(err.to_string().contains("dpi"));
    }
}
