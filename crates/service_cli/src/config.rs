//! Radar configuration management.
//!
//! Handles loading of `collateral-radar.toml` with environment variable
//! overrides. Command-line flags are applied on top by the commands.

use std::path::Path;

use radar_core::scenarios::{DEFAULT_ALPHA_SCALE, DEFAULT_MAX_SCENARIOS, DEFAULT_TICKS};
use radar_core::EnumerationPolicy;
use radar_plot::StylePreset;
use serde::Deserialize;
use thiserror::Error;

/// Radar configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RadarConfig {
    /// Collateral ceiling in USD
    pub collateral: f64,

    /// Ladder points per asset
    pub ticks: usize,

    /// Enumeration policy
    pub policy: EnumerationPolicy,

    /// Plot style preset
    pub style: StylePreset,

    /// Figure width in inches
    pub width: f64,

    /// Figure height in inches
    pub height: f64,

    /// Output resolution of `scan`
    pub dpi: f64,

    /// Opacity of a scenario that uses the full collateral
    pub alpha_scale: f64,

    /// Upper bound on enumerated tuples
    pub max_scenarios: usize,

    /// Seed for polygon colors
    pub seed: Option<u64>,

    /// Log level
    pub log_level: String,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            collateral: 100_000.0,
            ticks: DEFAULT_TICKS,
            policy: EnumerationPolicy::default(),
            style: StylePreset::default(),
            width: 8.0,
            height: 8.0,
            dpi: 300.0,
            alpha_scale: DEFAULT_ALPHA_SCALE,
            max_scenarios: DEFAULT_MAX_SCENARIOS,
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl RadarConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    ///
    /// Unparseable values leave the field unchanged.
    pub fn with_env_override(mut self) -> Self {
        if let Some(collateral) = env_parse("RADAR_COLLATERAL") {
            self.collateral = collateral;
        }

        if let Some(ticks) = env_parse("RADAR_TICKS") {
            self.ticks = ticks;
        }

        if let Some(policy) = env_parse("RADAR_POLICY") {
            self.policy = policy;
        }

        if let Some(style) = env_parse("RADAR_STYLE") {
            self.style = style;
        }

        if let Some(dpi) = env_parse("RADAR_DPI") {
            self.dpi = dpi;
        }

        if let Ok(log_level) = std::env::var("RADAR_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if !self.collateral.is_finite() || self.collateral <= 0.0 {
            errors.push(format!("collateral must be positive, got {}", self.collateral));
        }

        if self.ticks < 2 {
            errors.push(format!("ticks must be at least 2, got {}", self.ticks));
        }

        for (name, value) in [("width", self.width), ("height", self.height), ("dpi", self.dpi)] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("{} must be positive, got {}", name, value));
            }
        }

        if !(0.0..=1.0).contains(&self.alpha_scale) {
            errors.push(format!(
                "alpha_scale must be in [0, 1], got {}",
                self.alpha_scale
            ));
        }

        if self.max_scenarios == 0 {
            errors.push("max_scenarios must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// `EnvFilter` directives for the configured level
    ///
    /// `verbose` raises the level to `debug`.
    pub fn log_directives(&self, verbose: bool) -> String {
        let level = if verbose {
            "debug".to_string()
        } else {
            self.log_level.to_lowercase()
        };
        ["collateral_radar", "radar_core", "radar_plot"]
            .iter()
            .map(|target| format!("{}={}", target, level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.trim().parse().ok()
}

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error reading {path}: {message}")]
    Io {
        /// Config file path
        path: String,
        /// Underlying error
        message: String,
    },
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = RadarConfig::default();
        assert_eq!(config.collateral, 100_000.0);
        assert_eq!(config.ticks, 5);
        assert_eq!(config.policy, EnumerationPolicy::Cartesian);
        assert_eq!(config.style, StylePreset::Colorful);
        assert_eq!(config.dpi, 300.0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_default_config_validates() {
        assert!(RadarConfig::default().validate().is_ok());
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("RADAR_POLICY", "distinct");
        std::env::set_var("RADAR_TICKS", "not-a-number");
        let config = RadarConfig::default().with_env_override();
        assert_eq!(config.policy, EnumerationPolicy::Distinct);
        assert_eq!(config.ticks, 5);
        std::env::remove_var("RADAR_POLICY");
        std::env::remove_var("RADAR_TICKS");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "collateral = 2000.0\npolicy = \"distinct\"\nstyle = \"monochrome\"\nseed = 7"
        )
        .unwrap();

        let config = RadarConfig::load(file.path()).unwrap();
        assert_eq!(config.collateral, 2000.0);
        assert_eq!(config.policy, EnumerationPolicy::Distinct);
        assert_eq!(config.style, StylePreset::Monochrome);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.ticks, 5);
    }

    #[test]
    fn test_load_rejects_unknown_style() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "style = \"neon\"").unwrap();
        assert!(matches!(
            RadarConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RadarConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, RadarConfig::default());
        assert!(matches!(
            RadarConfig::load(&dir.path().join("absent.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_validate_multiple_errors() {
        let mut config = RadarConfig::default();
        config.log_level = "loud".to_string();
        config.collateral = -1.0;
        config.ticks = 1;
        config.dpi = 0.0;
        config.alpha_scale = 2.0;
        config.max_scenarios = 0;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 6);
                assert!(errors.iter().any(|e| e.contains("log_level")));
                assert!(errors.iter().any(|e| e.contains("dpi")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_log_directives() {
        let config = RadarConfig::default();
        assert_eq!(
            config.log_directives(false),
            "collateral_radar=info,radar_core=info,radar_plot=info"
        );
        assert!(config.log_directives(true).contains("radar_plot=debug"));
    }
}
