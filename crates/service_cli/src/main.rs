//! Collateral Radar CLI - Scenario Radar Plots for Collateralized Positions
//!
//! Operational entry point of the collateral radar workspace.
//!
//! # Commands
//!
//! - `collateral-radar scan --positions <file>` - Enumerate price scenarios
//!   under the collateral ceiling and draw them on a radar chart
//! - `collateral-radar demo` - Render the built-in demo charts
//! - `collateral-radar check --positions <file>` - Validate configuration and
//!   positions
//!
//! # Configuration
//!
//! Settings come from `collateral-radar.toml` (defaults when absent), then
//! `RADAR_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use radar_core::EnumerationPolicy;
use radar_plot::{PlotStyle, StylePreset};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use commands::scan::ScanOptions;
use config::RadarConfig;
pub use error::{CliError, Result};

/// Collateral scenario radar plots
#[derive(Parser)]
#[command(name = "collateral-radar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "collateral-radar.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate scenarios and draw the accepted ones
    Scan {
        /// Path to positions file (JSON)
        #[arg(short, long)]
        positions: PathBuf,

        /// Output image (png or svg)
        #[arg(short, long, default_value = "plot.png")]
        output: PathBuf,

        /// Collateral ceiling in USD
        #[arg(long)]
        collateral: Option<f64>,

        /// Ladder points per asset
        #[arg(short, long)]
        ticks: Option<usize>,

        /// Enumeration policy (cartesian, distinct)
        #[arg(long)]
        policy: Option<EnumerationPolicy>,

        /// Style preset (colorful, monochrome)
        #[arg(short, long)]
        style: Option<StylePreset>,

        /// Output resolution
        #[arg(long)]
        dpi: Option<f64>,

        /// CSV report of accepted scenarios
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Seed for polygon colors
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Render the built-in 3, 4 and 5 axis charts
    Demo {
        /// Output directory
        #[arg(short, long, default_value = "./plots")]
        output_dir: PathBuf,
    },

    /// Check configuration and positions
    Check {
        /// Path to positions file (JSON)
        #[arg(short, long)]
        positions: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = RadarConfig::load_or_default(Path::new(&cli.config))
        .with_context(|| format!("failed to load {}", cli.config))?
        .with_env_override();

    // Initialise tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directives(cli.verbose)));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Scan {
            positions,
            output,
            collateral,
            ticks,
            policy,
            style,
            dpi,
            report,
            seed,
        } => {
            if let Some(collateral) = collateral {
                config.collateral = collateral;
            }
            if let Some(ticks) = ticks {
                config.ticks = ticks;
            }
            if let Some(policy) = policy {
                config.policy = policy;
            }
            if let Some(style) = style {
                config.style = style;
            }
            if let Some(dpi) = dpi {
                config.dpi = dpi;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            config.validate()?;

            let mut options = ScanOptions::from_config(&config, positions, output);
            options.report = report;
            let report = commands::scan::run(&options)
                .with_context(|| format!("scan of {} failed", options.positions.display()))?;
            info!(
                accepted = report.summary.accepted,
                polygons = report.polygons,
                "Scan complete"
            );
        }
        Commands::Demo { output_dir } => {
            config.validate()?;
            let mut style = PlotStyle::preset(config.style);
            style.seed = config.seed;
            commands::demo::run(&output_dir, style).context("demo failed")?;
        }
        Commands::Check { positions } => {
            commands::check::run(&positions, &config)
                .with_context(|| format!("check of {} failed", positions.display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_arguments_parse() {
        let cli = Cli::try_parse_from([
            "collateral-radar",
            "-v",
            "scan",
            "--positions",
            "positions.json",
            "--policy",
            "distinct",
            "--style",
            "mono",
            "--ticks",
            "4",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, "collateral-radar.toml");
        match cli.command {
            Commands::Scan {
                policy,
                style,
                ticks,
                output,
                ..
            } => {
                assert_eq!(policy, Some(EnumerationPolicy::Distinct));
                assert_eq!(style, Some(StylePreset::Monochrome));
                assert_eq!(ticks, Some(4));
                assert_eq!(output, PathBuf::from("plot.png"));
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(Cli::try_parse_from([
            "collateral-radar",
            "scan",
            "--positions",
            "p.json",
            "--policy",
            "random",
        ])
        .is_err());
    }
}
