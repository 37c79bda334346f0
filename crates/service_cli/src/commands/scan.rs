//! Scan command implementation
//!
//! Loads positions, enumerates price scenarios under the collateral ceiling
//! and draws every accepted scenario on one radar chart.

use std::path::{Path, PathBuf};

use radar_core::{AssetBook, EnumerationPolicy, ScanOutcome, ScanSummary, ScenarioScan};
use radar_plot::{MultipleAxisPlot, PlotStyle, SaveOptions, StylePreset};
use tracing::{debug, info};

use crate::config::RadarConfig;
use crate::{CliError, Result};

/// Resolved scan settings: config values with command-line overrides applied.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Positions JSON file
    pub positions: PathBuf,
    /// Plot output path
    pub output: PathBuf,
    /// Collateral ceiling
    pub collateral: f64,
    /// Ladder points per asset
    pub ticks: usize,
    /// Enumeration policy
    pub policy: EnumerationPolicy,
    /// Style preset
    pub style: StylePreset,
    /// Figure width in inches
    pub width: f64,
    /// Figure height in inches
    pub height: f64,
    /// Output resolution
    pub dpi: f64,
    /// Opacity scale
    pub alpha_scale: f64,
    /// Upper bound on enumerated tuples
    pub max_scenarios: usize,
    /// Polygon color seed
    pub seed: Option<u64>,
    /// Optional CSV report path
    pub report: Option<PathBuf>,
}

impl ScanOptions {
    /// Settings from configuration for the given input and output.
    pub fn from_config(config: &RadarConfig, positions: PathBuf, output: PathBuf) -> Self {
        Self {
            positions,
            output,
            collateral: config.collateral,
            ticks: config.ticks,
            policy: config.policy,
            style: config.style,
            width: config.width,
            height: config.height,
            dpi: config.dpi,
            alpha_scale: config.alpha_scale,
            max_scenarios: config.max_scenarios,
            seed: config.seed,
            report: None,
        }
    }

    fn plot_style(&self) -> PlotStyle {
        // axis ticks mark the ladder rungs
        let style = PlotStyle::preset(self.style).with_ticks(self.ticks.saturating_sub(1).max(1));
        match self.seed {
            Some(seed) => style.with_seed(seed),
            None => style,
        }
    }
}

/// What a scan produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    /// Classification counts
    pub summary: ScanSummary,
    /// Polygons drawn on the chart
    pub polygons: usize,
}

/// Run the scan command
pub fn run(options: &ScanOptions) -> Result<ScanReport> {
    info!("Starting scan...");
    info!("  Positions: {}", options.positions.display());
    info!("  Collateral: {}", options.collateral);
    info!("  Ticks: {}", options.ticks);
    info!("  Policy: {}", options.policy);

    if !options.positions.exists() {
        return Err(CliError::FileNotFound(
            options.positions.display().to_string(),
        ));
    }
    if !options.dpi.is_finite() || options.dpi <= 0.0 {
        return Err(CliError::InvalidArgument(format!(
            "dpi must be positive, got {}",
            options.dpi
        )));
    }

    let book = AssetBook::from_path(&options.positions)?;
    let scan = ScenarioScan::new(options.collateral, options.ticks)?
        .with_policy(options.policy)
        .with_alpha_scale(options.alpha_scale)?
        .with_max_scenarios(options.max_scenarios);
    let outcome = scan.run(&book)?;

    let mut plot = MultipleAxisPlot::new(options.width, options.height, options.plot_style())?;
    plot.draw_axis(&book.max_prices(), &book.names())?;
    for scenario in &outcome.scenarios {
        plot.draw_polygon(&scenario.prices, scenario.alpha)?;
    }
    let polygons = plot.polygon_count();
    debug!(polygons, "Scenarios drawn");
    plot.save_plot(&options.output, &SaveOptions::with_dpi(options.dpi))?;

    if let Some(report) = &options.report {
        write_report(report, &book, &outcome)?;
        info!("Scenario report written to {}", report.display());
    }

    let summary = outcome.summary;

    println!("\n┌─────────────────┬────────────┐");
    println!("│ Enumerated      │ {:>10} │", summary.enumerated);
    println!("│ Accepted        │ {:>10} │", summary.accepted);
    println!("│ Zero index      │ {:>10} │", summary.zero_index);
    println!("│ Over collateral │ {:>10} │", summary.over_collateral);
    println!("└─────────────────┴────────────┘");
    println!("Plot: {}", options.output.display());

    Ok(ScanReport { summary, polygons })
}

/// Write one row per accepted scenario: one price column per asset, then the
/// weighted sum and the rendering alpha.
pub fn write_report(path: &Path, book: &AssetBook, outcome: &ScanOutcome) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<String> = book
        .names()
        .iter()
        .map(|name| format!("asset_{}", name))
        .collect();
    header.push("weighted_sum".to_string());
    header.push("alpha".to_string());
    writer.write_record(&header)?;

    for scenario in &outcome.scenarios {
        let mut row: Vec<String> = scenario.prices.iter().map(f64::to_string).collect();
        row.push(scenario.weighted_sum.to_string());
        row.push(scenario.alpha.to_string());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const POSITIONS: &str = r#"{
        "A": {"factor": 1, "amount": 10, "price": 100},
        "B": {"factor": 1, "amount": 5, "price": 200}
    }"#;

    fn options(dir: &Path) -> ScanOptions {
        let positions = dir.join("positions.json");
        fs::write(&positions, POSITIONS).unwrap();

        let mut config = RadarConfig::default();
        config.collateral = 2000.0;
        config.width = 2.0;
        config.height = 2.0;
        config.dpi = 50.0;
        config.seed = Some(11);
        ScanOptions::from_config(&config, positions, dir.join("radar.png"))
    }

    #[test]
    fn test_scan_writes_plot_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path());
        opts.report = Some(dir.path().join("scenarios.csv"));

        let ScanReport { summary, polygons } = run(&opts).unwrap();
        assert_eq!(summary.enumerated, 25);
        assert_eq!(summary.zero_index, 9);
        assert!(summary.accepted > 0);
        assert_eq!(polygons, summary.accepted);
        assert!(opts.output.exists());

        let report = fs::read_to_string(dir.path().join("scenarios.csv")).unwrap();
        let mut lines = report.lines();
        assert_eq!(lines.next().unwrap(), "asset_A,asset_B,weighted_sum,alpha");
        assert_eq!(lines.count(), summary.accepted);
        assert!(report.contains("50,50,750,"));
    }

    #[test]
    fn test_every_accepted_scenario_is_drawn() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path());
        for collateral in [250.0, 750.0, 1500.0, 2000.0] {
            opts.collateral = collateral;
            let report = run(&opts).unwrap();
            let summary = report.summary;
            assert_eq!(report.polygons, summary.accepted);
            assert_eq!(
                summary.accepted + summary.zero_index + summary.over_collateral,
                summary.enumerated
            );
        }
    }

    #[test]
    fn test_short_position_is_rejected_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path());
        opts.collateral = 100.0;
        fs::write(
            &opts.positions,
            r#"{"A": {"factor": 1, "amount": -10, "price": 100},
                "B": {"factor": 1, "amount": 5, "price": 200}}"#,
        )
        .unwrap();

        let err = run(&opts).unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(radar_core::CoreError::InvalidAsset { .. })
        ));
        assert!(!opts.output.exists());
    }

    #[test]
    fn test_missing_positions() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path());
        opts.positions = dir.path().join("absent.json");
        assert!(matches!(run(&opts), Err(CliError::FileNotFound(_))));
    }

    #[test]
    fn test_unsupported_output_format() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path());
        opts.output = dir.path().join("radar.pdf");
        assert!(matches!(run(&opts), Err(CliError::Plot(_))));
    }

    #[test]
    fn test_core_errors_propagate() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path());
        opts.ticks = 1;
        assert!(matches!(run(&opts), Err(CliError::Core(_))));

        let mut opts = options(dir.path());
        opts.policy = EnumerationPolicy::Distinct;
        opts.ticks = 2;
        fs::write(
            &opts.positions,
            r#"{"A": {"factor": 1, "amount": 1, "price": 1},
                "B": {"factor": 1, "amount": 1, "price": 1},
                "C": {"factor": 1, "amount": 1, "price": 1}}"#,
        )
        .unwrap();
        assert!(matches!(run(&opts), Err(CliError::Core(_))));
    }

    #[test]
    fn test_plot_ticks_follow_ladder() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path());
        assert_eq!(opts.plot_style().n_tick, 4);
        assert_eq!(opts.plot_style().seed, Some(11));
    }
}
