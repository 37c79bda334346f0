//! Demo command: built-in radar charts.
//!
//! Renders three fixed charts with 3, 4 and 5 axes. Each is written as a
//! PNG at 100 dpi, a PNG at 300 dpi and an SVG.
//!
//! # Output
//!
//! ```text
//! plot3.png  plot3_hd.png  plot3.svg
//! plot4.png  plot4_hd.png  plot4.svg
//! plot5.png  plot5_hd.png  plot5.svg
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use radar_plot::{MultipleAxisPlot, PlotStyle, SaveOptions};
use tracing::info;

use crate::Result;

const DEMO_ALPHA: f64 = 0.5;
const HD_DPI: f64 = 300.0;

/// A built-in chart.
struct DemoChart {
    name: &'static str,
    maxvals: &'static [f64],
    names: &'static [&'static str],
    polygons: &'static [&'static [f64]],
}

const CHARTS: [DemoChart; 3] = [
    DemoChart {
        name: "plot3",
        maxvals: &[10.0, 20.0, 30.0],
        names: &["SRMUSD", "BTCUSD", "ETHUSD"],
        polygons: &[&[8.0, 6.0, 3.0], &[4.0, 12.0, 10.0]],
    },
    DemoChart {
        name: "plot4",
        maxvals: &[10.0, 20.0, 30.0, 1.0],
        names: &["a", "b", "c", "d"],
        polygons: &[&[8.0, 6.0, 3.0, 0.5]],
    },
    DemoChart {
        name: "plot5",
        maxvals: &[10.0, 20.0, 30.0, 1.0, 100.0],
        names: &["a", "b", "c", "d", "e"],
        polygons: &[&[8.0, 6.0, 3.0, 0.5, 80.0]],
    },
];

/// Run the demo command, returning the written files.
pub fn run(output_dir: &Path, style: PlotStyle) -> Result<Vec<PathBuf>> {
    println!("========================================");
    println!("Collateral Radar Demo");
    println!("========================================");

    fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    for chart in &CHARTS {
        let mut plot = MultipleAxisPlot::new(8.0, 8.0, style.clone())?;
        plot.draw_axis(chart.maxvals, chart.names)?;
        for values in chart.polygons {
            plot.draw_polygon(values, DEMO_ALPHA)?;
        }

        let outputs = [
            (format!("{}.png", chart.name), SaveOptions::default()),
            (format!("{}_hd.png", chart.name), SaveOptions::with_dpi(HD_DPI)),
            (format!("{}.svg", chart.name), SaveOptions::default()),
        ];
        for (file, options) in outputs {
            let path = output_dir.join(file);
            plot.save_plot(&path, &options)?;
            println!("[Demo] {} axes -> {}", plot.axis_count(), path.display());
            written.push(path);
        }
    }

    info!("Demo complete: {} files in {}", written.len(), output_dir.display());
    Ok(written)
}
