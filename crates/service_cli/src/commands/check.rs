//! Check command implementation
//!
//! Validates the configuration and a positions file without rendering, and
//! lists the axes a scan would draw.

use std::path::Path;

use radar_core::{AssetBook, EnumerationPolicy};
use tracing::info;

use crate::config::RadarConfig;
use crate::{CliError, Result};

/// Run the check command, returning the loaded positions.
pub fn run(positions: &Path, config: &RadarConfig) -> Result<AssetBook> {
    info!("Checking configuration...");
    config.validate()?;
    info!("  Configuration OK");

    if !positions.exists() {
        return Err(CliError::FileNotFound(positions.display().to_string()));
    }
    let book = AssetBook::from_path(positions)?;

    let sizes = vec![config.ticks; book.len()];
    let space = EnumerationPolicy::space_size(&sizes);
    info!(
        assets = book.len(),
        ticks = config.ticks,
        policy = %config.policy,
        space = %space,
        "Positions OK"
    );

    println!("\n┌────────────────┬──────────────┬──────────────┐");
    println!("│ Axis           │ Max price    │ Max value    │");
    println!("├────────────────┼──────────────┼──────────────┤");
    for asset in book.iter() {
        println!(
            "│ {:<14} │ {:>12.2} │ {:>12.2} │",
            asset.name(),
            asset.price(),
            asset.value_at(asset.price())
        );
    }
    println!("└────────────────┴──────────────┴──────────────┘");
    println!(
        "{} tuples under the {} policy (limit {})",
        space, config.policy, config.max_scenarios
    );

    if space > config.max_scenarios as u128 {
        return Err(CliError::InvalidArgument(format!(
            "{} assets at {} ticks exceed max_scenarios {}",
            book.len(),
            config.ticks,
            config.max_scenarios
        )));
    }

    Ok(book)
}
