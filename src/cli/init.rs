//! Init command - write a starter config file

use crate::config::GaugeConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the init command
pub fn run() -> Result<()> {
    let config_path = Path::new("gemgauge.toml");

    if config_path.exists() {
        println!("✓ gemgauge.toml already exists, leaving it alone");
        return Ok(());
    }

    std::fs::write(config_path, GaugeConfig::starter_toml())
        .with_context(|| "Failed to write gemgauge.toml")?;

    println!("✓ Wrote gemgauge.toml");
    println!("  Edit it to point at your registry endpoint, then:");
    println!("    gemgauge submit-bench <package> --file bench.json");
    println!("    gemgauge report <package>");
    Ok(())
}
