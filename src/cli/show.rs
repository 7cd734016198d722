//! Show command - print the latest persisted report

use crate::config::GaugeConfig;
use crate::report::Aggregator;
use crate::reporters::{self, OutputFormat};
use anyhow::Result;
use std::str::FromStr;

pub fn run(config: &GaugeConfig, package: &str, format: &str) -> Result<()> {
    let format = OutputFormat::from_str(format)?;

    let aggregator = Aggregator::open(&config.data_dir())?;
    let report = aggregator.latest_report(package)?;

    print!("{}", reporters::render(&report, format)?);
    Ok(())
}
