//! Report command - run one full scoring pass

use crate::config::GaugeConfig;
use crate::report::{Aggregator, ForwardStatus, RegistrySink};
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub fn run(
    config: &GaugeConfig,
    package: &str,
    format: &str,
    output: Option<&Path>,
    no_forward: bool,
    timeout: Option<u64>,
) -> Result<()> {
    let format = OutputFormat::from_str(format)?;

    let mut aggregator = Aggregator::open(&config.data_dir())?;
    if let Some(url) = config.registry_url() {
        let timeout = timeout
            .map(Duration::from_secs)
            .unwrap_or_else(|| config.forward_timeout());
        aggregator = aggregator.with_sink(RegistrySink::new(url, timeout));
    }

    let outcome = aggregator.generate_report(package, !no_forward)?;
    let rendered = reporters::render(&outcome.report, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Report written to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    match outcome.forward {
        ForwardStatus::Sent => eprintln!("✓ Report forwarded to registry"),
        ForwardStatus::Skipped => {}
        ForwardStatus::Failed(reason) => {
            eprintln!("⚠ Report persisted but not forwarded: {reason}");
        }
    }

    Ok(())
}
