//! Submit commands - ingest benchmark runs and vulnerability scans

use crate::config::GaugeConfig;
use crate::models::{BenchmarkResult, OperationStats, ScanResult, VulnerabilityFinding};
use crate::store::{BenchmarkStore, ScanStore};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Ingest one benchmark run from a JSON file of operation measurements.
pub fn run_bench(config: &GaugeConfig, package: &str, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let operations: BTreeMap<String, OperationStats> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid operations map", file.display()))?;

    let result = BenchmarkResult::new(package, operations);
    let store = BenchmarkStore::open(&config.data_dir())?;
    store.put(&result)?;

    info!(
        "Recorded benchmark for '{}' ({} operations)",
        package,
        result.operations.len()
    );
    println!(
        "✓ Stored benchmark result for {} ({} operations)",
        package,
        result.operations.len()
    );
    Ok(())
}

/// Ingest one vulnerability scan from a JSON file of findings.
pub fn run_scan(config: &GaugeConfig, package: &str, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let findings: Vec<VulnerabilityFinding> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid findings array", file.display()))?;

    let scan = ScanResult::new(package, findings);
    let store = ScanStore::open(&config.data_dir())?;
    store.put(&scan)?;

    info!(
        "Recorded scan for '{}' ({} findings)",
        package,
        scan.findings.len()
    );
    println!(
        "✓ Stored scan result for {} ({} findings)",
        package,
        scan.findings.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use crate::store::ScanStore;

    fn config_for(dir: &Path) -> GaugeConfig {
        GaugeConfig {
            data_dir: Some(dir.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_submit_bench_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bench.json");
        std::fs::write(
            &file,
            r#"{"push": {"throughput": 125000.0, "variance": 0.03}}"#,
        )
        .unwrap();

        run_bench(&config_for(dir.path()), "rails", &file).unwrap();

        let store = BenchmarkStore::open(dir.path()).unwrap();
        let latest = store.latest("rails").unwrap();
        assert_eq!(latest.operations["push"].throughput, 125000.0);
    }

    #[test]
    fn test_submit_bench_rejects_negative() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bench.json");
        std::fs::write(
            &file,
            r#"{"push": {"throughput": -5.0, "variance": 0.03}}"#,
        )
        .unwrap();

        assert!(run_bench(&config_for(dir.path()), "rails", &file).is_err());
    }

    #[test]
    fn test_submit_scan_normalizes_severity() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("scan.json");
        std::fs::write(
            &file,
            r#"[{"id": "CVE-2024-1", "severity": "bogus"}]"#,
        )
        .unwrap();

        run_scan(&config_for(dir.path()), "rails", &file).unwrap();

        let store = ScanStore::open(dir.path()).unwrap();
        let latest = store.latest("rails").unwrap();
        assert_eq!(latest.findings[0].severity, Severity::Unknown);
    }
}
