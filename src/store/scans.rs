//! Vulnerability scan store
//!
//! Append-only history of scan results per package. Severities are a lossy
//! enumeration handled at deserialization time, so unknown severity strings
//! are accepted here, never rejected. Structural problems (empty package
//! name, findings without an advisory id) still fail validation.

use crate::error::{PipelineError, PipelineResult};
use crate::models::ScanResult;
use crate::store::{append_record, read_records, record_file, PackageLocks};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ScanStore {
    dir: PathBuf,
    locks: PackageLocks,
}

impl ScanStore {
    /// Open (or create) the scan store under a data directory.
    pub fn open(data_dir: &Path) -> PipelineResult<Self> {
        let dir = data_dir.join("scans");
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            locks: PackageLocks::new(),
        })
    }

    /// Append a scan result. Never overwrites history.
    pub fn put(&self, scan: &ScanResult) -> PipelineResult<()> {
        validate(scan)?;

        let lock = self.locks.get(&scan.package_name);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        append_record(&record_file(&self.dir, &scan.package_name), scan)?;
        debug!(
            "Stored scan result for '{}' ({} findings)",
            scan.package_name,
            scan.findings.len()
        );
        Ok(())
    }

    /// Most recent scan for a package, by timestamp; ties go to the
    /// last-written record.
    pub fn latest(&self, package: &str) -> PipelineResult<ScanResult> {
        let records: Vec<ScanResult> = read_records(&record_file(&self.dir, package))?;

        records
            .into_iter()
            .fold(None::<ScanResult>, |best, r| match best {
                Some(b) if r.timestamp < b.timestamp => Some(b),
                _ => Some(r),
            })
            .ok_or_else(|| PipelineError::NotFound {
                package: package.to_string(),
                dimension: "scan",
            })
    }

    /// Full stored history for a package, in insertion order.
    pub fn history(&self, package: &str) -> PipelineResult<Vec<ScanResult>> {
        read_records(&record_file(&self.dir, package))
    }
}

fn validate(scan: &ScanResult) -> PipelineResult<()> {
    if scan.package_name.trim().is_empty() {
        return Err(PipelineError::Validation(
            "scan result has an empty package name".into(),
        ));
    }
    for finding in &scan.findings {
        if finding.id.trim().is_empty() {
            return Err(PipelineError::Validation(format!(
                "scan for '{}' contains a finding without an advisory id",
                scan.package_name
            )));
        }
    }
    Ok(())
}
