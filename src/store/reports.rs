//! Score report store
//!
//! Persisted reports are immutable snapshots: one record per
//! `generate_report` call, keyed by (package, timestamp), append-only.
//! A newer report supersedes an older one; nothing is ever mutated.

use crate::error::{PipelineError, PipelineResult};
use crate::models::ScoreReport;
use crate::store::{append_record, read_records, record_file};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    /// Open (or create) the report store under a data directory.
    pub fn open(data_dir: &Path) -> PipelineResult<Self> {
        let dir = data_dir.join("reports");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Persist a report snapshot.
    ///
    /// Callers serialize per package (the aggregator holds the package lock
    /// across score-persist-forward), so no locking happens here.
    pub fn put(&self, report: &ScoreReport) -> PipelineResult<()> {
        append_record(&record_file(&self.dir, &report.package_name), report)?;
        debug!(
            "Persisted report for '{}' (overall {})",
            report.package_name, report.overall_score
        );
        Ok(())
    }

    /// Most recent report for a package.
    pub fn latest(&self, package: &str) -> PipelineResult<ScoreReport> {
        let records: Vec<ScoreReport> = read_records(&record_file(&self.dir, package))?;

        records
            .into_iter()
            .fold(None::<ScoreReport>, |best, r| match best {
                Some(b) if r.timestamp < b.timestamp => Some(b),
                _ => Some(r),
            })
            .ok_or_else(|| PipelineError::NotFound {
                package: package.to_string(),
                dimension: "report",
            })
    }

    /// Full report history for a package, in insertion order.
    pub fn history(&self, package: &str) -> PipelineResult<Vec<ScoreReport>> {
        read_records(&record_file(&self.dir, package))
    }
}
