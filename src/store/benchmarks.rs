//! Benchmark result store
//!
//! Append-only history of benchmark runs per package. `put` validates the
//! measurement invariants up front so a malformed submission never partially
//! writes; `latest` returns the most recent scoreable record.

use crate::error::{PipelineError, PipelineResult};
use crate::models::BenchmarkResult;
use crate::store::{append_record, read_records, record_file, PackageLocks};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct BenchmarkStore {
    dir: PathBuf,
    locks: PackageLocks,
}

impl BenchmarkStore {
    /// Open (or create) the benchmark store under a data directory.
    pub fn open(data_dir: &Path) -> PipelineResult<Self> {
        let dir = data_dir.join("benchmarks");
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            locks: PackageLocks::new(),
        })
    }

    /// Append a benchmark result. Never overwrites history.
    pub fn put(&self, result: &BenchmarkResult) -> PipelineResult<()> {
        validate(result)?;

        let lock = self.locks.get(&result.package_name);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        append_record(&record_file(&self.dir, &result.package_name), result)?;
        debug!(
            "Stored benchmark result for '{}' ({} operations)",
            result.package_name,
            result.operations.len()
        );
        Ok(())
    }

    /// Most recent result for a package, by timestamp; ties go to the
    /// last-written record. Records without operations are not scoreable
    /// and are treated as absent.
    pub fn latest(&self, package: &str) -> PipelineResult<BenchmarkResult> {
        let records: Vec<BenchmarkResult> =
            read_records(&record_file(&self.dir, package))?;

        records
            .into_iter()
            .filter(|r| !r.operations.is_empty())
            .fold(None::<BenchmarkResult>, |best, r| match best {
                Some(b) if r.timestamp < b.timestamp => Some(b),
                _ => Some(r),
            })
            .ok_or_else(|| PipelineError::NotFound {
                package: package.to_string(),
                dimension: "benchmark",
            })
    }

    /// Full stored history for a package, in insertion order.
    pub fn history(&self, package: &str) -> PipelineResult<Vec<BenchmarkResult>> {
        read_records(&record_file(&self.dir, package))
    }
}

fn validate(result: &BenchmarkResult) -> PipelineResult<()> {
    if result.package_name.trim().is_empty() {
        return Err(PipelineError::Validation(
            "benchmark result has an empty package name".into(),
        ));
    }
    if result.operations.is_empty() {
        return Err(PipelineError::Validation(format!(
            "benchmark result for '{}' has no operations",
            result.package_name
        )));
    }
    for (op, stats) in &result.operations {
        if !stats.throughput.is_finite() || stats.throughput < 0.0 {
            return Err(PipelineError::Validation(format!(
                "operation '{op}' has invalid throughput {}",
                stats.throughput
            )));
        }
        if !stats.variance.is_finite() || stats.variance < 0.0 {
            return Err(PipelineError::Validation(format!(
                "operation '{op}' has invalid variance {}",
                stats.variance
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OperationStats;
    use chrono::{Duration, Utc};
    use std::collections::BTreeMap;

    fn ops(throughput: f64) -> BTreeMap<String, OperationStats> {
        let mut ops = BTreeMap::new();
        ops.insert(
            "push".to_string(),
            OperationStats {
                throughput,
                variance: 0.05,
            },
        );
        ops
    }

    #[test]
    fn test_put_then_latest_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = BenchmarkStore::open(dir.path()).unwrap();

        let result = BenchmarkResult::new("rails", ops(5000.0));
        store.put(&result).unwrap();

        let latest = store.latest("rails").unwrap();
        assert_eq!(latest.package_name, "rails");
        assert_eq!(latest.operations["push"].throughput, 5000.0);
    }

    #[test]
    fn test_latest_prefers_newest_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let store = BenchmarkStore::open(dir.path()).unwrap();

        let mut old = BenchmarkResult::new("rails", ops(1.0));
        old.timestamp = Utc::now() - Duration::hours(2);
        let new = BenchmarkResult::new("rails", ops(2.0));

        // Insertion order deliberately newest-first
        store.put(&new).unwrap();
        store.put(&old).unwrap();

        let latest = store.latest("rails").unwrap();
        assert_eq!(latest.operations["push"].throughput, 2.0);
    }

    #[test]
    fn test_latest_tie_goes_to_last_written() {
        let dir = tempfile::tempdir().unwrap();
        let store = BenchmarkStore::open(dir.path()).unwrap();

        let first = BenchmarkResult::new("rails", ops(1.0));
        let mut second = BenchmarkResult::new("rails", ops(2.0));
        second.timestamp = first.timestamp;

        store.put(&first).unwrap();
        store.put(&second).unwrap();

        let latest = store.latest("rails").unwrap();
        assert_eq!(latest.operations["push"].throughput, 2.0);
    }

    #[test]
    fn test_latest_missing_package_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = BenchmarkStore::open(dir.path()).unwrap();
        let err = store.latest("ghost").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_put_rejects_negative_throughput() {
        let dir = tempfile::tempdir().unwrap();
        let store = BenchmarkStore::open(dir.path()).unwrap();

        let result = BenchmarkResult::new("rails", ops(-1.0));
        let err = store.put(&result).unwrap_err();
        assert!(matches!(err, PipelineError::Validation(_)));

        // Nothing partially written
        assert!(store.history("rails").unwrap().is_empty());
    }

    #[test]
    fn test_put_rejects_empty_operations() {
        let dir = tempfile::tempdir().unwrap();
        let store = BenchmarkStore::open(dir.path()).unwrap();

        let result = BenchmarkResult::new("rails", BTreeMap::new());
        assert!(matches!(
            store.put(&result),
            Err(PipelineError::Validation(_))
        ));
    }

    #[test]
    fn test_put_rejects_nan_variance() {
        let dir = tempfile::tempdir().unwrap();
        let store = BenchmarkStore::open(dir.path()).unwrap();

        let mut operations = BTreeMap::new();
        operations.insert(
            "push".to_string(),
            OperationStats {
                throughput: 100.0,
                variance: f64::NAN,
            },
        );
        let result = BenchmarkResult::new("rails", operations);
        assert!(matches!(
            store.put(&result),
            Err(PipelineError::Validation(_))
        ));
    }

    #[test]
    fn test_history_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let store = BenchmarkStore::open(dir.path()).unwrap();

        store.put(&BenchmarkResult::new("rails", ops(1.0))).unwrap();
        store.put(&BenchmarkResult::new("rails", ops(2.0))).unwrap();

        assert_eq!(store.history("rails").unwrap().len(), 2);
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = BenchmarkStore::open(dir.path()).unwrap();
            store
                .put(&BenchmarkResult::new("rails", ops(5000.0)))
                .unwrap();
        }
        let store = BenchmarkStore::open(dir.path()).unwrap();
        assert!(store.latest("rails").is_ok());
    }
}
