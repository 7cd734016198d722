//! Durable result stores
//!
//! Each store is a directory of append-only JSONL files, one file per
//! package. Writes never overwrite history; `latest` reads back the most
//! recent record by timestamp, ties broken by insertion order
//! (last-written wins).
//!
//! Layout under the data dir:
//! - `benchmarks/<package>.jsonl`
//! - `scans/<package>.jsonl`
//! - `reports/<package>.jsonl`

pub mod benchmarks;
pub mod reports;
pub mod scans;

pub use benchmarks::BenchmarkStore;
pub use reports::ReportStore;
pub use scans::ScanStore;

use crate::error::PipelineResult;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Per-package lock registry.
///
/// Writes and report generation for the same package must serialize;
/// different packages proceed concurrently.
#[derive(Default)]
pub struct PackageLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl PackageLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the lock for a package.
    pub fn get(&self, package: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(package.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Map a package name to its record file.
///
/// The sanitized name keeps files recognizable; the hash suffix keeps the
/// mapping collision-free and stable across runs. Gem names are almost
/// always filesystem-safe already, but the registry does not enforce that.
pub(crate) fn record_file(dir: &Path, package: &str) -> PathBuf {
    let digest = Sha256::digest(package.as_bytes());
    let short: String = digest.iter().take(6).map(|b| format!("{b:02x}")).collect();

    let safe: String = package
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .take(40)
        .collect();

    dir.join(format!("{safe}-{short}.jsonl"))
}

/// Append one record to a JSONL file, creating it if needed.
///
/// The write is flushed and synced before returning so a stored result
/// survives process restart.
pub(crate) fn append_record<T: Serialize>(path: &Path, record: &T) -> PipelineResult<()> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    file.write_all(line.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}

/// Read all records from a JSONL file, in insertion order.
///
/// A missing file is an empty history. Corrupt lines are skipped with a
/// warning rather than poisoning the whole history.
pub(crate) fn read_records<T: DeserializeOwned>(path: &Path) -> PipelineResult<Vec<T>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::new();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(line) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping corrupt record at {:?}:{}: {}", path, i + 1, e),
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Rec {
        n: u32,
    }

    #[test]
    fn test_record_file_stable_and_distinct() {
        let dir = Path::new("/tmp/store");
        let a = record_file(dir, "rails");
        let b = record_file(dir, "rails");
        assert_eq!(a, b);
        assert_ne!(a, record_file(dir, "rails2"));
    }

    #[test]
    fn test_record_file_sanitizes_name() {
        let path = record_file(Path::new("/tmp"), "weird/../name");
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
        assert!(name.ends_with(".jsonl"));
    }

    #[test]
    fn test_append_and_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recs.jsonl");
        append_record(&path, &Rec { n: 1 }).unwrap();
        append_record(&path, &Rec { n: 2 }).unwrap();

        let records: Vec<Rec> = read_records(&path).unwrap();
        assert_eq!(records, vec![Rec { n: 1 }, Rec { n: 2 }]);
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let records: Vec<Rec> = read_records(&dir.path().join("nope.jsonl")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_corrupt_line_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recs.jsonl");
        append_record(&path, &Rec { n: 1 }).unwrap();
        std::fs::write(&path, "{\"n\":1}\nnot json\n{\"n\":3}\n").unwrap();

        let records: Vec<Rec> = read_records(&path).unwrap();
        assert_eq!(records, vec![Rec { n: 1 }, Rec { n: 3 }]);
    }

    #[test]
    fn test_package_locks_shared_instance() {
        let locks = PackageLocks::new();
        let a = locks.get("rails");
        let b = locks.get("rails");
        assert!(Arc::ptr_eq(&a, &b));
        let c = locks.get("sinatra");
        assert!(!Arc::ptr_eq(&a, &c));
    }
}
