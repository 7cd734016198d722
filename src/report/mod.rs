//! Aggregator: one full scoring pass per call
//!
//! `generate_report` reads the latest benchmark and scan results (each
//! independently optional), scores them, persists an immutable report, and
//! forwards it to the registry sink. Forwarding failure never rolls back the
//! persisted report - it is logged and surfaced as a partial success.
//!
//! Calls for the same package serialize on a per-package lock so two
//! concurrent reports cannot read inconsistent store states; different
//! packages proceed in parallel.

pub mod sink;

pub use sink::RegistrySink;

use crate::config::GaugeConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::models::{BenchmarkResult, ScanResult, ScoreReport};
use crate::scoring;
use crate::store::{BenchmarkStore, PackageLocks, ReportStore, ScanStore};
use chrono::Utc;
use std::path::Path;
use tracing::{info, warn};

/// What happened to the forward step of an otherwise successful report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardStatus {
    /// Registry accepted the report
    Sent,
    /// No sink configured
    Skipped,
    /// Sink call failed or timed out; the report is still persisted
    Failed(String),
}

/// Result of one `generate_report` call
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub report: ScoreReport,
    pub forward: ForwardStatus,
}

pub struct Aggregator {
    benchmarks: BenchmarkStore,
    scans: ScanStore,
    reports: ReportStore,
    sink: Option<RegistrySink>,
    locks: PackageLocks,
}

impl Aggregator {
    /// Open all three stores under a data directory, without a sink.
    pub fn open(data_dir: &Path) -> PipelineResult<Self> {
        Ok(Self {
            benchmarks: BenchmarkStore::open(data_dir)?,
            scans: ScanStore::open(data_dir)?,
            reports: ReportStore::open(data_dir)?,
            sink: None,
            locks: PackageLocks::new(),
        })
    }

    /// Open from config: data dir plus sink if a registry URL is set.
    pub fn from_config(config: &GaugeConfig) -> PipelineResult<Self> {
        let mut aggregator = Self::open(&config.data_dir())?;
        if let Some(url) = config.registry_url() {
            aggregator.sink = Some(RegistrySink::new(url, config.forward_timeout()));
        }
        Ok(aggregator)
    }

    pub fn with_sink(mut self, sink: RegistrySink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn benchmarks(&self) -> &BenchmarkStore {
        &self.benchmarks
    }

    pub fn scans(&self) -> &ScanStore {
        &self.scans
    }

    /// Run one full scoring pass for a package.
    ///
    /// Fails with `InsufficientData` (persisting nothing) when neither
    /// dimension has data. With `forward = false` the sink is skipped even
    /// when configured.
    pub fn generate_report(&self, package: &str, forward: bool) -> PipelineResult<ReportOutcome> {
        let lock = self.locks.get(package);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let benchmark = self.optional(self.benchmarks.latest(package))?;
        let scan = self.optional(self.scans.latest(package))?;

        let report = build_report(package, benchmark.as_ref(), scan.as_ref())?;
        self.reports.put(&report)?;
        info!(
            "Scored '{}': performance {:?}, security {:?}, overall {}",
            package, report.performance_score, report.security_score, report.overall_score
        );

        let forward_status = match (&self.sink, forward) {
            (Some(sink), true) => match sink.forward(&report) {
                Ok(()) => ForwardStatus::Sent,
                Err(e) => {
                    // Report stays persisted; surfacing as partial success
                    warn!("Report for '{}' persisted but not forwarded: {}", package, e);
                    ForwardStatus::Failed(e.to_string())
                }
            },
            _ => ForwardStatus::Skipped,
        };

        Ok(ReportOutcome {
            report,
            forward: forward_status,
        })
    }

    /// Most recent persisted report for a package.
    pub fn latest_report(&self, package: &str) -> PipelineResult<ScoreReport> {
        self.reports.latest(package)
    }

    /// NotFound is "this dimension is absent", everything else propagates.
    fn optional<T>(&self, result: PipelineResult<T>) -> PipelineResult<Option<T>> {
        match result {
            Ok(v) => Ok(Some(v)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Score both dimensions and assemble the report record.
fn build_report(
    package: &str,
    benchmark: Option<&BenchmarkResult>,
    scan: Option<&ScanResult>,
) -> PipelineResult<ScoreReport> {
    if benchmark.is_none() && scan.is_none() {
        return Err(PipelineError::InsufficientData(package.to_string()));
    }

    let performance = benchmark.and_then(scoring::score_benchmark);

    // Absence of scan evidence is treated as clean (score 100), but only
    // once some data exists for the package; the defaulted dimension gets
    // no recommendation line.
    let security = match scan {
        Some(scan) => {
            let (score, recommendation) = scoring::score_scan(scan);
            Some((score, Some(recommendation)))
        }
        None => Some((100, None)),
    };

    let performance_score = performance.map(|(score, _)| score);
    let security_score = security.map(|(score, _)| score);

    let overall_score = scoring::overall_score(performance_score, security_score)
        .ok_or_else(|| PipelineError::InsufficientData(package.to_string()))?;

    let mut recommendations = Vec::new();
    if let Some((_, recommendation)) = performance {
        recommendations.push(format!("Performance: {recommendation}"));
    }
    if let Some((_, Some(recommendation))) = security {
        recommendations.push(format!("Security: {recommendation}"));
    }

    Ok(ScoreReport {
        package_name: package.to_string(),
        timestamp: Utc::now(),
        performance_score,
        security_score,
        overall_score,
        recommendations,
    })
}
