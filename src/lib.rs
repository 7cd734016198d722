//! Gemgauge - package quality metrics pipeline for the GemHub registry
//!
//! Benchmark runs and vulnerability scans flow into durable, append-only
//! result stores; a pure scoring engine maps the latest results to
//! normalized 0-100 scores with recommendations; the aggregator persists
//! immutable quality reports and forwards them to the registry API.
//!
//! The binary wraps this library with one subcommand per pipeline
//! invocation; everything here is also usable directly:
//!
//! ```no_run
//! use gemgauge::report::Aggregator;
//!
//! let aggregator = Aggregator::open(std::path::Path::new("/var/lib/gemgauge"))?;
//! let outcome = aggregator.generate_report("rails", false)?;
//! println!("{} scored {}", outcome.report.package_name, outcome.report.overall_score);
//! # Ok::<(), gemgauge::PipelineError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod reporters;
pub mod scoring;
pub mod store;

pub use error::{PipelineError, PipelineResult};
pub use models::{
    BenchmarkResult, OperationStats, ScanResult, ScoreReport, Severity, SeverityCounts,
    VulnerabilityFinding,
};
pub use report::{Aggregator, ForwardStatus, RegistrySink, ReportOutcome};
pub use store::{BenchmarkStore, ReportStore, ScanStore};
