//! Scoring engine
//!
//! Pure, deterministic mapping from raw results to bounded 0-100 scores and
//! recommendation text. No I/O, no clock reads; calling any function twice
//! with the same input yields the same output.
//!
//! Performance uses a five-tier bucket table over average throughput.
//! Security starts from a severity-weighted risk score capped at 100 and
//! inverts it.

pub mod version;

use crate::models::{BenchmarkResult, ScanResult, SeverityCounts};

/// Performance tiers: (upper bound on avg ops/sec inclusive, score, recommendation)
const PERF_TIERS: [(f64, u8, &str); 5] = [
    (1_000.0, 20, "Very slow performance - consider optimization"),
    (10_000.0, 40, "Slow performance - optimization recommended"),
    (100_000.0, 60, "Moderate performance - acceptable for most uses"),
    (1_000_000.0, 80, "Good performance - well optimized"),
    (f64::INFINITY, 100, "Excellent performance - highly optimized"),
];

/// Risk buckets: (upper bound on risk score inclusive, recommendation)
const RISK_BUCKETS: [(f64, &str); 4] = [
    (20.0, "Low security risk - safe to use"),
    (50.0, "Medium security risk - consider updating"),
    (80.0, "High security risk - update recommended"),
    (100.0, "Critical security risk - update immediately"),
];

/// Maximum risk score; 10 criticals already saturate it
const RISK_CAP: f64 = 100.0;

/// Score average throughput into a performance tier.
///
/// Tier bounds are closed on the upper end: exactly 1,000 ops/sec is still
/// tier one, 1,001 is tier two.
pub fn performance_score(avg_throughput: f64) -> (u8, &'static str) {
    for (bound, score, recommendation) in PERF_TIERS {
        if avg_throughput <= bound {
            return (score, recommendation);
        }
    }
    // Unreachable: the last tier bound is infinite
    let (_, score, recommendation) = PERF_TIERS[PERF_TIERS.len() - 1];
    (score, recommendation)
}

/// Score the latest benchmark result for a package.
///
/// Returns `None` when the result has no operations - absence of data is not
/// a zero score.
pub fn score_benchmark(result: &BenchmarkResult) -> Option<(u8, &'static str)> {
    result.avg_throughput().map(performance_score)
}

/// Weighted-severity risk score, capped at 100.
pub fn risk_score(counts: &SeverityCounts) -> f64 {
    let raw = counts.critical as f64 * 10.0
        + counts.high as f64 * 7.0
        + counts.medium as f64 * 4.0
        + counts.low as f64 * 1.0
        + counts.unknown as f64 * 0.5;
    raw.min(RISK_CAP)
}

/// Score the latest scan result for a package.
///
/// A scan with zero findings is a clean scan: risk 0, score 100.
pub fn score_scan(scan: &ScanResult) -> (u8, &'static str) {
    let risk = risk_score(&scan.severity_counts());
    let score = (RISK_CAP - risk).round() as u8;

    for (bound, recommendation) in RISK_BUCKETS {
        if risk <= bound {
            return (score, recommendation);
        }
    }
    (score, RISK_BUCKETS[RISK_BUCKETS.len() - 1].1)
}

/// Combine the two dimension scores into an overall score.
///
/// Both present: rounded arithmetic mean. Exactly one present: that score,
/// with no averaging against a phantom zero. Neither: `None` - the caller
/// turns this into `InsufficientData`.
pub fn overall_score(performance: Option<u8>, security: Option<u8>) -> Option<u8> {
    match (performance, security) {
        (Some(p), Some(s)) => Some(((p as f64 + s as f64) / 2.0).round() as u8),
        (Some(p), None) => Some(p),
        (None, Some(s)) => Some(s),
        (None, None) => None,
    }
}
