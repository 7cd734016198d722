//! Core data models for gemgauge
//!
//! These models are used throughout the pipeline for representing
//! benchmark measurements, vulnerability findings, and score reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Severity levels for vulnerability findings.
///
/// This is a closed enumeration: anything a scanner sends that is not one of
/// the four known levels normalizes to `Unknown` instead of failing ingest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Unknown,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Normalize a raw severity string from a scanner.
    ///
    /// Case-insensitive; unrecognized values map to `Unknown`, never error.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            _ => Severity::Unknown,
        }
    }

    /// Risk weight used by the security scoring formula.
    pub fn risk_weight(&self) -> f64 {
        match self {
            Severity::Critical => 10.0,
            Severity::High => 7.0,
            Severity::Medium => 4.0,
            Severity::Low => 1.0,
            Severity::Unknown => 0.5,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
            Severity::Unknown => write!(f, "unknown"),
        }
    }
}

/// Deserialize a severity from any string, normalizing unknown values.
///
/// Scanner output is untrusted enough that `"n/a"` or `"MODERATE"` must not
/// abort a whole scan submission.
fn severity_lossy<'de, D>(deserializer: D) -> Result<Severity, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(Severity::normalize(&raw))
}

/// Measurements for a single benchmarked operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationStats {
    /// Operations per second
    pub throughput: f64,
    /// Variance across benchmark iterations
    pub variance: f64,
}

/// One benchmark run for a package.
///
/// Results accumulate per package; the pipeline only ever scores the most
/// recent one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub package_name: String,
    pub timestamp: DateTime<Utc>,
    /// Operation name -> measurements. BTreeMap keeps serialized output stable.
    pub operations: BTreeMap<String, OperationStats>,
}

impl BenchmarkResult {
    pub fn new(
        package_name: impl Into<String>,
        operations: BTreeMap<String, OperationStats>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            timestamp: Utc::now(),
            operations,
        }
    }

    /// Average throughput across all operations.
    ///
    /// Returns `None` for a result with no operations.
    pub fn avg_throughput(&self) -> Option<f64> {
        if self.operations.is_empty() {
            return None;
        }
        let sum: f64 = self.operations.values().map(|s| s.throughput).sum();
        Some(sum / self.operations.len() as f64)
    }
}

/// One reported vulnerability against a package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VulnerabilityFinding {
    /// Advisory identifier (e.g. "CVE-2024-1234" or "GHSA-...")
    pub id: String,
    #[serde(deserialize_with = "severity_lossy", default)]
    pub severity: Severity,
    /// First affected release, as an opaque version string
    #[serde(default)]
    pub affected_range: Option<String>,
    /// First patched release, as an opaque version string
    #[serde(default)]
    pub patched_range: Option<String>,
}

/// One vulnerability scan for a package.
///
/// An empty findings list is a valid clean scan; it is not the same thing
/// as no scan having run at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub package_name: String,
    pub timestamp: DateTime<Utc>,
    pub findings: Vec<VulnerabilityFinding>,
}

impl ScanResult {
    pub fn new(package_name: impl Into<String>, findings: Vec<VulnerabilityFinding>) -> Self {
        Self {
            package_name: package_name.into(),
            timestamp: Utc::now(),
            findings,
        }
    }

    pub fn severity_counts(&self) -> SeverityCounts {
        SeverityCounts::from_findings(&self.findings)
    }
}

/// Finding counts by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub unknown: usize,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[VulnerabilityFinding]) -> Self {
        let mut counts = Self::default();
        for f in findings {
            match f.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
                Severity::Unknown => counts.unknown += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low + self.unknown
    }
}

/// Composite quality report for a package.
///
/// Immutable once persisted; a new report supersedes it. This struct is also
/// the JSON payload forwarded to the registry sink, so absent dimensions are
/// omitted from serialization rather than sent as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub package_name: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_score: Option<u8>,
    pub overall_score: u8,
    pub recommendations: Vec<String>,
}

impl ScoreReport {
    /// Letter grade for display purposes (not part of the stored record).
    pub fn grade(&self) -> &'static str {
        match self.overall_score {
            s if s >= 90 => "A",
            s if s >= 80 => "B",
            s if s >= 70 => "C",
            s if s >= 60 => "D",
            _ => "F",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_normalize_known() {
        assert_eq!(Severity::normalize("critical"), Severity::Critical);
        assert_eq!(Severity::normalize("HIGH"), Severity::High);
        assert_eq!(Severity::normalize(" Medium "), Severity::Medium);
        assert_eq!(Severity::normalize("low"), Severity::Low);
    }

    #[test]
    fn test_severity_normalize_unknown() {
        assert_eq!(Severity::normalize("n/a"), Severity::Unknown);
        assert_eq!(Severity::normalize(""), Severity::Unknown);
        assert_eq!(Severity::normalize("moderate"), Severity::Unknown);
        assert_eq!(Severity::normalize("CVSS:9.8"), Severity::Unknown);
    }

    #[test]
    fn test_severity_lossy_deserialization() {
        let finding: VulnerabilityFinding =
            serde_json::from_str(r#"{"id": "CVE-2024-0001", "severity": "n/a"}"#).unwrap();
        assert_eq!(finding.severity, Severity::Unknown);

        let finding: VulnerabilityFinding =
            serde_json::from_str(r#"{"id": "CVE-2024-0002", "severity": "Critical"}"#).unwrap();
        assert_eq!(finding.severity, Severity::Critical);
    }

    #[test]
    fn test_avg_throughput() {
        let mut ops = BTreeMap::new();
        ops.insert(
            "push".to_string(),
            OperationStats {
                throughput: 1000.0,
                variance: 0.1,
            },
        );
        ops.insert(
            "pull".to_string(),
            OperationStats {
                throughput: 3000.0,
                variance: 0.2,
            },
        );
        let result = BenchmarkResult::new("rails", ops);
        assert_eq!(result.avg_throughput(), Some(2000.0));
    }

    #[test]
    fn test_avg_throughput_empty() {
        let result = BenchmarkResult::new("rails", BTreeMap::new());
        assert_eq!(result.avg_throughput(), None);
    }

    #[test]
    fn test_severity_counts() {
        let findings = vec![
            VulnerabilityFinding {
                id: "CVE-1".into(),
                severity: Severity::Critical,
                affected_range: None,
                patched_range: None,
            },
            VulnerabilityFinding {
                id: "CVE-2".into(),
                severity: Severity::Medium,
                affected_range: None,
                patched_range: None,
            },
            VulnerabilityFinding {
                id: "CVE-2".into(), // duplicate ids are allowed
                severity: Severity::Medium,
                affected_range: None,
                patched_range: None,
            },
        ];
        let counts = SeverityCounts::from_findings(&findings);
        assert_eq!(counts.critical, 1);
        assert_eq!(counts.medium, 2);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_grade_boundaries() {
        let mut report = ScoreReport {
            package_name: "rails".into(),
            timestamp: Utc::now(),
            performance_score: Some(90),
            security_score: Some(90),
            overall_score: 90,
            recommendations: vec![],
        };
        assert_eq!(report.grade(), "A");
        report.overall_score = 89;
        assert_eq!(report.grade(), "B");
        report.overall_score = 59;
        assert_eq!(report.grade(), "F");
    }

    #[test]
    fn test_report_payload_omits_absent_scores() {
        let report = ScoreReport {
            package_name: "sinatra".into(),
            timestamp: Utc::now(),
            performance_score: None,
            security_score: Some(86),
            overall_score: 86,
            recommendations: vec!["Security: Low security risk - safe to use".into()],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("performance_score"));
        assert!(json.contains("\"security_score\":86"));
    }
}
