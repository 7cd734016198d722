//! Error taxonomy for the scoring pipeline
//!
//! Four domain errors plus the usual io/serde passthroughs:
//! - `Validation` - malformed input to a store write; caller must fix and resubmit
//! - `NotFound` - no result exists for a package/dimension; the scoring
//!   engine recovers from this locally unless both dimensions are absent
//! - `InsufficientData` - report generation had nothing to score
//! - `Forwarding` - the registry sink call failed or timed out; non-fatal
//!   for an otherwise successful report generation

use thiserror::Error;

/// Errors that can occur in the metrics pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("no {dimension} results for package '{package}'")]
    NotFound {
        package: String,
        dimension: &'static str,
    },

    #[error("insufficient data to score package '{0}': no benchmark or scan results")]
    InsufficientData(String),

    #[error("forwarding to registry failed: {0}")]
    Forwarding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// True if this error means "no data", which callers recover from locally.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PipelineError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = PipelineError::NotFound {
            package: "rails".into(),
            dimension: "benchmark",
        };
        assert_eq!(err.to_string(), "no benchmark results for package 'rails'");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation_display() {
        let err = PipelineError::Validation("negative throughput for operation 'push'".into());
        assert!(err.to_string().contains("negative throughput"));
        assert!(!err.is_not_found());
    }
}
