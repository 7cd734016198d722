//! Registry sink
//!
//! Forwards persisted reports to the registry metrics endpoint as a plain
//! POST. Sync HTTP via ureq - one short-lived call per report, no event
//! loop. The timeout is bounded by config; callers treat any failure as a
//! forwarding failure, never as a report-generation failure.

use crate::error::{PipelineError, PipelineResult};
use crate::models::ScoreReport;
use std::time::Duration;
use tracing::debug;

pub struct RegistrySink {
    agent: ureq::Agent,
    url: String,
}

impl RegistrySink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self {
            agent,
            url: url.into(),
        }
    }

    /// POST the report payload; 2xx is success, anything else is a
    /// forwarding failure.
    pub fn forward(&self, report: &ScoreReport) -> PipelineResult<()> {
        debug!("Forwarding report for '{}' to {}", report.package_name, self.url);

        let response = self
            .agent
            .post(&self.url)
            .header("Content-Type", "application/json")
            .send_json(report)
            .map_err(|e| PipelineError::Forwarding(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(PipelineError::Forwarding(format!(
                "registry returned {status}"
            )))
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
