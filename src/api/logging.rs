//! Structured logging with correlation tracking for submissions
//!
//! Each submission is logged as a small sequence of JSON events sharing one
//! correlation id, so a failed batch can be matched to whatever the
//! analytics endpoint recorded.

use log::{debug, error, info, log_enabled, trace, Level};
use serde_json::json;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Context for a single submission
#[derive(Debug, Clone)]
pub struct SubmissionContext {
    pub correlation_id: String,
    pub stakeholder_id: u32,
    pub record_count: usize,
    pub start_time: Instant,
}

impl SubmissionContext {
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionLogger;

impl SubmissionLogger {
    pub fn new() -> Self {
        Self
    }

    pub fn start(&self, stakeholder_id: u32, record_count: usize, endpoint: &str) -> SubmissionContext {
        let context = SubmissionContext {
            correlation_id: Uuid::new_v4().to_string(),
            stakeholder_id,
            record_count,
            start_time: Instant::now(),
        };

        let log_data = json!({
            "event": "submission_started",
            "correlation_id": context.correlation_id,
            "stakeholder_id": stakeholder_id,
            "record_count": record_count,
            "endpoint": redact_query(endpoint),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        info!("Submission Started: {}", log_data);

        context
    }

    /// Full request body, only written when the log filter allows trace
    pub fn log_payload(&self, context: &SubmissionContext, body: &str) {
        if !log_enabled!(Level::Trace) {
            return;
        }
        trace!(
            "Submission Payload [{}]: {}",
            context.correlation_id,
            body
        );
    }

    pub fn complete(&self, context: &SubmissionContext, status: u16) {
        let log_data = json!({
            "event": "submission_completed",
            "correlation_id": context.correlation_id,
            "stakeholder_id": context.stakeholder_id,
            "record_count": context.record_count,
            "status_code": status,
            "duration_ms": context.elapsed().as_millis(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        info!("Submission Completed: {}", log_data);
    }

    pub fn fail(&self, context: &SubmissionContext, status: Option<u16>, message: &str) {
        let log_data = json!({
            "event": "submission_failed",
            "correlation_id": context.correlation_id,
            "stakeholder_id": context.stakeholder_id,
            "record_count": context.record_count,
            "status_code": status,
            "error_message": message,
            "duration_ms": context.elapsed().as_millis(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        error!("Submission Failed: {}", log_data);
    }
}

/// Strip the query string, which often carries a deployment key
fn redact_query(endpoint: &str) -> String {
    match endpoint.split_once('?') {
        Some((base, _)) => {
            debug!("Redacted query string from endpoint in logs");
            format!("{}?[REDACTED]", base)
        }
        None => endpoint.to_string(),
    }
}
