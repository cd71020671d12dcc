use super::constants::{self, headers};
use super::logging::SubmissionLogger;
use crate::error::SurveyError;
use crate::survey::SubmissionRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::time::Duration;

/// Outcome of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub correlation_id: String,
    pub status: u16,
    pub record_count: usize,
}

/// Something that can deliver a submission batch to an endpoint
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn send(&self, endpoint: &str, batch: &[SubmissionRecord]) -> Result<SubmissionReceipt, SurveyError>;
}

/// HTTP client posting submission batches as JSON
pub struct SubmissionClient {
    http_client: reqwest::Client,
    logger: SubmissionLogger,
}

impl SubmissionClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let connect_timeout = timeout.min(Duration::from_secs(constants::CONNECT_TIMEOUT_SECS));
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(constants::USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_custom_client(http_client))
    }

    /// Create a client around an existing HTTP client configuration
    pub fn with_custom_client(http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            logger: SubmissionLogger::new(),
        }
    }
}

#[async_trait]
impl SubmissionTransport for SubmissionClient {
    async fn send(&self, endpoint: &str, batch: &[SubmissionRecord]) -> Result<SubmissionReceipt, SurveyError> {
        let stakeholder_id = batch.first().map(|r| r.stakeholder_id.0).unwrap_or_default();
        let context = self.logger.start(stakeholder_id, batch.len(), endpoint);

        let body = serde_json::to_string(batch).map_err(|e| {
            let message = format!("failed to encode submission: {}", e);
            self.logger.fail(&context, None, &message);
            SurveyError::SubmissionTransportFailure { message }
        })?;
        self.logger.log_payload(&context, &body);

        let response = self
            .http_client
            .post(endpoint.trim())
            .header(reqwest::header::CONTENT_TYPE, headers::CONTENT_TYPE_JSON)
            .header(headers::CORRELATION_ID, context.correlation_id.as_str())
            .body(body)
            .send()
            .await
            .map_err(|e| {
                let message = describe_transport_error(&e);
                self.logger.fail(&context, None, &message);
                SurveyError::SubmissionTransportFailure { message }
            })?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string());
            self.logger.fail(&context, Some(status.as_u16()), &status_text);
            return Err(SurveyError::SubmissionRejected {
                status: status.as_u16(),
                status_text,
            });
        }

        debug!("Endpoint accepted submission with status {}", status);
        self.logger.complete(&context, status.as_u16());

        Ok(SubmissionReceipt {
            correlation_id: context.correlation_id,
            status: status.as_u16(),
            record_count: batch.len(),
        })
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("could not connect to endpoint: {}", err)
    } else if err.is_builder() {
        format!("invalid endpoint: {}", err)
    } else {
        err.to_string()
    }
}
