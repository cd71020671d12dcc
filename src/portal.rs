//! Submit flow tying the survey model to an endpoint
//!
//! The portal owns the session and decides what happens to it around a
//! submission: it is reset only after the endpoint accepted the batch, and
//! left exactly as it was on any failure so the respondent can retry.

use crate::api::{SubmissionReceipt, SubmissionTransport};
use crate::error::SurveyError;
use crate::survey::SurveyModel;
use anyhow::Context;
use log::{info, warn};

pub struct SurveyPortal<T: SubmissionTransport> {
    model: SurveyModel,
    endpoint: Option<String>,
    transport: T,
}

impl<T: SubmissionTransport> SurveyPortal<T> {
    pub fn new(model: SurveyModel, endpoint: Option<String>, transport: T) -> Self {
        let endpoint = endpoint.filter(|url| !url.trim().is_empty());
        if endpoint.is_none() {
            warn!("No submission endpoint configured, submissions will be refused");
        }
        Self {
            model,
            endpoint,
            transport,
        }
    }

    pub fn model(&self) -> &SurveyModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut SurveyModel {
        &mut self.model
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send the active stakeholder's answers and reset the session once the
    /// endpoint accepts them
    pub async fn submit(&mut self) -> Result<SubmissionReceipt, SurveyError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(SurveyError::MissingEndpointConfiguration)?;

        let batch = self.model.build_submission()?;
        let receipt = self.transport.send(endpoint, &batch).await?;

        info!(
            "Submitted {} records (correlation id {})",
            receipt.record_count, receipt.correlation_id
        );
        self.model.reset_session();
        Ok(receipt)
    }

    /// The batch `submit` would send, as pretty-printed JSON
    pub fn preview(&self) -> anyhow::Result<String> {
        let batch = self.model.build_submission()?;
        serde_json::to_string_pretty(&batch).context("Failed to serialize submission preview")
    }
}
