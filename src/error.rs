//! Error types for the survey portal
//!
//! `SurveyError` covers everything the presentation layer has to show the
//! respondent. `CatalogError` covers problems with the catalog data itself,
//! which are caught once at startup.

use crate::survey::{QuestionId, StakeholderId};
use thiserror::Error;

/// Failures surfaced to the respondent. None of them are fatal and none of
/// them change session state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurveyError {
    #[error("Stakeholder {id} is not in the catalog")]
    InvalidStakeholder { id: StakeholderId },

    #[error("Question {question_id} is not assigned to {}", describe_context(.stakeholder_id))]
    InvalidQuestionForContext {
        question_id: QuestionId,
        stakeholder_id: Option<StakeholderId>,
    },

    #[error("Invalid maturity level '{value}' (expected 1, 2 or 3)")]
    InvalidMaturityLevel { value: String },

    #[error("No stakeholder selected")]
    NoActiveStakeholder,

    #[error(
        "Submission endpoint is not configured. Set it with 'survey-portal settings set-endpoint <URL>', \
         the SURVEY_SHEET_API_URL environment variable or --endpoint"
    )]
    MissingEndpointConfiguration,

    #[error("Submission error: {message}")]
    SubmissionTransportFailure { message: String },

    #[error("Submission rejected: {status} {status_text}")]
    SubmissionRejected { status: u16, status_text: String },
}

fn describe_context(stakeholder_id: &Option<StakeholderId>) -> String {
    match stakeholder_id {
        Some(id) => format!("stakeholder {}", id),
        None => "anyone (no stakeholder selected)".to_string(),
    }
}

impl SurveyError {
    /// Whether the error came from the submission call rather than local validation
    pub fn is_submission_failure(&self) -> bool {
        matches!(
            self,
            SurveyError::SubmissionTransportFailure { .. } | SurveyError::SubmissionRejected { .. }
        )
    }
}

/// Problems found while loading or validating a catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Failed to parse catalog: {message}")]
    Parse { message: String },

    #[error("Catalog defines no stakeholders")]
    NoStakeholders,

    #[error("Duplicate stakeholder id {id}")]
    DuplicateStakeholder { id: StakeholderId },

    #[error("Duplicate question id {id}")]
    DuplicateQuestion { id: QuestionId },

    #[error("Question {question_id} is assigned to unknown stakeholder {stakeholder_id}")]
    UnknownAssignee {
        question_id: QuestionId,
        stakeholder_id: StakeholderId,
    },

    #[error("Stakeholder {id} has a blank name")]
    BlankStakeholderName { id: StakeholderId },

    #[error("Question {id} has blank text")]
    BlankQuestionText { id: QuestionId },
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::Parse {
            message: err.to_string(),
        }
    }
}
