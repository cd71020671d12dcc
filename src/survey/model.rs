//! Survey session state
//!
//! `SurveyModel` pairs the shared catalog with the answers of the one
//! respondent currently filling in the survey. Every mutation is checked
//! against the questions assigned to the active stakeholder, so the answer
//! maps never hold entries for questions the respondent cannot see.

use super::catalog::{Catalog, Question, QuestionId, Stakeholder, StakeholderId};
use super::maturity::MaturityLevel;
use super::submission::SubmissionRecord;
use crate::error::SurveyError;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Session {
    active: Option<StakeholderId>,
    responses: HashMap<QuestionId, String>,
    maturity: HashMap<QuestionId, MaturityLevel>,
    notes: HashMap<QuestionId, String>,
}

impl Session {
    fn clear_answers(&mut self) {
        self.responses.clear();
        self.maturity.clear();
        self.notes.clear();
    }
}

#[derive(Debug, Clone)]
pub struct SurveyModel {
    catalog: Arc<Catalog>,
    session: Session,
}

impl SurveyModel {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            session: Session::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn list_stakeholders(&self) -> &[Stakeholder] {
        self.catalog.stakeholders()
    }

    /// Questions assigned to `stakeholder_id` in catalog order. Empty when
    /// nothing is assigned, including for ids outside the catalog.
    pub fn questions_for(&self, stakeholder_id: StakeholderId) -> Vec<&Question> {
        self.catalog.questions_for(stakeholder_id)
    }

    /// Make `id` the respondent and start from empty answers
    pub fn select_stakeholder(&mut self, id: StakeholderId) -> Result<(), SurveyError> {
        let stakeholder = self.catalog.stakeholder(id).ok_or_else(|| {
            warn!("Rejected unknown stakeholder {}", id);
            SurveyError::InvalidStakeholder { id }
        })?;

        info!("Selected stakeholder {} ({})", stakeholder.id, stakeholder.name);
        self.session.active = Some(id);
        self.session.clear_answers();
        Ok(())
    }

    pub fn active_stakeholder(&self) -> Option<&Stakeholder> {
        self.session
            .active
            .and_then(|id| self.catalog.stakeholder(id))
    }

    /// Questions visible to the active stakeholder, empty when nobody is selected
    pub fn assigned_questions(&self) -> Vec<&Question> {
        match self.session.active {
            Some(id) => self.catalog.questions_for(id),
            None => Vec::new(),
        }
    }

    pub fn set_response(&mut self, question_id: QuestionId, text: impl Into<String>) -> Result<(), SurveyError> {
        self.check_question(question_id)?;
        debug!("Set response for question {}", question_id);
        self.session.responses.insert(question_id, text.into());
        Ok(())
    }

    pub fn set_maturity(&mut self, question_id: QuestionId, level: u8) -> Result<(), SurveyError> {
        self.check_question(question_id)?;
        self.store_maturity(question_id, MaturityLevel::try_from(level)?);
        Ok(())
    }

    /// Like `set_maturity`, for levels that arrive as text (`"2"`). A blank
    /// value clears the level.
    pub fn set_maturity_text(&mut self, question_id: QuestionId, raw: &str) -> Result<(), SurveyError> {
        self.check_question(question_id)?;
        if raw.trim().is_empty() {
            self.session.maturity.remove(&question_id);
            return Ok(());
        }
        self.store_maturity(question_id, raw.parse()?);
        Ok(())
    }

    fn store_maturity(&mut self, question_id: QuestionId, level: MaturityLevel) {
        debug!("Set maturity {} for question {}", level, question_id);
        self.session.maturity.insert(question_id, level);
    }

    /// Put a question's maturity back to unanswered
    pub fn clear_maturity(&mut self, question_id: QuestionId) -> Result<(), SurveyError> {
        self.check_question(question_id)?;
        self.session.maturity.remove(&question_id);
        Ok(())
    }

    pub fn set_notes(&mut self, question_id: QuestionId, text: impl Into<String>) -> Result<(), SurveyError> {
        self.check_question(question_id)?;
        debug!("Set notes for question {}", question_id);
        self.session.notes.insert(question_id, text.into());
        Ok(())
    }

    pub fn response(&self, question_id: QuestionId) -> Option<&str> {
        self.session.responses.get(&question_id).map(String::as_str)
    }

    pub fn maturity(&self, question_id: QuestionId) -> Option<MaturityLevel> {
        self.session.maturity.get(&question_id).copied()
    }

    pub fn notes(&self, question_id: QuestionId) -> Option<&str> {
        self.session.notes.get(&question_id).map(String::as_str)
    }

    /// Number of assigned questions with a non-blank response
    pub fn answered_count(&self) -> usize {
        self.session
            .responses
            .values()
            .filter(|text| !text.trim().is_empty())
            .count()
    }

    /// One record per assigned question, all stamped with the current time
    pub fn build_submission(&self) -> Result<Vec<SubmissionRecord>, SurveyError> {
        self.build_submission_at(Utc::now())
    }

    /// Same as [`build_submission`](Self::build_submission) with a caller-supplied timestamp
    pub fn build_submission_at(&self, timestamp: DateTime<Utc>) -> Result<Vec<SubmissionRecord>, SurveyError> {
        let stakeholder = self
            .active_stakeholder()
            .ok_or(SurveyError::NoActiveStakeholder)?;

        let records: Vec<SubmissionRecord> = self
            .catalog
            .questions_for(stakeholder.id)
            .into_iter()
            .map(|question| SubmissionRecord {
                stakeholder_id: stakeholder.id,
                stakeholder_name: stakeholder.name.clone(),
                question_id: question.id,
                topic: question.topic.clone(),
                area: question.area.clone(),
                question_text: question.text.clone(),
                response: self.response(question.id).unwrap_or_default().to_string(),
                maturity: self.maturity(question.id),
                notes: self.notes(question.id).unwrap_or_default().to_string(),
                timestamp,
            })
            .collect();

        debug!(
            "Built submission of {} records for stakeholder {}",
            records.len(),
            stakeholder.id
        );
        Ok(records)
    }

    /// Forget the respondent and every answer
    pub fn reset_session(&mut self) {
        if let Some(id) = self.session.active {
            info!("Resetting session for stakeholder {}", id);
        }
        self.session = Session::default();
    }

    fn check_question(&self, question_id: QuestionId) -> Result<(), SurveyError> {
        let assigned = match self.session.active {
            Some(active) => self
                .catalog
                .question(question_id)
                .is_some_and(|q| q.is_assigned_to(active)),
            None => false,
        };

        if assigned {
            Ok(())
        } else {
            warn!(
                "Rejected answer for question {} (active stakeholder: {:?})",
                question_id, self.session.active
            );
            Err(SurveyError::InvalidQuestionForContext {
                question_id,
                stakeholder_id: self.session.active,
            })
        }
    }
}
