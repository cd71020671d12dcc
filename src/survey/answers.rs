//! Prepared answer sheets for non-interactive submission
//!
//! A sheet names the stakeholder and lists answers by question id. It is
//! applied through the model's setters so it gets the same validation as
//! answers typed at the prompt.

use super::catalog::{QuestionId, StakeholderId};
use super::model::SurveyModel;
use crate::error::SurveyError;
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSheet {
    pub stakeholder: StakeholderId,
    #[serde(default)]
    pub answers: Vec<AnswerEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub question: QuestionId,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub maturity: Option<MaturityInput>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A level written either as a number (`2`) or in wire form (`"2"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaturityInput {
    Number(i64),
    Text(String),
}

impl AnswerSheet {
    /// Read a sheet from a `.json` or `.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read answer sheet: {:?}", path))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let sheet: AnswerSheet = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse answer sheet: {:?}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse answer sheet: {:?}", path))?
        };

        info!(
            "Loaded answer sheet for stakeholder {} with {} answers",
            sheet.stakeholder,
            sheet.answers.len()
        );
        Ok(sheet)
    }

    /// Select the sheet's stakeholder and record every answer. Nothing is
    /// changed in `model` unless the whole sheet applies cleanly.
    pub fn apply(&self, model: &mut SurveyModel) -> Result<(), SurveyError> {
        let mut staged = model.clone();
        staged.select_stakeholder(self.stakeholder)?;

        for entry in &self.answers {
            if let Some(response) = &entry.response {
                staged.set_response(entry.question, response.as_str())?;
            }
            match &entry.maturity {
                Some(MaturityInput::Number(value)) => {
                    staged.set_maturity_text(entry.question, &value.to_string())?
                }
                Some(MaturityInput::Text(raw)) => staged.set_maturity_text(entry.question, raw)?,
                None => {}
            }
            if let Some(notes) = &entry.notes {
                staged.set_notes(entry.question, notes.as_str())?;
            }
        }

        *model = staged;
        Ok(())
    }
}
