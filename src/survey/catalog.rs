//! Static stakeholder and question catalog
//!
//! The catalog is loaded once at startup and shared read-only with the
//! survey model. Catalog order is the display order everywhere.

use crate::error::CatalogError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::Path;

/// Catalog bundled into the binary, used when no catalog file is configured
const BUILTIN_CATALOG: &str = include_str!("../../catalog/clinic.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StakeholderId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl fmt::Display for StakeholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stakeholder {
    pub id: StakeholderId,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub id: QuestionId,
    pub assigned_to: BTreeSet<StakeholderId>,
    pub topic: String,
    pub area: String,
    pub text: String,
}

impl Question {
    pub fn is_assigned_to(&self, stakeholder_id: StakeholderId) -> bool {
        self.assigned_to.contains(&stakeholder_id)
    }
}

/// Validated, immutable catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    stakeholders: Vec<Stakeholder>,
    questions: Vec<Question>,
}

/// Canonical on-disk shape: stakeholders plus questions with assignment sets
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AssignedFile {
    stakeholders: Vec<Stakeholder>,
    #[serde(default)]
    questions: Vec<Question>,
}

/// Older per-role question list, converted on load
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoleTableFile {
    roles: Vec<RoleEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleEntry {
    pub name: String,
    #[serde(default)]
    pub questions: Vec<String>,
}

impl Catalog {
    /// Build a catalog from parts, checking ids and assignments
    pub fn new(stakeholders: Vec<Stakeholder>, questions: Vec<Question>) -> Result<Self, CatalogError> {
        if stakeholders.is_empty() {
            return Err(CatalogError::NoStakeholders);
        }

        let mut seen_stakeholders = HashSet::new();
        for stakeholder in &stakeholders {
            if !seen_stakeholders.insert(stakeholder.id) {
                return Err(CatalogError::DuplicateStakeholder { id: stakeholder.id });
            }
            if stakeholder.name.trim().is_empty() {
                return Err(CatalogError::BlankStakeholderName { id: stakeholder.id });
            }
        }

        let mut seen_questions = HashSet::new();
        for question in &questions {
            if !seen_questions.insert(question.id) {
                return Err(CatalogError::DuplicateQuestion { id: question.id });
            }
            if question.text.trim().is_empty() {
                return Err(CatalogError::BlankQuestionText { id: question.id });
            }
            if let Some(unknown) = question
                .assigned_to
                .iter()
                .find(|id| !seen_stakeholders.contains(*id))
            {
                return Err(CatalogError::UnknownAssignee {
                    question_id: question.id,
                    stakeholder_id: *unknown,
                });
            }
        }

        debug!(
            "Validated catalog with {} stakeholders and {} questions",
            stakeholders.len(),
            questions.len()
        );

        Ok(Self {
            stakeholders,
            questions,
        })
    }

    /// The clinic catalog shipped with the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse either file shape. The shape is picked from the top-level keys
    /// first, so field errors point at the offending line.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let table: toml::Table = toml::from_str(content)?;

        if table.contains_key("roles") {
            let file: RoleTableFile = toml::from_str(content)?;
            Self::from_role_table(file.roles)
        } else {
            let file: AssignedFile = toml::from_str(content)?;
            Self::new(file.stakeholders, file.questions)
        }
    }

    /// Load a catalog file from disk
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
        let catalog = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid catalog file: {:?}", path))?;

        info!(
            "Loaded catalog from {:?} ({} stakeholders, {} questions)",
            path,
            catalog.stakeholders.len(),
            catalog.questions.len()
        );
        Ok(catalog)
    }

    /// Convert a role-keyed question table into the assignment-set shape.
    ///
    /// Each role becomes one stakeholder and each of its questions is
    /// assigned to that stakeholder only. Ids are handed out from 1 in
    /// table order.
    pub fn from_role_table(roles: Vec<RoleEntry>) -> Result<Self, CatalogError> {
        let mut stakeholders = Vec::with_capacity(roles.len());
        let mut questions = Vec::new();
        let mut next_question = 1;

        for (index, role) in roles.into_iter().enumerate() {
            let stakeholder_id = StakeholderId(index as u32 + 1);

            for text in role.questions {
                questions.push(Question {
                    id: QuestionId(next_question),
                    assigned_to: BTreeSet::from([stakeholder_id]),
                    topic: "General".to_string(),
                    area: role.name.clone(),
                    text,
                });
                next_question += 1;
            }

            stakeholders.push(Stakeholder {
                id: stakeholder_id,
                role: role.name.clone(),
                name: role.name,
            });
        }

        Self::new(stakeholders, questions)
    }

    pub fn stakeholders(&self) -> &[Stakeholder] {
        &self.stakeholders
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn stakeholder(&self, id: StakeholderId) -> Option<&Stakeholder> {
        self.stakeholders.iter().find(|s| s.id == id)
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Questions assigned to a stakeholder, in catalog order
    pub fn questions_for(&self, stakeholder_id: StakeholderId) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.is_assigned_to(stakeholder_id))
            .collect()
    }

    /// Stakeholders with nothing to answer
    pub fn unassigned_stakeholders(&self) -> Vec<&Stakeholder> {
        self.stakeholders
            .iter()
            .filter(|s| !self.questions.iter().any(|q| q.is_assigned_to(s.id)))
            .collect()
    }
}
