//! Survey catalog, session model and submission payload

pub mod answers;
pub mod catalog;
pub mod maturity;
pub mod model;
pub mod submission;

pub use answers::{AnswerEntry, AnswerSheet, MaturityInput};
pub use catalog::{Catalog, Question, QuestionId, RoleEntry, Stakeholder, StakeholderId};
pub use maturity::MaturityLevel;
pub use model::SurveyModel;
pub use submission::SubmissionRecord;
