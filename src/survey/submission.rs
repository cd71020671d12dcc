use super::catalog::{QuestionId, StakeholderId};
use super::maturity::{self, MaturityLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One answered (or unanswered) question in a submission batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub stakeholder_id: StakeholderId,
    pub stakeholder_name: String,
    pub question_id: QuestionId,
    pub topic: String,
    pub area: String,
    pub question_text: String,
    pub response: String,
    #[serde(with = "maturity::optional_wire")]
    pub maturity: Option<MaturityLevel>,
    pub notes: String,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

/// ISO-8601 UTC with millisecond precision, e.g. `2026-10-18T09:30:00.123Z`
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
