use crate::error::SurveyError;
use serde::{Deserialize, Deserializer, Serializer};
use std::fmt;
use std::str::FromStr;

/// Three-step rating of how far a control is implemented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaturityLevel {
    NotImplemented = 1,
    Partial = 2,
    Full = 3,
}

impl MaturityLevel {
    pub const ALL: [MaturityLevel; 3] = [
        MaturityLevel::NotImplemented,
        MaturityLevel::Partial,
        MaturityLevel::Full,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            MaturityLevel::NotImplemented => "Not Implemented",
            MaturityLevel::Partial => "Partial",
            MaturityLevel::Full => "Full",
        }
    }
}

impl TryFrom<u8> for MaturityLevel {
    type Error = SurveyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MaturityLevel::NotImplemented),
            2 => Ok(MaturityLevel::Partial),
            3 => Ok(MaturityLevel::Full),
            other => Err(SurveyError::InvalidMaturityLevel {
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for MaturityLevel {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SurveyError::InvalidMaturityLevel {
            value: s.to_string(),
        };
        let value = s.trim().parse::<u8>().map_err(|_| invalid())?;
        MaturityLevel::try_from(value).map_err(|_| invalid())
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Wire form of an optional level: `"1"`, `"2"`, `"3"` or `""` when unanswered
pub mod optional_wire {
    use super::*;

    pub fn serialize<S: Serializer>(level: &Option<MaturityLevel>, serializer: S) -> Result<S::Ok, S::Error> {
        match level {
            Some(level) => serializer.serialize_str(&level.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<MaturityLevel>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(serde::de::Error::custom)
    }
}
