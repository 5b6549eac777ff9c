use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid log id: {0}")]
pub struct InvalidLogId(pub String);

/// Store-assigned identifier of a travel log, exposed to clients as `_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(Uuid);

impl LogId {
    /// Fresh identifier for a new record
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for LogId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for LogId {
    type Err = InvalidLogId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| InvalidLogId(s.to_string()))
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hyphenated_and_simple_forms() {
        let id: LogId = "7f1f3c1e-8f0e-4a3b-9a55-0c6e2d4b9f10".parse().unwrap();
        let simple: LogId = "7f1f3c1e8f0e4a3b9a550c6e2d4b9f10".parse().unwrap();
        assert_eq!(id, simple);
        assert_eq!(id.to_string(), "7f1f3c1e-8f0e-4a3b-9a55-0c6e2d4b9f10");
    }

    #[test]
    fn rejects_malformed_ids() {
        let err = "64b7f0c2a1".parse::<LogId>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid log id: 64b7f0c2a1");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(LogId::generate(), LogId::generate());
    }
}
