//! Typed identifier for rules.
//!
//! The backend assigns identifiers (e.g. `rule1`) and the client treats
//! them as opaque strings: they are never generated or mutated here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::rule::Field;

/// Unique identifier for a [`Rule`](crate::rule::Rule), assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    /// Wrap an identifier received from the backend.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RuleId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingField { field: Field::Id });
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = RuleId::new("rule1");
        let parsed: RuleId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let json = serde_json::to_string(&RuleId::new("rule2")).unwrap();
        assert_eq!(json, "\"rule2\"");
    }

    #[test]
    fn should_return_error_when_parsing_blank_id() {
        let result = RuleId::from_str("   ");
        assert_eq!(
            result,
            Err(ValidationError::MissingField { field: Field::Id })
        );
    }
}
