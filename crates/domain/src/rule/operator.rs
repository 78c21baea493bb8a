//! Comparison operator shared by every condition type.

use std::fmt;

use crate::error::ValidationError;

use super::fields::Field;

/// How a condition compares the sensor reading with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

impl Operator {
    pub const ALL: [Self; 6] = [Self::Eq, Self::Ne, Self::Gt, Self::Lt, Self::Ge, Self::Le];

    /// Wire symbol, e.g. `>=`.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
        }
    }

    /// Words used in descriptions, e.g. `is greater than or equal to`.
    #[must_use]
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Eq => "equals",
            Self::Ne => "does not equal",
            Self::Gt => "is greater than",
            Self::Lt => "is less than",
            Self::Ge => "is greater than or equal to",
            Self::Le => "is less than or equal to",
        }
    }

    /// Parse a wire symbol.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for blank input and
    /// [`ValidationError::InvalidValue`] for anything but the six symbols.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingField {
                field: Field::Operator,
            });
        }
        Self::ALL
            .into_iter()
            .find(|op| op.symbol() == trimmed)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: Field::Operator,
                value: raw.to_string(),
                expected: "one of ==, !=, >, <, >=, <=".to_string(),
            })
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
