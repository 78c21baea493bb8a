//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HomeDashError`] via `#[from]`.

use crate::rule::Field;

/// Top-level error crossing port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum HomeDashError {
    /// User input or a backend payload broke a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The backend does not know the requested resource.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The backend could not be reached or answered garbage.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A rule (or one of its parts) failed validation.
///
/// Every variant is recoverable: the caller re-prompts the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("rule name must not be empty")]
    EmptyName,

    /// The input could not be parsed or is outside its declared range.
    #[error("invalid {field} {value:?}: expected {expected}")]
    InvalidValue {
        field: Field,
        value: String,
        expected: String,
    },

    /// A field required by the selected type/command combination is absent.
    #[error("missing {field}")]
    MissingField { field: Field },

    /// The condition or action type tag is not recognised.
    #[error("unknown {field} {value:?}")]
    UnknownType { field: Field, value: String },
}

impl ValidationError {
    /// The form field the error points at, if any.
    #[must_use]
    pub fn field(&self) -> Field {
        match self {
            Self::EmptyName => Field::Name,
            Self::InvalidValue { field, .. }
            | Self::MissingField { field }
            | Self::UnknownType { field, .. } => *field,
        }
    }
}

/// The requested resource does not exist on the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
