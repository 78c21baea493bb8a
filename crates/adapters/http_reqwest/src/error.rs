//! HTTP adapter error types.

use homedash_domain::error::{HomeDashError, NotFoundError};
use homedash_domain::id::RuleId;
use homedash_domain::rule::wire::ParseRuleError;
use reqwest::StatusCode;

/// Errors specific to the HTTP adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The configured base URL is not a usable `http(s)` URL.
    #[error("invalid backend URL")]
    InvalidUrl(#[source] url::ParseError),

    /// The reqwest client could not be built.
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),

    /// The request never got a response, or the body could not be read.
    #[error("request to backend failed")]
    Request(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("backend answered {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// The response body is not the JSON the endpoint promises.
    #[error("unexpected response body")]
    Body(#[source] serde_json::Error),

    /// The backend answered 2xx with `{"success": false}`.
    #[error("backend rejected the command: {message}")]
    Rejected { message: String },

    /// The backend sent a rule that breaks a domain invariant.
    #[error("backend sent an invalid rule")]
    InvalidRule(#[source] ParseRuleError),

    /// A domain-level error (validation, not-found, etc.).
    #[error("domain error")]
    Domain(#[source] HomeDashError),
}

impl HttpError {
    /// Turn a 404 answer for `id` into [`HomeDashError::NotFound`].
    #[must_use]
    pub fn rule_not_found(self, id: &RuleId) -> Self {
        match self {
            Self::Status {
                status: StatusCode::NOT_FOUND,
                ..
            } => Self::Domain(
                NotFoundError {
                    entity: "Rule",
                    id: id.to_string(),
                }
                .into(),
            ),
            other => other,
        }
    }

    /// Whether the backend answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Status {
                status: StatusCode::NOT_FOUND,
                ..
            }
        )
    }

    /// Convert into a [`HomeDashError`] for propagation across port
    /// boundaries.
    pub fn into_domain(self) -> HomeDashError {
        match self {
            Self::Domain(err) => err,
            Self::InvalidRule(ParseRuleError::Invalid(err)) => HomeDashError::Validation(err),
            other => HomeDashError::Transport(Box::new(other)),
        }
    }
}

impl From<HttpError> for HomeDashError {
    fn from(err: HttpError) -> Self {
        err.into_domain()
    }
}
