//! Error taxonomy of the account service and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure of an account operation.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Payload rejected by the validator.
    #[error("{0}")]
    Validation(String),

    /// Email already taken.
    #[error("User already exist")]
    Conflict,

    #[error("{0}")]
    NotFound(&'static str),

    /// Credentials did not match.
    #[error("Email/Password incorrect")]
    Auth,

    /// Caller lacks the capability for this operation.
    #[error("{0}")]
    Forbidden(&'static str),

    /// Store or credential failure; the cause is logged, never returned.
    #[error("Something went wrong, try again")]
    Transient(#[source] anyhow::Error),
}

impl AccountError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Auth => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Transient(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        if let Self::Transient(cause) = &self {
            tracing::error!(error = %cause, "account operation failed");
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Failure reported by an [`AccountStore`](crate::accounts::repo::AccountStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated")]
    UniqueViolation,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return Self::UniqueViolation;
            }
        }
        Self::Other(e.into())
    }
}

impl From<StoreError> for AccountError {
    fn from(e: StoreError) -> Self {
        Self::Transient(e.into())
    }
}
