//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Field-keyed validation messages for a login attempt.
///
/// One message per missing field, never a single generic message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Message for a missing username.
    pub username: Option<String>,
    /// Message for a missing password.
    pub password: Option<String>,
}

impl ValidationErrors {
    /// Returns `true` if no field failed validation.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed login input, keyed by field name.
    #[error("login validation failed")]
    Validation(ValidationErrors),

    /// Wrong password, unknown username, or inactive account. Deliberately
    /// one variant: the caller must not be able to tell these apart.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
