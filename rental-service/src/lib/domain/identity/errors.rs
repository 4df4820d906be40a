use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for identity and authentication operations.
///
/// A closed set of variants so callers can match exhaustively on the
/// outcome. `Database` and `Timeout` are the transient class; everything
/// else is an expected business-rule failure.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Email is not registered: {0}")]
    EmailNotRegistered(String),

    #[error("Wrong email or password")]
    InsufficientCredential,

    #[error("Identity not found: {0}")]
    NotFound(i64),

    #[error("Role not found: {0}")]
    RoleNotFound(i64),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::TokenError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage deadline exceeded")]
    Timeout,
}
