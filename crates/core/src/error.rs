//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// One variant per terminal failure a caller can observe. There is no
/// partial-success state anywhere: an operation returns a fully computed
/// result or exactly one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed or missing input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Registration against an email address that is already taken.
    #[error("email address already registered")]
    DuplicateEmail,

    /// Bearer token did not resolve to an account.
    #[error("invalid or expired token")]
    InvalidToken,

    /// The acting account is deactivated.
    #[error("account is deactivated")]
    AccountDisabled,

    /// The acting account lacks administrator rights.
    #[error("not authorized")]
    NotAuthorized,

    /// The referenced account does not exist.
    #[error("account not found")]
    AccountNotFound,

    /// The referenced purchase/deposit/config record does not exist.
    #[error("record not found")]
    RecordNotFound,

    /// Login attempted with a wrong password for a known email.
    #[error("password does not match")]
    BadCredential,

    /// Opaque persistence-collaborator fault; surfaced, never swallowed.
    #[error("storage failure: {0}")]
    Store(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
