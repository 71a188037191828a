//! Auth errors.

use thiserror::Error;
use tokio::task::JoinError;

use crate::{auth::Role, database::StoreError};

/// Failures of credential verification and role checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing or malformed bearer token")]
    MissingToken,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("identity carries no role")]
    MissingRole,

    #[error("role {actual} cannot perform an operation reserved to {required}")]
    Forbidden { required: Role, actual: Role },
}

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("user not found")]
    UserNotFound,

    #[error("wrong password")]
    WrongPassword,

    #[error("password hashing failed")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("token signing failed")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("password task failed")]
    Blocking(#[from] JoinError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
