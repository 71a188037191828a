//! Storage errors shared by the domain services.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// SQLSTATE raised when a called function does not exist.
pub(crate) const UNDEFINED_FUNCTION: &str = "42883";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record already exists")]
    AlreadyExists,

    #[error("record not found")]
    NotFound,

    #[error("related record not found")]
    InvalidReference,

    #[error("record is still referenced")]
    InUse,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("stored procedure {0} is not installed")]
    ProcedureNotFound(&'static str),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for StoreError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl StoreError {
    /// Reinterpret a foreign key violation raised by a `DELETE`.
    #[must_use]
    pub(crate) fn on_delete(self) -> Self {
        match self {
            Self::InvalidReference => Self::InUse,
            other => other,
        }
    }
}

pub(crate) fn is_undefined_function(error: &Error) -> bool {
    error
        .as_database_error()
        .and_then(DatabaseError::code)
        .is_some_and(|code| code == UNDEFINED_FUNCTION)
}
