//! Domain errors for the sigstats reconciliation pipeline.

use thiserror::Error;

/// Domain-level errors raised while reconciling a single record.
///
/// None of these abort a run on their own; the reconciler counts them and moves
/// on to the next record.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid creation timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Report write failed: {0}")]
    ReportWriteFailed(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<csv::Error> for DomainError {
    fn from(err: csv::Error) -> Self {
        DomainError::ReportWriteFailed(err.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::ReportWriteFailed(err.to_string())
    }
}
