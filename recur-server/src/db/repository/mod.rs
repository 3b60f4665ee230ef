//! Repository Module
//!
//! Tenant-scoped CRUD over the `tasks`, `tags` and `tasks_tags` tables.
//!
//! Every function that participates in a multi-statement operation takes a
//! `&mut SqliteConnection` so the caller decides the transaction scope (see
//! [`crate::db::tx::UnitOfWork`]). Only [`task_tag`] writes to `tasks_tags`.

pub mod completion;
pub mod full_data;
pub mod guard;
pub mod tag;
pub mod task;
pub mod task_tag;
pub mod user;

use shared::error::{AppError, ErrorCode};
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not found: {0}")]
    TaskNotFound(String),

    #[error("Not found: {0}")]
    TagNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unique violation: {0}")]
    UniqueViolation(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Not null violation: {0}")]
    NotNullViolation(String),

    #[error("Check violation: {0}")]
    CheckViolation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".into()),
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();
                match db_err.kind() {
                    ErrorKind::UniqueViolation => RepoError::UniqueViolation(msg),
                    ErrorKind::ForeignKeyViolation => RepoError::ForeignKeyViolation(msg),
                    ErrorKind::NotNullViolation => RepoError::NotNullViolation(msg),
                    ErrorKind::CheckViolation => RepoError::CheckViolation(msg),
                    _ => RepoError::Database(msg),
                }
            }
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::TaskNotFound(msg) => AppError::with_message(ErrorCode::TaskNotFound, msg),
            RepoError::TagNotFound(msg) => AppError::with_message(ErrorCode::TagNotFound, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::UniqueViolation(msg) => AppError::unique_violation(msg),
            RepoError::ForeignKeyViolation(msg) => AppError::foreign_key_violation(msg),
            RepoError::NotNullViolation(msg) => {
                AppError::with_message(ErrorCode::NotNullViolation, msg)
            }
            RepoError::CheckViolation(msg) => {
                AppError::with_message(ErrorCode::CheckViolation, msg)
            }
            RepoError::Database(msg) => {
                tracing::error!(target: "database", error = %msg, "Database error occurred");
                AppError::new(ErrorCode::Unknown)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_to_app_error() {
        let cases = [
            (RepoError::NotFound("x".into()), ErrorCode::NotFound),
            (RepoError::TaskNotFound("x".into()), ErrorCode::TaskNotFound),
            (RepoError::TagNotFound("x".into()), ErrorCode::TagNotFound),
            (RepoError::Validation("x".into()), ErrorCode::ValidationFailed),
            (RepoError::UniqueViolation("x".into()), ErrorCode::UniqueViolation),
            (
                RepoError::ForeignKeyViolation("x".into()),
                ErrorCode::ForeignKeyViolation,
            ),
            (
                RepoError::NotNullViolation("x".into()),
                ErrorCode::NotNullViolation,
            ),
            (RepoError::CheckViolation("x".into()), ErrorCode::CheckViolation),
            (RepoError::Database("x".into()), ErrorCode::Unknown),
        ];
        for (repo, code) in cases {
            let app: AppError = repo.into();
            assert_eq!(app.code, code);
        }
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: RepoError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
