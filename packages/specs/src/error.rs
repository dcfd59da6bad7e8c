// ABOUTME: Error types for the specs package
// ABOUTME: Tagged variants for every failure the spec pipeline can produce

use thiserror::Error;

use crate::validator::FieldError;

#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Duplicate key: {0}")]
    Conflict(String),

    // Inner cause is for logging only; the display string is all a client
    // ever sees.
    #[error("Failed to generate product specification")]
    Generation(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpecError>;

impl From<sqlx::Error> for SpecError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return SpecError::Conflict(db_err.message().to_string());
            }
        }
        SpecError::Database(err)
    }
}

impl From<Vec<FieldError>> for SpecError {
    fn from(errors: Vec<FieldError>) -> Self {
        SpecError::Validation(errors)
    }
}
