//! Product domain errors

use thiserror::Error;

use super::schema::Violation;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("invalid input: {}", .0.msg)]
    Validation(Violation),

    #[error("product not found")]
    NotFound,

    #[error("product already exists")]
    Conflict,

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Maps a write failure, turning a `header` uniqueness violation into
/// [`ProductError::Conflict`].
pub(crate) fn map_write_error(err: sqlx::Error) -> ProductError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => ProductError::Conflict,
        _ => ProductError::Storage(err),
    }
}
