pub mod assignments;
pub mod audit;
pub mod employees;
pub mod geofences;
pub mod initialize;
pub mod migrate;
pub mod pool;
pub mod sessions;
pub mod summary;
pub mod trail;

use crate::errors::AppError;
use rusqlite::ErrorCode;

/// Map a UNIQUE-constraint violation to `Conflict`; pass everything else
/// through as a database error.
pub(crate) fn conflict_on_unique(e: rusqlite::Error, what: &str) -> AppError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == ErrorCode::ConstraintViolation =>
        {
            AppError::Conflict(what.to_string())
        }
        _ => AppError::Db(e),
    }
}
