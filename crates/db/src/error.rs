//! Translation of sqlx failures into [`CoreError`].
//!
//! - Foreign-key violations on a child insert mean the parent is missing.
//! - Unique violations on a `uq_` constraint map to `Conflict`.
//! - Everything else is wrapped as `Storage`, keeping the sqlx error as source.

use scenaria_core::error::CoreError;
use scenaria_core::types::DbId;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Name of the unique constraint `err` violated, if any.
pub fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            Some(db_err.constraint().unwrap_or("unknown").to_string())
        }
        _ => None,
    }
}

pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
    )
}

fn classify(operation: &'static str, err: sqlx::Error) -> CoreError {
    if let Some(constraint) = unique_violation(&err) {
        if constraint.starts_with("uq_") {
            return CoreError::Conflict(format!(
                "Duplicate value violates unique constraint: {constraint}"
            ));
        }
    }
    CoreError::storage(operation, err)
}

/// Map any sqlx error raised while performing `operation`.
pub fn storage(operation: &'static str) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |err| classify(operation, err)
}

/// Map errors of an insert whose foreign key points at `parent` with `parent_id`.
pub fn child_insert(
    operation: &'static str,
    parent: &'static str,
    parent_id: DbId,
) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |err| {
        if is_foreign_key_violation(&err) {
            CoreError::NotFound {
                entity: parent,
                id: parent_id,
            }
        } else {
            classify(operation, err)
        }
    }
}
