//! Custom error types for the common library
//!
//! This module defines the storage error type shared by every repository
//! implementation, whatever backs it.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// A write was rejected by a unique constraint
    #[error("Unique constraint violated: {constraint}")]
    Duplicate { constraint: String },

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// Classify a failed query, surfacing unique violations as [`DatabaseError::Duplicate`].
    pub fn from_query(err: SqlxError) -> Self {
        if let SqlxError::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or_default().to_string();
                return DatabaseError::Duplicate { constraint };
            }
        }

        DatabaseError::Query(err)
    }

    /// Name of the violated constraint, if this is a duplicate error
    pub fn violated_constraint(&self) -> Option<&str> {
        match self {
            DatabaseError::Duplicate { constraint } => Some(constraint),
            _ => None,
        }
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_stay_query_errors() {
        let err = DatabaseError::from_query(SqlxError::RowNotFound);
        assert!(matches!(err, DatabaseError::Query(SqlxError::RowNotFound)));
        assert_eq!(err.violated_constraint(), None);
    }

    #[test]
    fn duplicate_exposes_constraint_name() {
        let err = DatabaseError::Duplicate {
            constraint: "users_email_key".to_string(),
        };
        assert_eq!(err.violated_constraint(), Some("users_email_key"));
        assert_eq!(
            err.to_string(),
            "Unique constraint violated: users_email_key"
        );
    }
}
