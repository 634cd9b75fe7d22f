//! Storage-specific error types for SQLite operations.
//!
//! These wrap Diesel and r2d2 errors and convert them to the database-agnostic
//! error types defined in `tradewise_core`.

use diesel::result::Error as DieselError;
use thiserror::Error;
use tradewise_core::errors::{DataSourceError, DatabaseError, Error};

/// Errors internal to the storage layer. They are converted to
/// `tradewise_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored row could not be mapped to its domain type.
    #[error("Malformed row in {table}: {message}")]
    MalformedRow { table: &'static str, message: String },
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::Io(e) => Error::Database(DatabaseError::Internal(e.to_string())),
            StorageError::MalformedRow { table, message } => {
                Error::DataSource(DataSourceError::Malformed {
                    source_name: table.to_string(),
                    message,
                })
            }
        }
    }
}

/// Extension trait for converting Diesel and r2d2 results to core results.
///
/// `From<DieselError> for Error` is not allowed by the orphan rules, so the
/// conversion goes through `StorageError`.
pub trait IntoCore<T> {
    fn into_core(self) -> tradewise_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> tradewise_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> tradewise_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_database_not_found() {
        let err: Error = StorageError::QueryFailed(DieselError::NotFound).into();
        assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
    }

    #[test]
    fn test_migration_failure_maps_to_database_error() {
        let err: Error = StorageError::MigrationFailed("table exists".to_string()).into();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::MigrationFailed(m)) if m == "table exists"
        ));
    }

    #[test]
    fn test_malformed_row_maps_to_data_source_error() {
        let err: Error = StorageError::MalformedRow {
            table: "treaty_destinations",
            message: "expected a JSON array".to_string(),
        }
        .into();
        match err {
            Error::DataSource(DataSourceError::Malformed { source_name, .. }) => {
                assert_eq!(source_name, "treaty_destinations");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
