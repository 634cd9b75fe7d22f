//! Core error types for the Tradewise engine.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.
//!
//! "No result" is never an error here: the classifier answers `Ok(None)` and a
//! ranking stream with nothing to rank is an empty list.

use std::num::ParseIntError;
use std::time::Duration;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Data source failed: {0}")]
    DataSource(#[from] DataSourceError),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Reference catalog error: {0}")]
    Catalog(String),

    #[error("Request did not complete within {0:?}")]
    Timeout(Duration),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

/// Validation errors for caller input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Expected a text query, got {0}")]
    NotAString(String),

    #[error("Query is longer than {max} characters")]
    QueryTooLong { max: usize },

    #[error("Malformed commodity code '{0}'")]
    MalformedCommodityCode(String),

    #[error("Failed to parse number: {0}")]
    NumberParse(#[from] ParseIntError),
}

/// Failure of one of the read collaborators feeding the ranking engine.
#[derive(Error, Debug)]
pub enum DataSourceError {
    /// The collaborator could not be reached.
    #[error("{source_name} is unavailable: {message}")]
    Unavailable {
        source_name: String,
        message: String,
    },

    /// The collaborator answered with data that could not be interpreted.
    #[error("{source_name} returned malformed data: {message}")]
    Malformed {
        source_name: String,
        message: String,
    },
}

/// Database-agnostic error type for storage operations.
///
/// The storage layer converts Diesel/r2d2 errors into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl From<ParseIntError> for Error {
    fn from(err: ParseIntError) -> Self {
        Error::Validation(ValidationError::NumberParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Catalog(err.to_string())
    }
}
