//! Storage Layer
//!
//! Read-only SQLite access to the climate observation store. The schema is
//! owned by whoever ingested the data; this crate only declares the columns it
//! reads and never writes.

mod models;
mod repository;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use models::{
    Observation, PrecipitationReading, Station, StationSummary, TemperatureReading,
    TemperatureStats,
};
pub use repository::Repository;

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Store unreachable, unreadable or the pool is gone
    #[error("Connection error: {0}")]
    Connection(String),
    /// The store rejected a statement
    #[error("Query error: {0}")]
    Query(String),
    /// A table the API reads from is not present in the store
    #[error("Missing table: {0}")]
    MissingTable(&'static str),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StorageError::Connection(err.to_string()),
            other => StorageError::Query(other.to_string()),
        }
    }
}

impl StorageError {
    /// True when the failure is about reaching the store rather than a statement
    pub fn is_connection(&self) -> bool {
        matches!(self, StorageError::Connection(_) | StorageError::MissingTable(_))
    }
}
