//! API Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::StorageError;
use thiserror::Error;
use tracing::error;

/// Errors a request handler can return
#[derive(Debug, Error)]
pub enum ApiError {
    /// Store unreachable or statement rejected
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Storage(e) if e.is_connection() => error!("store unavailable: {}", e),
            ApiError::Storage(e) => error!("query failed: {}", e),
        }
        // No structured body, same as the framework default
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

/// Errors that stop the server from starting or running
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
