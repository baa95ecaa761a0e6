//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ErrorBody;

/// Body text for every 404, whatever the underlying reason.
pub const NOT_FOUND_MESSAGE: &str = "Resource not found";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Entity, referenced entity or route missing. The detail is logged, never rendered.
    #[error("not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    /// Body over the configured limit.
    #[error("{0}")]
    PayloadTooLarge(String),
    /// Unique constraint violated on write. Rendered as 400.
    #[error("{0}")]
    Conflict(String),
    #[error("Failed to {operation}: {source}")]
    Internal {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("{}", METHOD_NOT_ALLOWED_MESSAGE)]
    MethodNotAllowed,
}

impl AppError {
    /// Maps a failed read to `Internal` tagged with the operation.
    pub fn read(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |source| AppError::Internal { operation, source }
    }

    /// Maps a failed write: unique violations become `Conflict(conflict)`, anything else `Internal`.
    pub fn write(operation: &'static str, conflict: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |source| {
            if is_unique_violation(&source) {
                tracing::debug!(error = %source, operation, "unique constraint violated");
                AppError::Conflict(conflict.to_string())
            } else {
                AppError::Internal { operation, source }
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::NotFound(detail) => {
                tracing::debug!(detail = %detail, "not found");
                NOT_FOUND_MESSAGE.to_string()
            }
            AppError::Internal { .. } => {
                tracing::error!(error = %self, "store failure");
                self.to_string()
            }
            _ => self.to_string(),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
