use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use taskboard_core::error::CoreError;

/// Message returned when no database connection can be obtained.
pub const DB_UNAVAILABLE_MESSAGE: &str =
    "Database connection failed. Please check your database configuration.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `taskboard_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store rejected a write (constraint violation, read-only file, ...).
    #[error("Unable to {action}: {source}")]
    Store {
        action: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// An unexpected sqlx failure while serving a request.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No connection could be acquired for this request.
    #[error("Database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The resource does not support the request method.
    #[error("Method not allowed")]
    MethodNotAllowed,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Build a mapper for errors raised by a write statement.
    ///
    /// Errors reported by the database engine itself become
    /// [`AppError::Store`] (503); anything else (I/O, protocol, decode)
    /// stays a [`AppError::Database`] (500).
    pub fn write_failed(action: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |err| match err {
            sqlx::Error::Database(_) => AppError::Store {
                action,
                source: err,
            },
            other => AppError::Database(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, "CONFLICT", msg.clone()),
            },

            // --- Storage errors ---
            AppError::Store { action, source } => {
                tracing::error!(error = %source, action, "Store rejected write");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_ERROR",
                    format!("Unable to {action}"),
                )
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error: the request could not be completed".to_string(),
                )
            }
            AppError::Unavailable(err) => {
                tracing::error!(error = %err, "Database unavailable");
                let body = json!({
                    "message": DB_UNAVAILABLE_MESSAGE,
                    "code": "DATABASE_UNAVAILABLE",
                    "error": "Connection error",
                });
                return (StatusCode::SERVICE_UNAVAILABLE, axum::Json(body)).into_response();
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                "Method not allowed".to_string(),
            ),
        };

        let body = json!({
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
