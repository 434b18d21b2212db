//! Request handlers.
//!
//! Each submodule provides async handler functions (get, create, update,
//! delete) for one resource. Handlers validate the typed request, delegate
//! to the matching repository in `taskboard_db` and map errors via
//! [`AppError`].

pub mod category;
pub mod task;

use crate::error::AppError;

/// Fallback for any method a resource does not implement.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
