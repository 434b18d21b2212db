//! Route definitions for tasks.

use axum::routing::get;
use axum::Router;

use crate::handlers::{method_not_allowed, task};
use crate::state::AppState;

/// Routes for `/tasks`, merged under `/api`.
///
/// ```text
/// GET    -> get (list, ?category_id= filter, or one with ?id=)
/// POST   -> create
/// PUT    -> update (partial)
/// DELETE -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/tasks",
        get(task::get)
            .post(task::create)
            .put(task::update)
            .delete(task::delete)
            .fallback(method_not_allowed),
    )
}
