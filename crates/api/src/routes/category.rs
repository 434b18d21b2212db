//! Route definitions for categories.

use axum::routing::get;
use axum::Router;

use crate::handlers::{category, method_not_allowed};
use crate::state::AppState;

/// Routes for `/categories`, merged under `/api`.
///
/// Ids travel in the query string (GET) or the JSON body (PUT, DELETE).
///
/// ```text
/// GET    -> get (list, or one with ?id=)
/// POST   -> create
/// PUT    -> update
/// DELETE -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/categories",
        get(category::get)
            .post(category::create)
            .put(category::update)
            .delete(category::delete)
            .fallback(method_not_allowed),
    )
}
