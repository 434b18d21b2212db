pub mod category;
pub mod health;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories      GET, POST, PUT, DELETE
/// /tasks           GET, POST, PUT, DELETE
/// ```
///
/// Any other method on these paths answers 405.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(category::router())
        .merge(task::router())
}
