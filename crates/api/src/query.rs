//! Query parameter types for the collection endpoints.

use serde::Deserialize;
use taskboard_core::fields::RawId;

/// `GET /categories?id=`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub id: Option<RawId>,
}

/// `GET /tasks?id=` or `GET /tasks?category_id=`.
///
/// `id` wins when both are given.
#[derive(Debug, Default, Deserialize)]
pub struct TaskQuery {
    pub id: Option<RawId>,
    pub category_id: Option<RawId>,
}
