use serde::Serialize;
use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};

/// A row from `tasks`, joined with the name of its category.
///
/// `category_name` is `None` when the task is uncategorized or points at a
/// category that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub category_name: Option<String>,
}
