//! Wire types exchanged with the taskboard API.

use serde::{Deserialize, Serialize};
use taskboard_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
}

/// A task as returned by the server, with its category name joined in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub category_name: Option<String>,
}

/// Body for `POST /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<DbId>,
}

/// Changes for `PUT /tasks`. Absent fields are left untouched by the
/// server; `Some(None)` is sent as `null` and clears the column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<DbId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl TaskEdit {
    pub fn completion(is_completed: bool) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.is_completed.is_none()
    }
}

/// `{message, id, name}` returned by category create and rename.
#[derive(Debug, Deserialize)]
pub(crate) struct CategoryMutation {
    pub id: DbId,
    pub name: String,
}

/// `{message, task}` returned by task create and update.
#[derive(Debug, Deserialize)]
pub(crate) struct TaskMutation {
    pub task: Task,
}

/// The error body every failed request carries.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}
