//! Task requests, validation and the partial-update patch.

use serde::Deserialize;

use crate::error::CoreError;
use crate::fields::{deserialize_present, non_blank, present_text, require_id, RawFlag, RawId};
use crate::types::DbId;

pub const TITLE_REQUIRED: &str = "Task title is required";
pub const ID_REQUIRED: &str = "Task ID is required";
pub const NO_FIELDS: &str = "No fields to update";
pub const TITLE_BLANK: &str = "Task title must not be empty";

/// Maximum length of a task title, in characters.
pub const MAX_TITLE_LEN: usize = 255;

/// `POST /tasks` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<RawId>,
}

/// `PUT /tasks` body.
///
/// `description` and `category_id` distinguish an absent key (leave as is)
/// from an explicit `null` (clear the column).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub id: Option<RawId>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub category_id: Option<Option<RawId>>,
    pub is_completed: Option<RawFlag>,
}

/// A validated task insert. New tasks always start incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
}

/// A partial update: each `Some` field is written, each `None` is left alone.
///
/// Nullable columns use `Option<Option<_>>`, where `Some(None)` clears.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub category_id: Option<Option<DbId>>,
    pub is_completed: Option<bool>,
}

impl TaskPatch {
    /// A patch that only flips the completion flag.
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

impl CreateTaskRequest {
    pub fn validate(&self) -> Result<NewTask, CoreError> {
        let title = non_blank(self.title.as_deref())
            .ok_or_else(|| CoreError::Validation(TITLE_REQUIRED.to_string()))?;
        validate_title_length(&title)?;

        let category_id = match &self.category_id {
            Some(raw) => raw.to_optional("category_id")?,
            None => None,
        };

        Ok(NewTask {
            title,
            description: present_text(self.description.as_deref()),
            category_id,
        })
    }
}

impl UpdateTaskRequest {
    pub fn validate(&self) -> Result<(DbId, TaskPatch), CoreError> {
        let id = require_id(self.id.as_ref(), "id", ID_REQUIRED)?;

        let title = match &self.title {
            Some(t) => {
                let title = non_blank(Some(t.as_str()))
                    .ok_or_else(|| CoreError::Validation(TITLE_BLANK.to_string()))?;
                validate_title_length(&title)?;
                Some(title)
            }
            None => None,
        };

        let description = self
            .description
            .as_ref()
            .map(|d| present_text(d.as_deref()));

        let category_id = match &self.category_id {
            Some(Some(raw)) => Some(raw.to_optional("category_id")?),
            Some(None) => Some(None),
            None => None,
        };

        let is_completed = self
            .is_completed
            .as_ref()
            .map(|f| f.to_bool("is_completed"))
            .transpose()?;

        let patch = TaskPatch {
            title,
            description,
            category_id,
            is_completed,
        };

        if patch.is_empty() {
            return Err(CoreError::Validation(NO_FIELDS.to_string()));
        }

        Ok((id, patch))
    }
}

fn validate_title_length(title: &str) -> Result<(), CoreError> {
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Task title must not exceed {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}
