//! Category requests and validation.
//!
//! Wire structs keep every field optional so that a missing field reaches
//! [`validate`](CreateCategoryRequest::validate) and produces the documented
//! message rather than a generic body rejection.

use serde::Deserialize;

use crate::error::CoreError;
use crate::fields::{non_blank, require_id, RawId};
use crate::types::DbId;

pub const NAME_REQUIRED: &str = "Category name is required";
pub const ID_AND_NAME_REQUIRED: &str = "Category ID and name are required";
pub const ID_REQUIRED: &str = "Category ID is required";
pub const HAS_TASKS: &str = "Cannot delete category with existing tasks";

/// Maximum length of a category name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// `POST /categories` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
}

/// `PUT /categories` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    pub id: Option<RawId>,
    pub name: Option<String>,
}

/// A validated category insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

/// A validated rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameCategory {
    pub id: DbId,
    pub name: String,
}

impl CreateCategoryRequest {
    pub fn validate(&self) -> Result<NewCategory, CoreError> {
        let name = non_blank(self.name.as_deref())
            .ok_or_else(|| CoreError::Validation(NAME_REQUIRED.to_string()))?;
        validate_name_length(&name)?;
        Ok(NewCategory { name })
    }
}

impl UpdateCategoryRequest {
    pub fn validate(&self) -> Result<RenameCategory, CoreError> {
        let id = require_id(self.id.as_ref(), "id", ID_AND_NAME_REQUIRED)?;
        let name = non_blank(self.name.as_deref())
            .ok_or_else(|| CoreError::Validation(ID_AND_NAME_REQUIRED.to_string()))?;
        validate_name_length(&name)?;
        Ok(RenameCategory { id, name })
    }
}

fn validate_name_length(name: &str) -> Result<(), CoreError> {
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Category name must not exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}
