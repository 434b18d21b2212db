//! Handlers for the `/categories` resource.
//!
//! A category cannot be deleted while tasks reference it; the guard lives in
//! [`CategoryRepo::delete`] and surfaces here as a conflict.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use taskboard_core::category::{
    CreateCategoryRequest, UpdateCategoryRequest, HAS_TASKS, ID_REQUIRED,
};
use taskboard_core::error::CoreError;
use taskboard_core::fields::IdRequest;
use taskboard_db::repositories::{CategoryDeletion, CategoryRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{DbConn, JsonBody, QueryParams};
use crate::query::CategoryQuery;
use crate::response::{CategoryMutation, MessageResponse};

/// GET /api/categories[?id=]
///
/// List all categories by name, or fetch one when `id` is given.
pub async fn get(
    mut conn: DbConn,
    QueryParams(params): QueryParams<CategoryQuery>,
) -> AppResult<Response> {
    let id = params
        .id
        .as_ref()
        .map(|raw| raw.to_lookup("id"))
        .transpose()?;

    match id {
        Some(id) => {
            let category = CategoryRepo::find_by_id(&mut conn, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Category",
                    id,
                }))?;
            Ok(Json(category).into_response())
        }
        None => {
            let categories = CategoryRepo::list(&mut conn).await?;
            Ok(Json(categories).into_response())
        }
    }
}

/// POST /api/categories
pub async fn create(
    mut conn: DbConn,
    JsonBody(input): JsonBody<CreateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let input = input.validate()?;

    let category = CategoryRepo::create(&mut conn, &input)
        .await
        .map_err(AppError::write_failed("create category"))?;

    tracing::info!(category_id = category.id, name = %category.name, "Category created");

    Ok((
        StatusCode::CREATED,
        Json(CategoryMutation {
            message: "Category created successfully",
            id: category.id,
            name: category.name,
        }),
    ))
}

/// PUT /api/categories
///
/// Rename a category. Body: `{ "id", "name" }`.
pub async fn update(
    mut conn: DbConn,
    JsonBody(input): JsonBody<UpdateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let input = input.validate()?;

    let category = CategoryRepo::rename(&mut conn, &input)
        .await
        .map_err(AppError::write_failed("update category"))?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: input.id,
        }))?;

    tracing::info!(category_id = category.id, name = %category.name, "Category renamed");

    Ok(Json(CategoryMutation {
        message: "Category updated successfully",
        id: category.id,
        name: category.name,
    }))
}

/// DELETE /api/categories
///
/// Body: `{ "id" }`. Refused while any task references the category.
pub async fn delete(
    mut conn: DbConn,
    JsonBody(input): JsonBody<IdRequest>,
) -> AppResult<impl IntoResponse> {
    let id = input.validate(ID_REQUIRED)?;

    let outcome = CategoryRepo::delete(&mut conn, id)
        .await
        .map_err(AppError::write_failed("delete category"))?;

    match outcome {
        CategoryDeletion::Deleted => {
            tracing::info!(category_id = id, "Category deleted");
            Ok(Json(MessageResponse {
                message: "Category deleted successfully",
            }))
        }
        CategoryDeletion::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        })),
        CategoryDeletion::InUse { task_count } => {
            tracing::info!(category_id = id, task_count, "Category delete refused");
            Err(AppError::Core(CoreError::Conflict(HAS_TASKS.to_string())))
        }
    }
}
