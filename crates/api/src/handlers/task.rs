//! Handlers for the `/tasks` resource.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use taskboard_core::error::CoreError;
use taskboard_core::fields::IdRequest;
use taskboard_core::task::{CreateTaskRequest, UpdateTaskRequest, ID_REQUIRED};
use taskboard_core::types::DbId;
use taskboard_db::models::task::Task;
use taskboard_db::repositories::TaskRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{DbConn, JsonBody, QueryParams};
use crate::query::TaskQuery;
use crate::response::{MessageResponse, TaskMutation};

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Task", id })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/tasks[?id=|?category_id=]
///
/// Fetch one task by `id`, or list tasks newest first, optionally filtered
/// by `category_id`. Every row carries the joined `category_name`.
pub async fn get(
    mut conn: DbConn,
    QueryParams(params): QueryParams<TaskQuery>,
) -> AppResult<Response> {
    let id = params
        .id
        .as_ref()
        .map(|raw| raw.to_lookup("id"))
        .transpose()?;

    if let Some(id) = id {
        let task = TaskRepo::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        return Ok(Json(task).into_response());
    }

    let category_id = params
        .category_id
        .as_ref()
        .map(|raw| raw.to_optional("category_id"))
        .transpose()?
        .flatten();

    let tasks: Vec<Task> = TaskRepo::list(&mut conn, category_id).await?;
    Ok(Json(tasks).into_response())
}

/// POST /api/tasks
///
/// Only `title` is required; the task starts incomplete.
pub async fn create(
    mut conn: DbConn,
    JsonBody(input): JsonBody<CreateTaskRequest>,
) -> AppResult<impl IntoResponse> {
    let input = input.validate()?;

    let task = TaskRepo::create(&mut conn, &input)
        .await
        .map_err(AppError::write_failed("create task"))?;

    tracing::info!(
        task_id = task.id,
        category_id = ?task.category_id,
        "Task created",
    );

    Ok((
        StatusCode::CREATED,
        Json(TaskMutation {
            message: "Task created successfully",
            task,
        }),
    ))
}

/// PUT /api/tasks
///
/// Partial update: only the fields present in the body change.
pub async fn update(
    mut conn: DbConn,
    JsonBody(input): JsonBody<UpdateTaskRequest>,
) -> AppResult<impl IntoResponse> {
    let (id, patch) = input.validate()?;

    let task = TaskRepo::update(&mut conn, id, &patch)
        .await
        .map_err(AppError::write_failed("update task"))?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        task_id = id,
        is_completed = task.is_completed,
        "Task updated",
    );

    Ok(Json(TaskMutation {
        message: "Task updated successfully",
        task,
    }))
}

/// DELETE /api/tasks
///
/// Body: `{ "id" }`.
pub async fn delete(
    mut conn: DbConn,
    JsonBody(input): JsonBody<IdRequest>,
) -> AppResult<impl IntoResponse> {
    let id = input.validate(ID_REQUIRED)?;

    let deleted = TaskRepo::delete(&mut conn, id)
        .await
        .map_err(AppError::write_failed("delete task"))?;
    if !deleted {
        return Err(not_found(id));
    }

    tracing::info!(task_id = id, "Task deleted");

    Ok(Json(MessageResponse {
        message: "Task deleted successfully",
    }))
}
