//! Repository for the `tasks` table.
//!
//! Every read joins `categories` so callers always get `category_name`.

use sqlx::{QueryBuilder, Sqlite};
use taskboard_core::task::{NewTask, TaskPatch};
use taskboard_core::types::DbId;

use crate::models::task::Task;
use crate::DbConnection;

/// Joined select shared by every read.
const SELECT_JOINED: &str = "\
    SELECT t.id, t.title, t.description, t.category_id, t.is_completed, t.created_at, \
           c.name AS category_name \
    FROM tasks t \
    LEFT JOIN categories c ON c.id = t.category_id";

/// Newest first; `id` breaks ties between rows created in the same instant.
const ORDER_NEWEST_FIRST: &str = "ORDER BY t.created_at DESC, t.id DESC";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// List tasks newest first, optionally restricted to one category.
    pub async fn list(
        conn: &mut DbConnection,
        category_id: Option<DbId>,
    ) -> Result<Vec<Task>, sqlx::Error> {
        match category_id {
            Some(category_id) => {
                let query =
                    format!("{SELECT_JOINED} WHERE t.category_id = ? {ORDER_NEWEST_FIRST}");
                sqlx::query_as::<_, Task>(&query)
                    .bind(category_id)
                    .fetch_all(&mut *conn)
                    .await
            }
            None => {
                let query = format!("{SELECT_JOINED} {ORDER_NEWEST_FIRST}");
                sqlx::query_as::<_, Task>(&query)
                    .fetch_all(&mut *conn)
                    .await
            }
        }
    }

    /// Find a task by its ID.
    pub async fn find_by_id(
        conn: &mut DbConnection,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("{SELECT_JOINED} WHERE t.id = ?");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Insert a new, incomplete task and return the joined row.
    pub async fn create(conn: &mut DbConnection, input: &NewTask) -> Result<Task, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO tasks (title, description, category_id, is_completed) \
             VALUES (?, ?, ?, 0) \
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.category_id)
        .fetch_one(&mut *conn)
        .await?;

        Self::find_by_id(conn, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Apply a partial update. Only the fields present in `patch` are written.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut DbConnection,
        id: DbId,
        patch: &TaskPatch,
    ) -> Result<Option<Task>, sqlx::Error> {
        if patch.is_empty() {
            return Self::find_by_id(conn, id).await;
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE tasks SET ");
        let mut set = builder.separated(", ");
        if let Some(title) = &patch.title {
            set.push("title = ").push_bind_unseparated(title.as_str());
        }
        if let Some(description) = &patch.description {
            set.push("description = ")
                .push_bind_unseparated(description.as_deref());
        }
        if let Some(category_id) = patch.category_id {
            set.push("category_id = ").push_bind_unseparated(category_id);
        }
        if let Some(is_completed) = patch.is_completed {
            set.push("is_completed = ").push_bind_unseparated(is_completed);
        }
        builder.push(" WHERE id = ").push_bind(id);

        let result = builder.build().execute(&mut *conn).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Self::find_by_id(conn, id).await
    }

    /// Delete a task. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut DbConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
