//! Repository for the `categories` table.

use sqlx::Connection;
use taskboard_core::category::{NewCategory, RenameCategory};
use taskboard_core::types::DbId;

use crate::models::category::Category;
use crate::DbConnection;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name";

/// Result of a guarded category delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryDeletion {
    Deleted,
    NotFound,
    /// Refused: this many tasks still reference the category.
    InUse { task_count: i64 },
}

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories ordered by name.
    pub async fn list(conn: &mut DbConnection) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, Category>(&query)
            .fetch_all(&mut *conn)
            .await
    }

    /// Find a category by its ID.
    pub async fn find_by_id(
        conn: &mut DbConnection,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = ?");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Insert a new category, returning the created row.
    pub async fn create(
        conn: &mut DbConnection,
        input: &NewCategory,
    ) -> Result<Category, sqlx::Error> {
        let query = format!("INSERT INTO categories (name) VALUES (?) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .fetch_one(&mut *conn)
            .await
    }

    /// Rename a category.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn rename(
        conn: &mut DbConnection,
        input: &RenameCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("UPDATE categories SET name = ? WHERE id = ? RETURNING {COLUMNS}");
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(input.id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Count the tasks that reference a category.
    pub async fn count_tasks(conn: &mut DbConnection, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE category_id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Delete a category unless tasks still reference it.
    ///
    /// The reference count and the delete run in one transaction.
    pub async fn delete(
        conn: &mut DbConnection,
        id: DbId,
    ) -> Result<CategoryDeletion, sqlx::Error> {
        let mut tx = conn.begin().await?;

        let task_count = Self::count_tasks(&mut tx, id).await?;

        if task_count > 0 {
            tracing::debug!(category_id = id, task_count, "Category still referenced");
            tx.rollback().await?;
            return Ok(CategoryDeletion::InUse { task_count });
        }

        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            Ok(CategoryDeletion::NotFound)
        } else {
            Ok(CategoryDeletion::Deleted)
        }
    }
}
