//! Client-side state container.
//!
//! A [`Board`] holds the last successfully fetched category and task lists
//! plus the selected category filter. It never updates lists optimistically:
//! every successful mutation re-fetches what it affected, and a failed fetch
//! leaves the previous list in place.

use taskboard_core::fields::non_blank;
use taskboard_core::types::DbId;

pub use taskboard_core::category::NAME_REQUIRED;
pub use taskboard_core::task::{NO_FIELDS, TITLE_REQUIRED};

use crate::api::{ClientError, TaskboardApi};
use crate::models::{Category, NewTask, Task, TaskEdit};

/// Heading shown above an unfiltered task list.
pub const ALL_TASKS: &str = "All Tasks";

pub struct Board<A> {
    api: A,
    categories: Vec<Category>,
    tasks: Vec<Task>,
    selected_category: Option<DbId>,
    loading: bool,
}

impl<A: TaskboardApi> Board<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            categories: Vec::new(),
            tasks: Vec::new(),
            selected_category: None,
            loading: false,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn selected_category(&self) -> Option<DbId> {
        self.selected_category
    }

    /// True while a task fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Heading for the task view: `Tasks - <name>` when filtered.
    pub fn heading(&self) -> String {
        match self.selected_category {
            None => ALL_TASKS.to_string(),
            Some(id) => {
                let name = self
                    .categories
                    .iter()
                    .find(|c| c.id == id)
                    .map_or("Unknown", |c| c.name.as_str());
                format!("Tasks - {name}")
            }
        }
    }

    // ---------------------------------------------------------------------
    // Fetching
    // ---------------------------------------------------------------------

    /// Initial fetch of both lists. Both are attempted; the first failure
    /// is returned.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let categories = self.refresh_categories().await;
        let tasks = self.refresh_tasks().await;
        categories.and(tasks)
    }

    /// Set the category filter and re-fetch tasks under it.
    pub async fn select_category(&mut self, category_id: Option<DbId>) -> Result<(), ClientError> {
        self.selected_category = category_id;
        self.refresh_tasks().await
    }

    pub async fn refresh_categories(&mut self) -> Result<(), ClientError> {
        match self.api.list_categories().await {
            Ok(categories) => {
                self.categories = categories;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to fetch categories");
                Err(err)
            }
        }
    }

    pub async fn refresh_tasks(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.api.list_tasks(self.selected_category).await;
        self.loading = false;

        match result {
            Ok(tasks) => {
                self.tasks = tasks;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    category_id = ?self.selected_category,
                    "Failed to fetch tasks",
                );
                Err(err)
            }
        }
    }

    // ---------------------------------------------------------------------
    // Category mutations
    // ---------------------------------------------------------------------

    pub async fn add_category(&mut self, name: &str) -> Result<Category, ClientError> {
        let name = non_blank(Some(name)).ok_or(ClientError::Invalid(NAME_REQUIRED))?;
        let category = self.api.create_category(&name).await?;
        self.after_category_change().await;
        Ok(category)
    }

    pub async fn rename_category(&mut self, id: DbId, name: &str) -> Result<Category, ClientError> {
        let name = non_blank(Some(name)).ok_or(ClientError::Invalid(NAME_REQUIRED))?;
        let category = self.api.rename_category(id, &name).await?;
        self.after_category_change().await;
        Ok(category)
    }

    /// Delete a category. If it was the selected filter, the filter resets
    /// to all tasks.
    pub async fn delete_category(&mut self, id: DbId) -> Result<(), ClientError> {
        self.api.delete_category(id).await?;
        if self.selected_category == Some(id) {
            self.selected_category = None;
        }
        self.after_category_change().await;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Task mutations
    // ---------------------------------------------------------------------

    pub async fn add_task(&mut self, task: NewTask) -> Result<Task, ClientError> {
        let title =
            non_blank(Some(task.title.as_str())).ok_or(ClientError::Invalid(TITLE_REQUIRED))?;
        let task = NewTask { title, ..task };
        let created = self.api.create_task(&task).await?;
        self.after_task_change().await;
        Ok(created)
    }

    pub async fn edit_task(&mut self, id: DbId, edit: TaskEdit) -> Result<Task, ClientError> {
        if edit.is_empty() {
            return Err(ClientError::Invalid(NO_FIELDS));
        }
        let title = match &edit.title {
            Some(t) => Some(
                non_blank(Some(t.as_str())).ok_or(ClientError::Invalid(TITLE_REQUIRED))?,
            ),
            None => None,
        };
        let edit = TaskEdit { title, ..edit };

        let updated = self.api.update_task(id, &edit).await?;
        self.after_task_change().await;
        Ok(updated)
    }

    /// Flip a task's completion flag.
    pub async fn toggle_task(&mut self, id: DbId) -> Result<Task, ClientError> {
        let current = match self.tasks.iter().find(|t| t.id == id) {
            Some(task) => task.is_completed,
            None => self.api.get_task(id).await?.is_completed,
        };

        let updated = self
            .api
            .update_task(id, &TaskEdit::completion(!current))
            .await?;
        self.after_task_change().await;
        Ok(updated)
    }

    pub async fn delete_task(&mut self, id: DbId) -> Result<(), ClientError> {
        self.api.delete_task(id).await?;
        self.after_task_change().await;
        Ok(())
    }

    // A failed refetch after a successful mutation is already logged and
    // leaves the previous list; the mutation itself still succeeded.
    async fn after_category_change(&mut self) {
        let _ = self.refresh_categories().await;
        let _ = self.refresh_tasks().await;
    }

    async fn after_task_change(&mut self) {
        let _ = self.refresh_tasks().await;
    }
}
