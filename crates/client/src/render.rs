//! Plain-text rendering of board state and failures for the CLI.

use std::fmt::Write;

use taskboard_core::types::DbId;

use crate::api::ClientError;
use crate::models::{Category, Task};

/// Shown when a category delete is refused because tasks reference it.
pub const CATEGORY_IN_USE: &str = "Cannot delete category with existing tasks.";

/// The user-facing action a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LoadCategories,
    LoadTasks,
    AddCategory,
    RenameCategory,
    DeleteCategory,
    AddTask,
    EditTask,
    ToggleTask,
    DeleteTask,
}

impl Action {
    fn generic_failure(self) -> &'static str {
        match self {
            Action::LoadCategories => "Failed to load categories",
            Action::LoadTasks => "Failed to load tasks",
            Action::AddCategory => "Failed to add category",
            Action::RenameCategory => "Failed to update category",
            Action::DeleteCategory => "Failed to delete category",
            Action::AddTask => "Failed to add task",
            Action::EditTask => "Failed to update task",
            Action::ToggleTask => "Failed to update task status",
            Action::DeleteTask => "Failed to delete task",
        }
    }
}

/// Text for a failed action: the server's message when it sent one,
/// otherwise a generic line for the action.
pub fn failure_message(action: Action, err: &ClientError) -> String {
    if action == Action::DeleteCategory && err.status() == Some(400) {
        return CATEGORY_IN_USE.to_string();
    }
    match err {
        ClientError::Invalid(reason) => (*reason).to_string(),
        _ => match err.server_message() {
            Some(message) => message.to_string(),
            None => action.generic_failure().to_string(),
        },
    }
}

/// Category list, marking the selected filter with `*`.
pub fn categories(categories: &[Category], selected: Option<DbId>) -> String {
    let mut out = String::from("Categories\n");
    let marker = |id: Option<DbId>| if id == selected { '*' } else { ' ' };

    let _ = writeln!(out, " {} All Tasks", marker(None));
    for category in categories {
        let _ = writeln!(
            out,
            " {} {:>4}  {}",
            marker(Some(category.id)),
            category.id,
            category.name
        );
    }
    out
}

pub fn tasks(heading: &str, tasks: &[Task], loading: bool) -> String {
    let mut out = format!("{heading}\n");
    if loading {
        out.push_str("  Loading...\n");
        return out;
    }
    if tasks.is_empty() {
        out.push_str("  No tasks found\n");
        return out;
    }

    for task in tasks {
        let check = if task.is_completed { 'x' } else { ' ' };
        let _ = write!(out, "  [{check}] {:>4}  {}", task.id, task.title);
        if let Some(name) = &task.category_name {
            let _ = write!(out, "  ({name})");
        }
        let _ = writeln!(out, "  {}", task.created_at.format("%Y-%m-%d %H:%M"));
        if let Some(description) = &task.description {
            let _ = writeln!(out, "         {description}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn task(id: DbId, title: &str, done: bool, category: Option<&str>) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: None,
            category_id: category.map(|_| 1),
            is_completed: done,
            created_at: Utc.with_ymd_and_hms(2025, 3, 4, 9, 30, 0).unwrap(),
            category_name: category.map(str::to_string),
        }
    }

    #[test]
    fn category_delete_400_gets_fixed_message() {
        let err = ClientError::Api {
            status: 400,
            message: Some("Cannot delete category with existing tasks".into()),
        };
        assert_eq!(failure_message(Action::DeleteCategory, &err), CATEGORY_IN_USE);
    }

    #[test]
    fn server_message_preferred_over_generic() {
        let err = ClientError::Api {
            status: 400,
            message: Some("Task title is required".into()),
        };
        assert_eq!(
            failure_message(Action::AddTask, &err),
            "Task title is required"
        );

        let err = ClientError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(failure_message(Action::AddTask, &err), "Failed to add task");
    }

    #[test]
    fn categories_mark_selection() {
        let list = vec![Category {
            id: 2,
            name: "Work".into(),
        }];
        let out = categories(&list, Some(2));
        assert!(out.contains(" *    2  Work"));
        assert!(out.contains("   All Tasks"));
    }

    #[test]
    fn tasks_show_completion_and_category() {
        let out = tasks(
            "All Tasks",
            &[task(1, "Buy milk", true, None), task(2, "Report", false, Some("Work"))],
            false,
        );
        assert!(out.starts_with("All Tasks\n"));
        assert!(out.contains("[x]    1  Buy milk  2025-03-04 09:30"));
        assert!(out.contains("[ ]    2  Report  (Work)"));
    }

    #[test]
    fn empty_task_list() {
        assert_eq!(tasks("Tasks - Work", &[], false), "Tasks - Work\n  No tasks found\n");
    }
}
