//! Response bodies for mutating endpoints.
//!
//! Reads return bare rows or arrays; every write answers with a `message`
//! plus whatever the client needs to refresh without another round trip.

use serde::Serialize;
use taskboard_core::types::DbId;

/// `{ "message": ... }`, used by deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `{ "message", "id", "name" }`, returned by category create and update.
#[derive(Debug, Serialize)]
pub struct CategoryMutation {
    pub message: &'static str,
    pub id: DbId,
    pub name: String,
}

/// `{ "message", "task" }`, returned by task create and update.
#[derive(Debug, Serialize)]
pub struct TaskMutation<T: Serialize> {
    pub message: &'static str,
    pub task: T,
}
