//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&mut DbConnection` as the first argument, so a handler can
//! run every statement of one request on the connection it acquired.

pub mod category_repo;
pub mod task_repo;

pub use category_repo::{CategoryDeletion, CategoryRepo};
pub use task_repo::TaskRepo;
