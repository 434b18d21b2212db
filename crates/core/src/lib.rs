//! Domain types and request validation for the taskboard service.
//!
//! Pure functions only: nothing in this crate touches the database or the
//! network, so both the repository layer and the HTTP layer can depend on it.

pub mod category;
pub mod error;
pub mod fields;
pub mod task;
pub mod types;
