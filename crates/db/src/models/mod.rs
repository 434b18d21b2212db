//! Row structs.
//!
//! Each submodule holds a `FromRow` + `Serialize` struct matching what the
//! repository queries return. Request DTOs live in `taskboard_core`.

pub mod category;
pub mod task;
