//! Client side of the taskboard: a typed HTTP client for the REST API and
//! the [`board::Board`] state container that the `taskboard` CLI renders.

pub mod api;
pub mod board;
pub mod models;
pub mod render;
