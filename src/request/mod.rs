// src/request/mod.rs

//! Scheduling request data model and JSON loading.
//!
//! - [`model`] defines tasks, identities and the request envelope.
//! - [`loader`] reads request documents through the [`crate::fs`] layer.

pub mod loader;
pub mod model;

pub use loader::{load_request, parse_request};
pub use model::{parse_instant, ScheduleRequest, TaskId, TaskSpec};
