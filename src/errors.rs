// src/errors.rs

//! Crate-wide error types.
//!
//! [`ScheduleError`] is the engine's validation taxonomy: every malformed
//! request is classified into one of its variants and reported, never
//! panicked on. [`PlannerError`] wraps it together with the ambient failures
//! (IO, parsing, configuration) that only the outer layers can hit.

use thiserror::Error;

use crate::request::TaskId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// The dependency graph contains at least one cycle; no order is produced.
    #[error("Dependency cycle detected among tasks: {}", join_ids(.blocked))]
    CycleDetected {
        /// Every task whose in-degree never reached zero, in input order.
        blocked: Vec<TaskId>,
        /// The strongly-connected components that form the cycles.
        cycles: Vec<Vec<TaskId>>,
    },

    #[error("task '{task}' depends on unknown task '{dependency}'")]
    UnresolvedDependency { task: TaskId, dependency: TaskId },

    #[error("task '{task}' depends on '{dependency}', which matches the title of several tasks")]
    AmbiguousDependency { task: TaskId, dependency: TaskId },

    #[error("task identity '{0}' appears more than once in the request")]
    DuplicateTask(TaskId),

    #[error("task at position {position} has neither an id nor a title")]
    MissingIdentity { position: usize },

    #[error("total hours budget {total_hours} cannot be divided across {task_count} task(s)")]
    InvalidBudget { total_hours: f64, task_count: usize },

    #[error("schedule for task '{task}' runs past the representable date range")]
    WindowOutOfRange { task: TaskId },

    #[error("no {0} given on the command line, in the request, or in the config")]
    MissingSetting(&'static str),
}

fn join_ids(ids: &[TaskId]) -> String {
    ids.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PlannerError>;
