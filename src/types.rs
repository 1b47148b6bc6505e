use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the total-hours budget is divided among the tasks of a request.
///
/// - `EqualSplit`: every task receives `total_hours / task_count`, whatever
///   its own estimate says (default behaviour).
/// - `PerEstimate`: every task consumes exactly its own estimated hours; tasks
///   that no longer fit in the budget are reported as unscheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum AllocationMode {
    #[serde(alias = "equal_split")]
    EqualSplit,
    #[serde(alias = "per_estimate")]
    PerEstimate,
}

impl Default for AllocationMode {
    fn default() -> Self {
        AllocationMode::EqualSplit
    }
}

impl fmt::Display for AllocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationMode::EqualSplit => f.write_str("equal split"),
            AllocationMode::PerEstimate => f.write_str("per estimate"),
        }
    }
}


/// Order in which tasks are presented to the resolver / allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum TaskOrdering {
    /// Keep the caller's order.
    Input,
    /// Stable sort by due date, undated tasks last.
    #[serde(alias = "due_date")]
    DueDate,
}

impl Default for TaskOrdering {
    fn default() -> Self {
        TaskOrdering::Input
    }
}


/// What to do with a dependency reference that names no task in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Fail the request with `UnresolvedDependency`.
    Reject,
    /// Drop the reference and log a warning.
    Ignore,
}

impl Default for UnresolvedPolicy {
    fn default() -> Self {
        UnresolvedPolicy::Reject
    }
}
