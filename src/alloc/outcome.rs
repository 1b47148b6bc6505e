// src/alloc/outcome.rs

//! Result types produced by the time allocator.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::request::TaskId;
use crate::types::AllocationMode;

/// A concrete time window assigned to one task.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledAllocation {
    pub task_id: TaskId,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Length of the window in hours (fractional in equal-split mode).
    pub hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AllocationStatus {
    /// Every task received a window.
    Scheduled,
    /// The request had no tasks; the allocation list is empty.
    NothingToSchedule,
    /// Per-estimate mode ran out of budget; see `unscheduled`.
    BudgetExceeded,
}

/// Full allocator output for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationOutcome {
    pub mode: AllocationMode,
    pub status: AllocationStatus,
    pub allocations: Vec<ScheduledAllocation>,
    /// Tasks that did not fit in the budget, in request order.
    pub unscheduled: Vec<TaskId>,
    /// Hours the tasks asked for (equal to `available_hours` in equal-split mode).
    pub requested_hours: f64,
    pub available_hours: f64,
}

impl AllocationOutcome {
    pub(crate) fn nothing_to_schedule(mode: AllocationMode, available_hours: f64) -> Self {
        Self {
            mode,
            status: AllocationStatus::NothingToSchedule,
            allocations: Vec::new(),
            unscheduled: Vec::new(),
            requested_hours: 0.0,
            available_hours,
        }
    }

    /// Sum of allocated hours.
    pub fn allocated_hours(&self) -> f64 {
        self.allocations.iter().map(|a| a.hours).sum()
    }

    /// End of the last allocated window.
    pub fn finish(&self) -> Option<DateTime<Utc>> {
        self.allocations.last().map(|a| a.end)
    }

    /// Human-readable summary.
    pub fn message(&self) -> String {
        match self.status {
            AllocationStatus::NothingToSchedule => "No tasks to schedule".to_string(),
            AllocationStatus::Scheduled => {
                format!("Successfully scheduled {} tasks", self.allocations.len())
            }
            AllocationStatus::BudgetExceeded => format!(
                "Scheduled {} of {} tasks; {} task(s) do not fit in the {} hour budget ({} hours requested)",
                self.allocations.len(),
                self.allocations.len() + self.unscheduled.len(),
                self.unscheduled.len(),
                self.available_hours,
                self.requested_hours
            ),
        }
    }
}
