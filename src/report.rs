// src/report.rs

//! Per-request reports and their rendering.
//!
//! Every request yields exactly one [`PlanReport`], whether it succeeded or
//! failed validation, so a batch never aborts on one bad request.

use std::fmt::Write as _;

use serde::Serialize;

use crate::alloc::{AllocationOutcome, AllocationStatus, ScheduledAllocation};
use crate::dag::ResolvedOrder;
use crate::engine::PlanCommand;
use crate::errors::{Result, ScheduleError};
use crate::request::TaskId;
use crate::types::AllocationMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportStatus {
    Ordered,
    Scheduled,
    NothingToSchedule,
    BudgetExceeded,
    CycleDetected,
    UnresolvedDependency,
    AmbiguousDependency,
    DuplicateTask,
    MissingIdentity,
    InvalidBudget,
    WindowOutOfRange,
    MissingSetting,
}

impl ReportStatus {
    /// Whether the request was rejected. Budget overruns and empty requests
    /// are reported outcomes, not failures.
    pub fn is_failure(self) -> bool {
        !matches!(
            self,
            ReportStatus::Ordered
                | ReportStatus::Scheduled
                | ReportStatus::NothingToSchedule
                | ReportStatus::BudgetExceeded
        )
    }
}

impl From<&ScheduleError> for ReportStatus {
    fn from(err: &ScheduleError) -> Self {
        match err {
            ScheduleError::CycleDetected { .. } => ReportStatus::CycleDetected,
            ScheduleError::UnresolvedDependency { .. } => ReportStatus::UnresolvedDependency,
            ScheduleError::AmbiguousDependency { .. } => ReportStatus::AmbiguousDependency,
            ScheduleError::DuplicateTask(_) => ReportStatus::DuplicateTask,
            ScheduleError::MissingIdentity { .. } => ReportStatus::MissingIdentity,
            ScheduleError::InvalidBudget { .. } => ReportStatus::InvalidBudget,
            ScheduleError::WindowOutOfRange { .. } => ReportStatus::WindowOutOfRange,
            ScheduleError::MissingSetting(_) => ReportStatus::MissingSetting,
        }
    }
}

impl From<AllocationStatus> for ReportStatus {
    fn from(status: AllocationStatus) -> Self {
        match status {
            AllocationStatus::Scheduled => ReportStatus::Scheduled,
            AllocationStatus::NothingToSchedule => ReportStatus::NothingToSchedule,
            AllocationStatus::BudgetExceeded => ReportStatus::BudgetExceeded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    pub source: String,
    pub command: PlanCommand,
    pub status: ReportStatus,
    pub message: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cycle_detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<AllocationMode>,
    pub order: Vec<TaskId>,
    pub allocations: Vec<ScheduledAllocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unscheduled: Vec<TaskId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocked: Vec<TaskId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cycles: Vec<Vec<TaskId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_hours: Option<f64>,
}

impl PlanReport {
    fn empty(source: &str, command: PlanCommand, status: ReportStatus, message: String) -> Self {
        Self {
            source: source.to_string(),
            command,
            status,
            message,
            cycle_detected: false,
            mode: None,
            order: Vec::new(),
            allocations: Vec::new(),
            unscheduled: Vec::new(),
            blocked: Vec::new(),
            cycles: Vec::new(),
            requested_hours: None,
            available_hours: None,
        }
    }

    pub fn resolved(source: &str, resolved: ResolvedOrder) -> Self {
        let message = if resolved.is_empty() {
            "No tasks to schedule".to_string()
        } else {
            "Tasks scheduled successfully".to_string()
        };
        let mut report = Self::empty(source, PlanCommand::Resolve, ReportStatus::Ordered, message);
        report.order = resolved.order;
        report
    }

    pub fn allocated(
        source: &str,
        command: PlanCommand,
        resolved: Option<ResolvedOrder>,
        outcome: AllocationOutcome,
    ) -> Self {
        let mut report = Self::empty(source, command, outcome.status.into(), outcome.message());
        report.mode = Some(outcome.mode);
        report.order = match resolved {
            Some(resolved) => resolved.order,
            None => outcome.allocations.iter().map(|a| a.task_id.clone()).collect(),
        };
        report.requested_hours = Some(outcome.requested_hours);
        report.available_hours = Some(outcome.available_hours);
        report.unscheduled = outcome.unscheduled;
        report.allocations = outcome.allocations;
        report
    }

    pub fn failed(source: &str, command: PlanCommand, err: ScheduleError) -> Self {
        let status = ReportStatus::from(&err);
        match err {
            ScheduleError::CycleDetected { blocked, cycles } => {
                let mut report = Self::empty(
                    source,
                    command,
                    status,
                    "Dependency cycle detected!".to_string(),
                );
                report.cycle_detected = true;
                report.blocked = blocked;
                report.cycles = cycles;
                report
            }
            other => Self::empty(source, command, status, other.to_string()),
        }
    }
}

/// Render reports as a pretty-printed JSON array.
pub fn render_json(reports: &[PlanReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

/// Render reports for a terminal.
pub fn render_text(reports: &[PlanReport]) -> String {
    let mut out = String::new();

    for report in reports {
        let _ = writeln!(out, "{} ({}): {:?}", report.source, report.command, report.status);
        let _ = writeln!(out, "  {}", report.message);

        if let Some(mode) = report.mode {
            let _ = writeln!(out, "  mode: {mode}");
        }
        if !report.order.is_empty() {
            let _ = writeln!(out, "  order: {}", join(&report.order, ", "));
        }
        for a in &report.allocations {
            let _ = writeln!(
                out,
                "    {} -> {}  {:>6.2}h  {}  {}",
                a.start.format("%Y-%m-%d %H:%M"),
                a.end.format("%Y-%m-%d %H:%M"),
                a.hours,
                a.task_id,
                a.title
            );
        }
        if !report.unscheduled.is_empty() {
            let _ = writeln!(out, "  unscheduled: {}", join(&report.unscheduled, ", "));
        }
        for cycle in &report.cycles {
            let _ = writeln!(out, "  cycle: {}", join(cycle, " -> "));
        }
        if report.cycles.is_empty() && !report.blocked.is_empty() {
            let _ = writeln!(out, "  blocked: {}", join(&report.blocked, ", "));
        }
    }

    out
}

fn join(ids: &[TaskId], sep: &str) -> String {
    ids.iter().map(TaskId::as_str).collect::<Vec<_>>().join(sep)
}
