// src/engine/core.rs

//! Request-scoped planner.
//!
//! A [`Planner`] borrows the validated config and the command-line overrides
//! and runs one request at a time through the resolver and allocator. It
//! holds no state between requests, performs no IO, and has no Tokio types,
//! so it is unit tested directly and shared freely across worker threads.

use std::borrow::Cow;
use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::alloc::{AllocationOutcome, TimeAllocator};
use crate::config::PlannerConfig;
use crate::dag::{resolve, ResolvedOrder};
use crate::engine::{EffectiveSettings, Overrides, PlanCommand};
use crate::errors::ScheduleError;
use crate::report::PlanReport;
use crate::request::{ScheduleRequest, TaskId, TaskSpec};
use crate::types::TaskOrdering;

#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    config: &'a PlannerConfig,
    overrides: &'a Overrides,
}

impl<'a> Planner<'a> {
    pub fn new(config: &'a PlannerConfig, overrides: &'a Overrides) -> Self {
        Self { config, overrides }
    }

    pub fn settings(&self, request: &ScheduleRequest) -> EffectiveSettings {
        EffectiveSettings::resolve(self.config, self.overrides, request)
    }

    /// Dependency order of the request's tasks.
    pub fn resolve(&self, request: &ScheduleRequest) -> Result<ResolvedOrder, ScheduleError> {
        let settings = self.settings(request);
        let tasks = effective_input(&request.tasks, settings.order_by);
        resolve(&tasks, settings.unresolved)
    }

    /// Allocate time in the effective input order, ignoring dependencies.
    pub fn allocate(&self, request: &ScheduleRequest) -> Result<AllocationOutcome, ScheduleError> {
        let settings = self.settings(request);
        let tasks = effective_input(&request.tasks, settings.order_by);
        if tasks.is_empty() {
            return Ok(nothing_to_schedule(&settings));
        }

        let window = settings.window()?;
        allocator_for(&settings).allocate(tasks.iter(), &window)
    }

    /// Resolve dependencies, then allocate time in that order.
    pub fn plan(
        &self,
        request: &ScheduleRequest,
    ) -> Result<(ResolvedOrder, AllocationOutcome), ScheduleError> {
        let settings = self.settings(request);
        let tasks = effective_input(&request.tasks, settings.order_by);
        let resolved = resolve(&tasks, settings.unresolved)?;

        if tasks.is_empty() {
            return Ok((resolved, nothing_to_schedule(&settings)));
        }

        let window = settings.window()?;
        let ordered = resolved.positions().iter().map(|&p| &tasks[p]);
        let outcome = allocator_for(&settings).allocate(ordered, &window)?;
        Ok((resolved, outcome))
    }

    /// Run `command` and fold the result, success or failure, into a report.
    pub fn report(&self, source: &str, command: PlanCommand, request: &ScheduleRequest) -> PlanReport {
        debug!(source, %command, tasks = request.tasks.len(), "planning request");

        let report = match command {
            PlanCommand::Resolve => match self.resolve(request) {
                Ok(order) => PlanReport::resolved(source, order),
                Err(err) => PlanReport::failed(source, command, err),
            },
            PlanCommand::Allocate => match self.allocate(request) {
                Ok(outcome) => PlanReport::allocated(source, command, None, outcome),
                Err(err) => PlanReport::failed(source, command, err),
            },
            PlanCommand::Plan => match self.plan(request) {
                Ok((order, outcome)) => PlanReport::allocated(source, command, Some(order), outcome),
                Err(err) => PlanReport::failed(source, command, err),
            },
        };

        if report.status.is_failure() {
            warn!(source, status = ?report.status, "{}", report.message);
        } else {
            info!(source, status = ?report.status, "{}", report.message);
        }
        report
    }
}

/// The tasks an operation actually works on: pending tasks only, in the
/// effective order.
///
/// Due-date ordering is a stable sort with undated tasks last, so it only
/// changes the tie-break among tasks the resolver is free to reorder.
fn effective_input(tasks: &[TaskSpec], order_by: TaskOrdering) -> Cow<'_, [TaskSpec]> {
    let mut input = pending_tasks(tasks);
    if order_by == TaskOrdering::DueDate {
        input
            .to_mut()
            .sort_by_key(|task| (task.due_date.is_none(), task.due_date));
    }
    input
}

/// Drop completed tasks, and the dependency references that point at them.
///
/// A reference is matched like the graph does it: identity first, then
/// title. It is only dropped when it does not also name a pending task.
fn pending_tasks(tasks: &[TaskSpec]) -> Cow<'_, [TaskSpec]> {
    if !tasks.iter().any(|task| task.is_completed) {
        return Cow::Borrowed(tasks);
    }

    let (done, pending): (Vec<&TaskSpec>, Vec<&TaskSpec>) =
        tasks.iter().partition(|task| task.is_completed);

    let pending_ids: HashSet<TaskId> = pending.iter().filter_map(|t| t.identity()).collect();
    let pending_titles: HashSet<&str> = pending.iter().map(|t| t.title.as_str()).collect();
    let done_ids: HashSet<TaskId> = done.iter().filter_map(|t| t.identity()).collect();
    let done_titles: HashSet<&str> = done.iter().map(|t| t.title.as_str()).collect();

    let satisfied = |dep: &TaskId| {
        if pending_ids.contains(dep) {
            return false;
        }
        done_ids.contains(dep)
            || (!pending_titles.contains(dep.as_str()) && done_titles.contains(dep.as_str()))
    };

    debug!(completed = done.len(), pending = pending.len(), "skipping completed tasks");

    Cow::Owned(
        pending
            .into_iter()
            .map(|task| {
                let mut task = task.clone();
                task.dependencies.retain(|dep| !satisfied(dep));
                task
            })
            .collect(),
    )
}

fn allocator_for(settings: &EffectiveSettings) -> TimeAllocator {
    TimeAllocator::new(settings.mode).with_default_estimated_hours(settings.default_estimated_hours)
}

fn nothing_to_schedule(settings: &EffectiveSettings) -> AllocationOutcome {
    AllocationOutcome::nothing_to_schedule(settings.mode, settings.total_hours.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::AllocationStatus;
    use crate::report::ReportStatus;
    use crate::request::TaskId;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap()
    }

    fn task(id: &str, deps: &[&str], due: Option<u32>) -> TaskSpec {
        TaskSpec {
            id: Some(TaskId::from(id)),
            title: id.to_lowercase(),
            due_date: due.map(|day| Utc.with_ymd_and_hms(2026, 1, day, 0, 0, 0).unwrap()),
            dependencies: deps.iter().map(|d| TaskId::from(*d)).collect(),
            ..TaskSpec::default()
        }
    }

    fn request(tasks: Vec<TaskSpec>) -> ScheduleRequest {
        ScheduleRequest {
            start: Some(t0()),
            total_hours: Some(9.0),
            ..ScheduleRequest::from_tasks(tasks)
        }
    }

    #[test]
    fn plan_orders_then_splits_budget() {
        let config = PlannerConfig::default();
        let overrides = Overrides::default();
        let planner = Planner::new(&config, &overrides);

        let req = request(vec![task("C", &["A"], None), task("A", &[], None), task("B", &["A"], None)]);
        let (order, outcome) = planner.plan(&req).unwrap();

        let ids: Vec<&str> = order.order.iter().map(|t| t.as_str()).collect();
        assert_eq!(ids, vec!["A", "C", "B"]);
        assert_eq!(outcome.allocations[0].task_id, TaskId::from("A"));
        assert_eq!(outcome.allocations[2].start, t0() + TimeDelta::hours(6));
    }

    #[test]
    fn due_date_ordering_breaks_ties() {
        let config = PlannerConfig::default();
        let overrides = Overrides {
            order_by: Some(TaskOrdering::DueDate),
            ..Overrides::default()
        };
        let planner = Planner::new(&config, &overrides);

        let req = request(vec![
            task("undated", &[], None),
            task("late", &[], Some(20)),
            task("early", &["late"], Some(10)),
        ]);
        let order = planner.resolve(&req).unwrap();
        let ids: Vec<&str> = order.order.iter().map(|t| t.as_str()).collect();
        // "early" sorts first but must still wait for "late".
        assert_eq!(ids, vec!["late", "undated", "early"]);
    }

    #[test]
    fn allocate_ignores_dependencies() {
        let config = PlannerConfig::default();
        let overrides = Overrides::default();
        let planner = Planner::new(&config, &overrides);

        let req = request(vec![task("B", &["A"], None), task("A", &[], None)]);
        let outcome = planner.allocate(&req).unwrap();
        assert_eq!(outcome.allocations[0].task_id, TaskId::from("B"));
    }

    #[test]
    fn empty_request_needs_no_window() {
        let config = PlannerConfig::default();
        let overrides = Overrides::default();
        let planner = Planner::new(&config, &overrides);

        let (order, outcome) = planner.plan(&ScheduleRequest::default()).unwrap();
        assert!(order.is_empty());
        assert_eq!(outcome.status, AllocationStatus::NothingToSchedule);
    }

    #[test]
    fn missing_start_is_reported() {
        let config = PlannerConfig::default();
        let overrides = Overrides::default();
        let planner = Planner::new(&config, &overrides);

        let mut req = request(vec![task("A", &[], None)]);
        req.start = None;
        let report = planner.report("inline", PlanCommand::Plan, &req);
        assert_eq!(report.status, ReportStatus::MissingSetting);
        assert!(report.allocations.is_empty());
    }

    #[test]
    fn cycle_report_carries_no_order() {
        let config = PlannerConfig::default();
        let overrides = Overrides::default();
        let planner = Planner::new(&config, &overrides);

        let req = request(vec![task("X", &["Y"], None), task("Y", &["X"], None)]);
        let report = planner.report("inline", PlanCommand::Plan, &req);
        assert_eq!(report.status, ReportStatus::CycleDetected);
        assert!(report.cycle_detected);
        assert!(report.order.is_empty());
        assert_eq!(report.message, "Dependency cycle detected!");
    }

    #[test]
    fn completed_tasks_get_no_window() {
        let config = PlannerConfig::default();
        let overrides = Overrides::default();
        let planner = Planner::new(&config, &overrides);

        let mut done = task("1", &[], None);
        done.is_completed = true;
        let req = request(vec![done, task("2", &[], None)]);

        let report = planner.report("inline", PlanCommand::Allocate, &req);
        assert_eq!(report.status, ReportStatus::Scheduled);
        assert_eq!(report.order, vec![TaskId::from("2")]);
        assert_eq!(report.allocations.len(), 1);
        assert_eq!(report.allocations[0].end, t0() + TimeDelta::hours(9));
    }

    #[test]
    fn dependency_on_completed_task_is_satisfied() {
        let config = PlannerConfig::default();
        let overrides = Overrides::default();
        let planner = Planner::new(&config, &overrides);

        let mut design = task("A", &[], None);
        design.is_completed = true;
        // "a" is the title of the completed task.
        let req = request(vec![task("C", &["a"], None), design, task("B", &["A"], None)]);

        let (order, outcome) = planner.plan(&req).unwrap();
        let ids: Vec<&str> = order.order.iter().map(|t| t.as_str()).collect();
        assert_eq!(ids, vec!["C", "B"]);
        assert_eq!(outcome.allocations.len(), 2);
    }

    #[test]
    fn reference_to_missing_task_still_fails_beside_completed_ones() {
        let config = PlannerConfig::default();
        let overrides = Overrides::default();
        let planner = Planner::new(&config, &overrides);

        let mut done = task("A", &[], None);
        done.is_completed = true;
        let req = request(vec![done, task("B", &["ghost"], None)]);

        let report = planner.report("inline", PlanCommand::Resolve, &req);
        assert_eq!(report.status, ReportStatus::UnresolvedDependency);
    }

    #[test]
    fn all_completed_is_nothing_to_schedule() {
        let config = PlannerConfig::default();
        let overrides = Overrides::default();
        let planner = Planner::new(&config, &overrides);

        let mut done = task("A", &[], None);
        done.is_completed = true;
        let req = ScheduleRequest::from_tasks(vec![done]);

        let outcome = planner.allocate(&req).unwrap();
        assert_eq!(outcome.status, AllocationStatus::NothingToSchedule);
        let (order, _) = planner.plan(&req).unwrap();
        assert!(order.is_empty());
    }
}
