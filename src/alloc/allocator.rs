// src/alloc/allocator.rs

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info};

use crate::alloc::outcome::{AllocationOutcome, AllocationStatus, ScheduledAllocation};
use crate::errors::ScheduleError;
use crate::request::{TaskId, TaskSpec};
use crate::types::AllocationMode;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Where and how much time is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleWindow {
    pub start: DateTime<Utc>,
    pub total_hours: f64,
}

impl ScheduleWindow {
    pub fn new(start: DateTime<Utc>, total_hours: f64) -> Self {
        Self { start, total_hours }
    }
}

/// Assigns contiguous, non-overlapping windows to tasks in the order given.
///
/// The allocator never re-sorts: dependency or due-date ordering must already
/// have been applied. Each window starts where the previous one ended.
///
/// In [`AllocationMode::EqualSplit`] the budget is divided with real
/// division and each share is truncated to whole seconds, so the allocated
/// total can fall short of the budget by at most `task_count - 1` seconds.
#[derive(Debug, Clone, Copy)]
pub struct TimeAllocator {
    mode: AllocationMode,
    default_estimated_hours: u32,
}

impl TimeAllocator {
    pub fn new(mode: AllocationMode) -> Self {
        Self {
            mode,
            default_estimated_hours: 1,
        }
    }

    /// Estimate used for tasks that do not declare one.
    pub fn with_default_estimated_hours(mut self, hours: u32) -> Self {
        self.default_estimated_hours = hours;
        self
    }

    pub fn allocate<'a>(
        &self,
        tasks: impl IntoIterator<Item = &'a TaskSpec>,
        window: &ScheduleWindow,
    ) -> Result<AllocationOutcome, ScheduleError> {
        let tasks: Vec<&TaskSpec> = tasks.into_iter().collect();

        if tasks.is_empty() {
            debug!(mode = %self.mode, "no tasks to allocate");
            return Ok(AllocationOutcome::nothing_to_schedule(
                self.mode,
                window.total_hours,
            ));
        }

        if !window.total_hours.is_finite() || window.total_hours <= 0.0 {
            return Err(invalid_budget(window, tasks.len()));
        }

        let identities = tasks
            .iter()
            .enumerate()
            .map(|(position, task)| {
                task.identity()
                    .ok_or(ScheduleError::MissingIdentity { position })
            })
            .collect::<Result<Vec<TaskId>, _>>()?;

        let outcome = match self.mode {
            AllocationMode::EqualSplit => equal_split(&tasks, identities, window)?,
            AllocationMode::PerEstimate => self.per_estimate(&tasks, identities, window)?,
        };

        info!(
            mode = %self.mode,
            scheduled = outcome.allocations.len(),
            unscheduled = outcome.unscheduled.len(),
            "allocated schedule window"
        );
        Ok(outcome)
    }

    fn per_estimate(
        &self,
        tasks: &[&TaskSpec],
        identities: Vec<TaskId>,
        window: &ScheduleWindow,
    ) -> Result<AllocationOutcome, ScheduleError> {
        let budget_secs = (window.total_hours * SECONDS_PER_HOUR).floor() as i64;

        let mut allocations = Vec::new();
        let mut unscheduled = Vec::new();
        let mut requested_hours = 0.0;
        let mut used_secs: i64 = 0;
        let mut cursor = window.start;

        for (task, id) in tasks.iter().zip(identities) {
            let estimate = task.effective_estimated_hours(self.default_estimated_hours);
            requested_hours += f64::from(estimate);

            let needed_secs = i64::from(estimate) * 3600;
            // Once one task overflows, everything after it stays unscheduled:
            // later tasks may depend on it.
            if !unscheduled.is_empty() || used_secs + needed_secs > budget_secs {
                debug!(task = %id, estimate, "task does not fit in remaining budget");
                unscheduled.push(id);
                continue;
            }

            let end = window_end(cursor, needed_secs, &id)?;
            allocations.push(ScheduledAllocation {
                task_id: id,
                title: task.display_title(),
                start: cursor,
                end,
                hours: f64::from(estimate),
            });
            used_secs += needed_secs;
            cursor = end;
        }

        let status = if unscheduled.is_empty() {
            AllocationStatus::Scheduled
        } else {
            AllocationStatus::BudgetExceeded
        };

        Ok(AllocationOutcome {
            mode: AllocationMode::PerEstimate,
            status,
            allocations,
            unscheduled,
            requested_hours,
            available_hours: window.total_hours,
        })
    }
}

fn invalid_budget(window: &ScheduleWindow, task_count: usize) -> ScheduleError {
    ScheduleError::InvalidBudget {
        total_hours: window.total_hours,
        task_count,
    }
}

/// End of a window of `secs` seconds starting at `start`, or
/// `WindowOutOfRange` if it falls past what `DateTime<Utc>` can represent.
fn window_end(start: DateTime<Utc>, secs: i64, task: &TaskId) -> Result<DateTime<Utc>, ScheduleError> {
    TimeDelta::try_seconds(secs)
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or_else(|| ScheduleError::WindowOutOfRange { task: task.clone() })
}

/// Fails with `InvalidBudget` when the per-task share truncates to zero
/// seconds.
fn equal_split(
    tasks: &[&TaskSpec],
    identities: Vec<TaskId>,
    window: &ScheduleWindow,
) -> Result<AllocationOutcome, ScheduleError> {
    let share_secs = (window.total_hours * SECONDS_PER_HOUR / tasks.len() as f64).floor();
    if share_secs < 1.0 {
        return Err(invalid_budget(window, tasks.len()));
    }
    // Saturates for absurd budgets; `window_end` then reports the overflow.
    let share = share_secs as i64;
    let hours = share_secs / SECONDS_PER_HOUR;

    let mut allocations = Vec::with_capacity(tasks.len());
    let mut cursor = window.start;

    for (task, id) in tasks.iter().zip(identities) {
        let end = window_end(cursor, share, &id)?;
        allocations.push(ScheduledAllocation {
            task_id: id,
            title: task.display_title(),
            start: cursor,
            end,
            hours,
        });
        cursor = end;
    }

    Ok(AllocationOutcome {
        mode: AllocationMode::EqualSplit,
        status: AllocationStatus::Scheduled,
        allocations,
        unscheduled: Vec::new(),
        requested_hours: window.total_hours,
        available_hours: window.total_hours,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap()
    }

    fn task(id: &str, estimate: Option<u32>) -> TaskSpec {
        TaskSpec {
            id: Some(TaskId::from(id)),
            title: format!("Task {id}"),
            estimated_hours: estimate,
            ..TaskSpec::default()
        }
    }

    #[test]
    fn equal_split_nine_hours_over_three_tasks() {
        let tasks = vec![task("A", None), task("B", Some(8)), task("C", None)];
        let outcome = TimeAllocator::new(AllocationMode::EqualSplit)
            .allocate(&tasks, &ScheduleWindow::new(t0(), 9.0))
            .unwrap();

        assert_eq!(outcome.status, AllocationStatus::Scheduled);
        let starts: Vec<_> = outcome.allocations.iter().map(|a| a.start).collect();
        assert_eq!(
            starts,
            vec![t0(), t0() + TimeDelta::hours(3), t0() + TimeDelta::hours(6)]
        );
        assert!(outcome.allocations.iter().all(|a| a.hours == 3.0));
        assert_eq!(outcome.finish(), Some(t0() + TimeDelta::hours(9)));
    }

    #[test]
    fn equal_split_uneven_budget_truncates_to_seconds() {
        let tasks = vec![task("A", None), task("B", None), task("C", None)];
        let outcome = TimeAllocator::new(AllocationMode::EqualSplit)
            .allocate(&tasks, &ScheduleWindow::new(t0(), 10.0))
            .unwrap();

        // 36000s / 3 = 12000s each, exact; total is the full budget.
        assert!((outcome.allocated_hours() - 10.0).abs() < 1e-9);

        let tasks: Vec<TaskSpec> = ["A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .map(|id| task(id, None))
            .collect();
        let outcome = TimeAllocator::new(AllocationMode::EqualSplit)
            .allocate(&tasks, &ScheduleWindow::new(t0(), 1.0))
            .unwrap();
        // 3600 / 7 = 514.28s -> 514s each, 2s short of the budget.
        let total_secs: i64 = outcome
            .allocations
            .iter()
            .map(|a| (a.end - a.start).num_seconds())
            .sum();
        assert_eq!(total_secs, 3598);
    }

    #[test]
    fn per_estimate_uses_each_tasks_hours() {
        let tasks = vec![task("A", Some(2)), task("B", None), task("C", Some(4))];
        let outcome = TimeAllocator::new(AllocationMode::PerEstimate)
            .allocate(&tasks, &ScheduleWindow::new(t0(), 40.0))
            .unwrap();

        let hours: Vec<f64> = outcome.allocations.iter().map(|a| a.hours).collect();
        assert_eq!(hours, vec![2.0, 1.0, 4.0]);
        assert_eq!(outcome.status, AllocationStatus::Scheduled);
        assert_eq!(outcome.requested_hours, 7.0);
    }

    #[test]
    fn per_estimate_reports_overflow_and_everything_after_it() {
        let tasks = vec![task("A", Some(3)), task("B", Some(5)), task("C", Some(1))];
        let outcome = TimeAllocator::new(AllocationMode::PerEstimate)
            .allocate(&tasks, &ScheduleWindow::new(t0(), 6.0))
            .unwrap();

        assert_eq!(outcome.status, AllocationStatus::BudgetExceeded);
        assert_eq!(outcome.allocations.len(), 1);
        assert_eq!(outcome.unscheduled, vec![TaskId::from("B"), TaskId::from("C")]);
        assert_eq!(outcome.requested_hours, 9.0);
        assert!(outcome.message().contains("2 task(s) do not fit"));
    }

    #[test]
    fn per_estimate_exact_fit_is_scheduled() {
        let tasks = vec![task("A", Some(3)), task("B", Some(3))];
        let outcome = TimeAllocator::new(AllocationMode::PerEstimate)
            .allocate(&tasks, &ScheduleWindow::new(t0(), 6.0))
            .unwrap();
        assert_eq!(outcome.status, AllocationStatus::Scheduled);
        assert!(outcome.unscheduled.is_empty());
    }

    #[test]
    fn default_estimate_is_configurable() {
        let tasks = vec![task("A", None)];
        let outcome = TimeAllocator::new(AllocationMode::PerEstimate)
            .with_default_estimated_hours(5)
            .allocate(&tasks, &ScheduleWindow::new(t0(), 8.0))
            .unwrap();
        assert_eq!(outcome.allocations[0].hours, 5.0);
    }

    #[test]
    fn empty_input_is_nothing_to_schedule_even_without_budget() {
        let outcome = TimeAllocator::new(AllocationMode::EqualSplit)
            .allocate(&Vec::<TaskSpec>::new(), &ScheduleWindow::new(t0(), 0.0))
            .unwrap();
        assert_eq!(outcome.status, AllocationStatus::NothingToSchedule);
        assert!(outcome.allocations.is_empty());
        assert_eq!(outcome.message(), "No tasks to schedule");
    }

    #[test]
    fn non_positive_budget_is_rejected() {
        let tasks = vec![task("A", None)];
        for budget in [0.0, -4.0, f64::NAN, f64::INFINITY] {
            for mode in [AllocationMode::EqualSplit, AllocationMode::PerEstimate] {
                let err = TimeAllocator::new(mode)
                    .allocate(&tasks, &ScheduleWindow::new(t0(), budget))
                    .unwrap_err();
                assert!(matches!(err, ScheduleError::InvalidBudget { task_count: 1, .. }));
            }
        }
    }

    #[test]
    fn share_below_one_second_is_rejected() {
        let tasks = vec![task("A", None), task("B", None)];
        let err = TimeAllocator::new(AllocationMode::EqualSplit)
            .allocate(&tasks, &ScheduleWindow::new(t0(), 0.0001))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidBudget { .. }));
    }

    #[test]
    fn task_without_identity_is_rejected() {
        let tasks = vec![task("A", None), TaskSpec::default()];
        let err = TimeAllocator::new(AllocationMode::EqualSplit)
            .allocate(&tasks, &ScheduleWindow::new(t0(), 4.0))
            .unwrap_err();
        assert_eq!(err, ScheduleError::MissingIdentity { position: 1 });
    }

    #[test]
    fn window_past_the_calendar_is_not_a_budget_error() {
        let tasks = vec![task("A", Some(u32::MAX))];
        let err = TimeAllocator::new(AllocationMode::PerEstimate)
            .allocate(&tasks, &ScheduleWindow::new(t0(), 1e13))
            .unwrap_err();
        assert_eq!(err, ScheduleError::WindowOutOfRange { task: TaskId::from("A") });

        let err = TimeAllocator::new(AllocationMode::EqualSplit)
            .allocate(&tasks, &ScheduleWindow::new(t0(), 1e13))
            .unwrap_err();
        assert_eq!(err, ScheduleError::WindowOutOfRange { task: TaskId::from("A") });
    }
}
