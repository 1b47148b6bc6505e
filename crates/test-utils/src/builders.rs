#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use taskplan::config::{PlannerConfig, RawPlannerConfig};
use taskplan::request::{ScheduleRequest, TaskId, TaskSpec};
use taskplan::types::{AllocationMode, TaskOrdering, UnresolvedPolicy};

/// Midnight UTC on the given day; panics on an invalid date.
pub fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, date, 0, 0, 0)
        .single()
        .expect("valid calendar date")
}

/// Builder for `TaskSpec`.
pub struct TaskSpecBuilder {
    task: TaskSpec,
}

impl TaskSpecBuilder {
    /// Task with an explicit id; the title defaults to the id.
    pub fn new(id: &str) -> Self {
        Self {
            task: TaskSpec {
                id: Some(TaskId::new(id)),
                title: id.to_string(),
                ..TaskSpec::default()
            },
        }
    }

    /// Task identified only by its title.
    pub fn titled(title: &str) -> Self {
        Self {
            task: TaskSpec {
                title: title.to_string(),
                ..TaskSpec::default()
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.task.title = title.to_string();
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.dependencies.push(TaskId::new(dep));
        self
    }

    pub fn hours(mut self, hours: u32) -> Self {
        self.task.estimated_hours = Some(hours);
        self
    }

    pub fn due(mut self, due: DateTime<Utc>) -> Self {
        self.task.due_date = Some(due);
        self
    }

    pub fn completed(mut self) -> Self {
        self.task.is_completed = true;
        self
    }

    pub fn build(self) -> TaskSpec {
        self.task
    }
}

/// Builder for `ScheduleRequest`.
#[derive(Default)]
pub struct RequestBuilder {
    request: ScheduleRequest,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task(mut self, task: TaskSpecBuilder) -> Self {
        self.request.tasks.push(task.build());
        self
    }

    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.request.start = Some(start);
        self
    }

    pub fn total_hours(mut self, hours: f64) -> Self {
        self.request.total_hours = Some(hours);
        self
    }

    pub fn mode(mut self, mode: AllocationMode) -> Self {
        self.request.mode = Some(mode);
        self
    }

    pub fn order_by(mut self, order: TaskOrdering) -> Self {
        self.request.order_by = Some(order);
        self
    }

    pub fn build(self) -> ScheduleRequest {
        self.request
    }
}

/// Builder for `PlannerConfig`, validated on `build`.
#[derive(Default)]
pub struct PlannerConfigBuilder {
    raw: RawPlannerConfig,
}

impl PlannerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: AllocationMode) -> Self {
        self.raw.config.mode = mode;
        self
    }

    pub fn order_by(mut self, order: TaskOrdering) -> Self {
        self.raw.config.order_by = order;
        self
    }

    pub fn unresolved(mut self, policy: UnresolvedPolicy) -> Self {
        self.raw.config.unresolved_dependencies = policy;
        self
    }

    pub fn default_estimated_hours(mut self, hours: u32) -> Self {
        self.raw.default.estimated_hours = hours;
        self
    }

    pub fn total_hours(mut self, hours: f64) -> Self {
        self.raw.default.total_hours = Some(hours);
        self
    }

    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.raw.default.start = Some(start);
        self
    }

    pub fn build(self) -> PlannerConfig {
        PlannerConfig::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}
