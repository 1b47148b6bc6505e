// src/engine/settings.rs

use chrono::{DateTime, Utc};

use crate::alloc::ScheduleWindow;
use crate::config::PlannerConfig;
use crate::engine::Overrides;
use crate::errors::ScheduleError;
use crate::request::ScheduleRequest;
use crate::types::{AllocationMode, TaskOrdering, UnresolvedPolicy};

/// Settings for one request after applying precedence:
/// command line, then request, then planner config.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveSettings {
    pub start: Option<DateTime<Utc>>,
    pub total_hours: Option<f64>,
    pub mode: AllocationMode,
    pub order_by: TaskOrdering,
    pub unresolved: UnresolvedPolicy,
    pub default_estimated_hours: u32,
}

impl EffectiveSettings {
    pub fn resolve(config: &PlannerConfig, overrides: &Overrides, request: &ScheduleRequest) -> Self {
        Self {
            start: overrides.start.or(request.start).or(config.default.start),
            total_hours: overrides
                .total_hours
                .or(request.total_hours)
                .or(config.default.total_hours),
            mode: overrides.mode.or(request.mode).unwrap_or(config.config.mode),
            order_by: overrides
                .order_by
                .or(request.order_by)
                .unwrap_or(config.config.order_by),
            unresolved: config.config.unresolved_dependencies,
            default_estimated_hours: config.default.estimated_hours,
        }
    }

    /// The allocation window, or `MissingSetting` if start or budget is unknown.
    pub fn window(&self) -> Result<ScheduleWindow, ScheduleError> {
        let start = self.start.ok_or(ScheduleError::MissingSetting("start instant"))?;
        let total_hours = self
            .total_hours
            .ok_or(ScheduleError::MissingSetting("total hours budget"))?;
        Ok(ScheduleWindow::new(start, total_hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn command_line_beats_request_beats_config() {
        let mut config = PlannerConfig::default();
        config.default.total_hours = Some(40.0);
        config.config.mode = AllocationMode::PerEstimate;

        let request = ScheduleRequest {
            total_hours: Some(20.0),
            order_by: Some(TaskOrdering::DueDate),
            ..ScheduleRequest::default()
        };
        let overrides = Overrides {
            total_hours: Some(10.0),
            ..Overrides::default()
        };

        let settings = EffectiveSettings::resolve(&config, &overrides, &request);
        assert_eq!(settings.total_hours, Some(10.0));
        assert_eq!(settings.order_by, TaskOrdering::DueDate);
        assert_eq!(settings.mode, AllocationMode::PerEstimate);

        let settings = EffectiveSettings::resolve(&config, &Overrides::default(), &request);
        assert_eq!(settings.total_hours, Some(20.0));
    }

    #[test]
    fn window_requires_start_and_budget() {
        let config = PlannerConfig::default();
        let mut request = ScheduleRequest {
            total_hours: Some(8.0),
            ..ScheduleRequest::default()
        };

        let settings = EffectiveSettings::resolve(&config, &Overrides::default(), &request);
        assert_eq!(
            settings.window(),
            Err(ScheduleError::MissingSetting("start instant"))
        );

        request.start = Some(Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap());
        let settings = EffectiveSettings::resolve(&config, &Overrides::default(), &request);
        assert_eq!(settings.window().map(|w| w.total_hours), Ok(8.0));
    }
}
