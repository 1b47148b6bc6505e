// src/config/model.rs

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::request::model::deserialize_optional_instant;
use crate::types::{AllocationMode, TaskOrdering, UnresolvedPolicy};

/// Planner configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// mode = "equal_split"
/// order_by = "input"
/// unresolved_dependencies = "reject"
///
/// [default]
/// estimated_hours = 1
/// total_hours = 40
/// start = "2026-01-05T09:00:00Z"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawPlannerConfig {
    /// Engine behaviour from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Fallback request settings from `[default]`.
    #[serde(default)]
    pub default: DefaultSection,
}

/// Validated planner configuration.
///
/// Only obtainable through `TryFrom<RawPlannerConfig>` (see
/// `config::validate`) or [`PlannerConfig::default`].
#[derive(Debug, Clone, Default)]
pub struct PlannerConfig {
    pub config: ConfigSection,
    pub default: DefaultSection,
}

impl PlannerConfig {
    pub(crate) fn new_unchecked(config: ConfigSection, default: DefaultSection) -> Self {
        Self { config, default }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigSection {
    /// `"equal_split"` (default) or `"per_estimate"`.
    #[serde(default)]
    pub mode: AllocationMode,

    /// `"input"` (default) or `"due_date"`.
    #[serde(default)]
    pub order_by: TaskOrdering,

    /// `"reject"` (default) or `"ignore"`.
    #[serde(default)]
    pub unresolved_dependencies: UnresolvedPolicy,
}

/// `[default]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultSection {
    /// Estimate for tasks that do not declare `estimatedHours`.
    #[serde(default = "default_estimated_hours")]
    pub estimated_hours: u32,

    /// Budget used when neither the request nor the command line gives one.
    #[serde(default)]
    pub total_hours: Option<f64>,

    /// Start instant used when neither the request nor the command line gives one.
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub start: Option<DateTime<Utc>>,
}

fn default_estimated_hours() -> u32 {
    1
}

impl Default for DefaultSection {
    fn default() -> Self {
        Self {
            estimated_hours: default_estimated_hours(),
            total_hours: None,
            start: None,
        }
    }
}
