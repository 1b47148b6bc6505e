// src/request/model.rs

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{AllocationMode, TaskOrdering};

/// Caller-assigned task identity.
///
/// Requests may use JSON strings or integers; integers are normalised to
/// their decimal form so `7` and `"7"` name the same task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for TaskId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => TaskId(s),
            RawId::Number(n) => TaskId::from(n),
        })
    }
}

/// One task of a scheduling request.
///
/// Mirrors the JSON shape:
///
/// ```json
/// { "id": 3, "title": "Build", "estimatedHours": 4,
///   "dueDate": "2026-01-09", "dependencies": ["Design"] }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSpec {
    /// Stable identifier; when absent the title doubles as identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,

    #[serde(default)]
    pub title: String,

    /// Effort in whole hours. `None` falls back to the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<u32>,

    #[serde(
        default,
        deserialize_with = "deserialize_optional_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,

    /// Identities (or titles) of tasks that must come before this one.
    #[serde(default)]
    pub dependencies: Vec<TaskId>,

    /// Finished tasks are left out of planning.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_completed: bool,
}

impl TaskSpec {
    /// The identity the engine uses for this task: the id, or the title when
    /// no id was given. `None` if both are missing.
    pub fn identity(&self) -> Option<TaskId> {
        match &self.id {
            Some(id) => Some(id.clone()),
            None if !self.title.trim().is_empty() => Some(TaskId::new(self.title.clone())),
            None => None,
        }
    }

    /// Title to display, falling back to the identity.
    pub fn display_title(&self) -> String {
        if self.title.is_empty() {
            self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
        } else {
            self.title.clone()
        }
    }

    pub fn effective_estimated_hours(&self, default_estimated_hours: u32) -> u32 {
        self.estimated_hours.unwrap_or(default_estimated_hours)
    }
}

/// A full scheduling request as read from a JSON file.
///
/// Everything but `tasks` is optional; missing settings are filled in from
/// command-line overrides and then from the planner config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub start: Option<DateTime<Utc>>,

    #[serde(default)]
    pub total_hours: Option<f64>,

    #[serde(default)]
    pub mode: Option<AllocationMode>,

    #[serde(default)]
    pub order_by: Option<TaskOrdering>,

    #[serde(default)]
    pub tasks: Vec<TaskSpec>,
}

impl ScheduleRequest {
    pub fn from_tasks(tasks: Vec<TaskSpec>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }
}

/// Parse an RFC 3339 instant, or a bare `YYYY-MM-DD` date taken as midnight UTC.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid instant '{s}' (expected RFC 3339 or YYYY-MM-DD)"))
}

pub(crate) fn deserialize_optional_instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_instant(&s).map(Some).map_err(serde::de::Error::custom),
    }
}
