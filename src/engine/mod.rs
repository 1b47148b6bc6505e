// src/engine/mod.rs

//! Planning engine.
//!
//! This module ties together:
//! - effective settings (command line, request, config precedence)
//! - the dependency resolver and time allocator
//! - the batch runtime that serves many requests concurrently
//!
//! The pure, request-scoped [`Planner`] lives in [`core`]; the async shell
//! that fans requests out over Tokio's blocking pool is in [`runtime`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::request::ScheduleRequest;
use crate::types::{AllocationMode, TaskOrdering};

/// Which engine operation a request is run through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanCommand {
    /// Dependency order only.
    Resolve,
    /// Time allocation in the effective order, without dependency resolution.
    Allocate,
    /// Dependency order, then time allocation.
    Plan,
}

impl fmt::Display for PlanCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanCommand::Resolve => f.write_str("resolve"),
            PlanCommand::Allocate => f.write_str("allocate"),
            PlanCommand::Plan => f.write_str("plan"),
        }
    }
}

/// Settings given on the command line; they win over the request and config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub start: Option<DateTime<Utc>>,
    pub total_hours: Option<f64>,
    pub mode: Option<AllocationMode>,
    pub order_by: Option<TaskOrdering>,
}

/// One unit of work for the batch runtime.
#[derive(Debug, Clone)]
pub struct PlanJob {
    /// Where the request came from (file path), echoed in the report.
    pub source: String,
    pub command: PlanCommand,
    pub request: ScheduleRequest,
}

pub mod core;
pub mod runtime;
pub mod settings;

pub use self::core::Planner;
pub use runtime::run_batch;
pub use settings::EffectiveSettings;
