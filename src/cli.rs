// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::engine::{Overrides, PlanCommand};
use crate::request::parse_instant;
use crate::types::{AllocationMode, TaskOrdering};

/// Command-line arguments for `taskplan`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskplan",
    version,
    about = "Order dependent tasks and allocate working hours to them.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the planner config (TOML).
    ///
    /// Default: `Taskplan.toml` in the current working directory, if present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKPLAN_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Order tasks so every task comes after its dependencies.
    Resolve(RequestArgs),
    /// Allocate hours in request order, without dependency resolution.
    Allocate(RequestArgs),
    /// Resolve dependencies, then allocate hours in that order.
    Plan(RequestArgs),
}

impl Command {
    pub fn split(&self) -> (PlanCommand, &RequestArgs) {
        match self {
            Command::Resolve(args) => (PlanCommand::Resolve, args),
            Command::Allocate(args) => (PlanCommand::Allocate, args),
            Command::Plan(args) => (PlanCommand::Plan, args),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct RequestArgs {
    /// Request files (JSON). Each one is planned independently.
    #[arg(required = true, value_name = "REQUEST")]
    pub requests: Vec<PathBuf>,

    /// Start instant (RFC 3339 or YYYY-MM-DD), overriding request and config.
    #[arg(long, value_parser = parse_instant, value_name = "INSTANT")]
    pub start: Option<DateTime<Utc>>,

    /// Total hours available, overriding request and config.
    #[arg(long, value_name = "HOURS", allow_negative_numbers = true)]
    pub total_hours: Option<f64>,

    /// How hours are divided among tasks.
    #[arg(long, value_enum)]
    pub mode: Option<AllocationMode>,

    /// Order tasks are considered in before resolution/allocation.
    #[arg(long, value_enum)]
    pub order_by: Option<TaskOrdering>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write the report to this file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl RequestArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            start: self.start,
            total_hours: self.total_hours,
            mode: self.mode,
            order_by: self.order_by,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
