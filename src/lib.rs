// src/lib.rs

pub mod alloc;
pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod report;
pub mod request;
pub mod types;

use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::{CliArgs, OutputFormat};
use crate::config::load_or_default;
use crate::engine::{run_batch, PlanJob};
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::report::{render_json, render_text, PlanReport};
use crate::request::load_request;

/// What a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub reports: Vec<PlanReport>,
}

impl RunSummary {
    /// Whether any request was rejected by validation.
    pub fn has_failures(&self) -> bool {
        self.reports.iter().any(|r| r.status.is_failure())
    }
}

/// High-level entry point used by `main.rs`.
pub async fn run(args: CliArgs) -> Result<RunSummary> {
    run_with_fs(args, Arc::new(RealFileSystem)).await
}

/// Same as [`run`], with every file access going through `fs`.
///
/// This wires together:
/// - config loading
/// - request loading
/// - the batch runtime
/// - report rendering and output
pub async fn run_with_fs(args: CliArgs, fs: Arc<dyn FileSystem>) -> Result<RunSummary> {
    let config = load_or_default(fs.as_ref(), args.config.as_deref())?;
    debug!(?config, "planner config loaded");

    let (command, request_args) = args.command.split();
    let overrides = request_args.overrides();

    let mut jobs = Vec::with_capacity(request_args.requests.len());
    for path in request_args.requests.iter() {
        jobs.push(PlanJob {
            source: path.display().to_string(),
            command,
            request: load_request(fs.as_ref(), path)?,
        });
    }
    info!(%command, requests = jobs.len(), "requests loaded");

    let reports = run_batch(Arc::new(config), Arc::new(overrides), jobs).await?;

    let rendered = match request_args.format {
        OutputFormat::Json => render_json(&reports)?,
        OutputFormat::Text => render_text(&reports),
    };

    match &request_args.output {
        Some(path) => {
            fs.write(path, rendered.as_bytes())?;
            info!(path = ?path, "report written");
        }
        None => println!("{rendered}"),
    }

    Ok(RunSummary { reports })
}
