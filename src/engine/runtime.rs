// src/engine/runtime.rs

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::config::PlannerConfig;
use crate::errors::Result;
use crate::report::PlanReport;

use super::core::Planner;
use super::{Overrides, PlanJob};

/// Serve a batch of requests concurrently.
///
/// Each job runs on Tokio's blocking pool with its own [`Planner`]; only the
/// immutable config and overrides are shared. Reports come back in
/// submission order, whatever order the jobs finish in.
pub async fn run_batch(
    config: Arc<PlannerConfig>,
    overrides: Arc<Overrides>,
    jobs: Vec<PlanJob>,
) -> Result<Vec<PlanReport>> {
    let total = jobs.len();
    info!(jobs = total, "planning batch started");

    let mut set = JoinSet::new();
    for (index, job) in jobs.into_iter().enumerate() {
        let config = Arc::clone(&config);
        let overrides = Arc::clone(&overrides);
        set.spawn_blocking(move || {
            let planner = Planner::new(&config, &overrides);
            (index, planner.report(&job.source, job.command, &job.request))
        });
    }

    let mut slots: Vec<Option<PlanReport>> = (0..total).map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        let (index, report) = joined.map_err(anyhow::Error::from)?;
        debug!(index, source = %report.source, "job finished");
        slots[index] = Some(report);
    }

    let reports: Vec<PlanReport> = slots.into_iter().flatten().collect();
    info!(
        jobs = reports.len(),
        failed = reports.iter().filter(|r| r.status.is_failure()).count(),
        "planning batch finished"
    );
    Ok(reports)
}
