// src/dag/resolver.rs

//! Deterministic topological ordering (Kahn's algorithm).
//!
//! Zero-in-degree tasks are seeded in request order and processed FIFO, so
//! for a given input order the output is always the same. Ties are never
//! broken by identity value or hash order.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, warn};

use crate::dag::cycles::cycle_components;
use crate::dag::graph::DependencyGraph;
use crate::errors::ScheduleError;
use crate::request::{TaskId, TaskSpec};
use crate::types::UnresolvedPolicy;

/// Successful resolution: every task, dependencies first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOrder {
    pub order: Vec<TaskId>,
    #[serde(skip)]
    positions: Vec<usize>,
}

impl ResolvedOrder {
    /// Positions of the ordered tasks within the original request.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Order an already-built graph.
///
/// Returns [`ScheduleError::CycleDetected`] with no partial order when some
/// tasks never reach in-degree zero.
pub fn topological_order(graph: &DependencyGraph) -> Result<ResolvedOrder, ScheduleError> {
    let mut in_degree = graph.in_degrees().to_vec();

    let mut queue: VecDeque<usize> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, degree)| **degree == 0)
        .map(|(position, _)| position)
        .collect();

    let mut positions = Vec::with_capacity(graph.len());

    while let Some(current) = queue.pop_front() {
        positions.push(current);

        for &next in graph.dependents_at(current) {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if positions.len() < graph.len() {
        let blocked_positions: Vec<usize> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree > 0)
            .map(|(position, _)| position)
            .collect();

        let blocked: Vec<TaskId> = blocked_positions
            .iter()
            .map(|&p| graph.id_at(p).clone())
            .collect();
        let cycles = cycle_components(graph, &blocked_positions);

        warn!(
            placed = positions.len(),
            total = graph.len(),
            blocked = blocked.len(),
            "dependency cycle detected; discarding partial order"
        );
        return Err(ScheduleError::CycleDetected { blocked, cycles });
    }

    let order = positions.iter().map(|&p| graph.id_at(p).clone()).collect();
    debug!(tasks = graph.len(), "resolved topological order");

    Ok(ResolvedOrder { order, positions })
}

/// Build the graph for `tasks` and order it.
pub fn resolve(tasks: &[TaskSpec], policy: UnresolvedPolicy) -> Result<ResolvedOrder, ScheduleError> {
    let graph = DependencyGraph::build(tasks, policy)?;
    topological_order(&graph)
}

/// Like [`resolve`], but returns the tasks themselves in dependency order.
pub fn resolve_tasks<'a>(
    tasks: &'a [TaskSpec],
    policy: UnresolvedPolicy,
) -> Result<Vec<&'a TaskSpec>, ScheduleError> {
    let resolved = resolve(tasks, policy)?;
    Ok(resolved.positions().iter().map(|&p| &tasks[p]).collect())
}
