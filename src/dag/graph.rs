// src/dag/graph.rs

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::errors::ScheduleError;
use crate::request::{TaskId, TaskSpec};
use crate::types::UnresolvedPolicy;

/// Dependency graph for one scheduling request.
///
/// Nodes are addressed by their position in the request's task list, which is
/// also the tie-break order used by the resolver. The graph is built once and
/// never mutated; the resolver works on a copy of the in-degree counts.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    ids: Vec<TaskId>,
    index: HashMap<TaskId, usize>,
    /// Forward edges: `dependents[p]` lists tasks that wait for task `p`.
    dependents: Vec<Vec<usize>>,
    /// Number of distinct dependencies of each task.
    in_degree: Vec<usize>,
}

impl DependencyGraph {
    /// Build the graph from a request's tasks.
    ///
    /// Fails if a task has no identity, an identity repeats, or a dependency
    /// reference is ambiguous. Unknown references fail under
    /// [`UnresolvedPolicy::Reject`] and are dropped under
    /// [`UnresolvedPolicy::Ignore`].
    pub fn build(tasks: &[TaskSpec], policy: UnresolvedPolicy) -> Result<Self, ScheduleError> {
        let mut ids = Vec::with_capacity(tasks.len());
        let mut index = HashMap::with_capacity(tasks.len());

        // First pass: identities.
        for (position, task) in tasks.iter().enumerate() {
            let id = task
                .identity()
                .ok_or(ScheduleError::MissingIdentity { position })?;
            if index.insert(id.clone(), position).is_some() {
                return Err(ScheduleError::DuplicateTask(id));
            }
            ids.push(id);
        }

        let mut by_title: HashMap<&str, Vec<usize>> = HashMap::new();
        for (position, task) in tasks.iter().enumerate() {
            if !task.title.is_empty() {
                by_title.entry(task.title.as_str()).or_default().push(position);
            }
        }

        let mut dependents = vec![Vec::new(); tasks.len()];
        let mut in_degree = vec![0usize; tasks.len()];

        // Second pass: edges, dependency -> dependent.
        for (position, task) in tasks.iter().enumerate() {
            let mut seen = HashSet::new();
            for dep in task.dependencies.iter() {
                let target = match lookup(&index, &by_title, dep) {
                    Lookup::Found(target) => target,
                    Lookup::Ambiguous => {
                        return Err(ScheduleError::AmbiguousDependency {
                            task: ids[position].clone(),
                            dependency: dep.clone(),
                        });
                    }
                    Lookup::Missing => match policy {
                        UnresolvedPolicy::Reject => {
                            return Err(ScheduleError::UnresolvedDependency {
                                task: ids[position].clone(),
                                dependency: dep.clone(),
                            });
                        }
                        UnresolvedPolicy::Ignore => {
                            warn!(
                                task = %ids[position],
                                dependency = %dep,
                                "ignoring dependency on unknown task"
                            );
                            continue;
                        }
                    },
                };

                if !seen.insert(target) {
                    continue;
                }
                dependents[target].push(position);
                in_degree[position] += 1;
            }
        }

        debug!(
            tasks = ids.len(),
            edges = in_degree.iter().sum::<usize>(),
            "built dependency graph"
        );

        Ok(Self {
            ids,
            index,
            dependents,
            in_degree,
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Tasks that directly depend on `id`, in request order.
    pub fn dependents_of(&self, id: &TaskId) -> Vec<&TaskId> {
        self.index
            .get(id)
            .map(|&p| self.dependents[p].iter().map(|&d| &self.ids[d]).collect())
            .unwrap_or_default()
    }

    /// Number of distinct dependencies of `id`, or `None` for unknown tasks.
    pub fn in_degree_of(&self, id: &TaskId) -> Option<usize> {
        self.index.get(id).map(|&p| self.in_degree[p])
    }

    pub(crate) fn id_at(&self, position: usize) -> &TaskId {
        &self.ids[position]
    }

    pub(crate) fn dependents_at(&self, position: usize) -> &[usize] {
        &self.dependents[position]
    }

    pub(crate) fn in_degrees(&self) -> &[usize] {
        &self.in_degree
    }
}

enum Lookup {
    Found(usize),
    Ambiguous,
    Missing,
}

/// Resolve a reference by identity first, then by a unique title.
fn lookup(index: &HashMap<TaskId, usize>, by_title: &HashMap<&str, Vec<usize>>, dep: &TaskId) -> Lookup {
    if let Some(&position) = index.get(dep) {
        return Lookup::Found(position);
    }
    match by_title.get(dep.as_str()).map(Vec::as_slice) {
        Some([only]) => Lookup::Found(*only),
        Some(many) if many.len() > 1 => Lookup::Ambiguous,
        _ => Lookup::Missing,
    }
}
