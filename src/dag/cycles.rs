// src/dag/cycles.rs

//! Cycle identification for failed resolutions.

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;

use crate::dag::graph::DependencyGraph;
use crate::request::TaskId;

/// Group the blocked tasks of a failed resolution into the cycles that block
/// them.
///
/// Only strongly-connected components that really loop are returned (more
/// than one task, or a task depending on itself). Tasks that are merely
/// downstream of a cycle are left out. Members and components are listed in
/// request order.
pub(crate) fn cycle_components(graph: &DependencyGraph, blocked: &[usize]) -> Vec<Vec<TaskId>> {
    // Edge direction: dependency -> dependent.
    let mut sub: DiGraphMap<usize, ()> = DiGraphMap::new();

    for &position in blocked {
        sub.add_node(position);
    }
    for &position in blocked {
        for &dependent in graph.dependents_at(position) {
            if sub.contains_node(dependent) {
                sub.add_edge(position, dependent, ());
            }
        }
    }

    let mut components: Vec<Vec<usize>> = tarjan_scc(&sub)
        .into_iter()
        .filter(|component| {
            component.len() > 1 || sub.contains_edge(component[0], component[0])
        })
        .map(|mut component| {
            component.sort_unstable();
            component
        })
        .collect();
    components.sort_by_key(|component| component[0]);

    components
        .into_iter()
        .map(|component| {
            component
                .into_iter()
                .map(|position| graph.id_at(position).clone())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::TaskSpec;
    use crate::types::UnresolvedPolicy;

    fn task(id: &str, deps: &[&str]) -> TaskSpec {
        TaskSpec {
            id: Some(TaskId::from(id)),
            dependencies: deps.iter().map(|d| TaskId::from(*d)).collect(),
            ..TaskSpec::default()
        }
    }

    #[test]
    fn separate_cycles_are_listed_separately() {
        let tasks = vec![
            task("A", &["B"]),
            task("B", &["A"]),
            task("C", &["D"]),
            task("D", &["E"]),
            task("E", &["C"]),
        ];
        let graph = DependencyGraph::build(&tasks, UnresolvedPolicy::Reject).unwrap();
        let cycles = cycle_components(&graph, &[0, 1, 2, 3, 4]);

        let as_str: Vec<Vec<&str>> = cycles
            .iter()
            .map(|c| c.iter().map(|t| t.as_str()).collect())
            .collect();
        assert_eq!(as_str, vec![vec!["A", "B"], vec!["C", "D", "E"]]);
    }
}
