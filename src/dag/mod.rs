// src/dag/mod.rs

//! Dependency resolution.
//!
//! - [`graph`] builds the per-request dependency graph (forward edges plus
//!   in-degree counts) and validates every reference.
//! - [`resolver`] produces a deterministic topological order with Kahn's
//!   algorithm, or a cycle failure.
//! - [`cycles`] names the tasks that form each cycle when resolution fails.

pub mod cycles;
pub mod graph;
pub mod resolver;

pub use graph::DependencyGraph;
pub use resolver::{resolve, resolve_tasks, topological_order, ResolvedOrder};
