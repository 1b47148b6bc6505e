// src/config/mod.rs

//! Planner configuration.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file through the filesystem layer (`loader.rs`).
//! - Validate the raw config into a [`PlannerConfig`] (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{ConfigSection, DefaultSection, PlannerConfig, RawPlannerConfig};
