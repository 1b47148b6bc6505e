// src/config/loader.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{PlannerConfig, RawPlannerConfig};
use crate::errors::Result;
use crate::fs::FileSystem;

/// Load a configuration file from a given path and return the raw `RawPlannerConfig`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawPlannerConfig> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path)?;

    let config: RawPlannerConfig = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks the `[default]` budget.
pub fn load_and_validate(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<PlannerConfig> {
    let raw_config = load_from_path(fs, &path)?;
    let config = PlannerConfig::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the configuration used by a run.
///
/// An explicitly given path must exist. Without one, `Taskplan.toml` in the
/// working directory is used if present, and built-in defaults otherwise.
pub fn load_or_default(fs: &dyn FileSystem, explicit: Option<&Path>) -> Result<PlannerConfig> {
    if let Some(path) = explicit {
        return load_and_validate(fs, path);
    }

    let path = default_config_path();
    if fs.is_file(&path) {
        load_and_validate(fs, &path)
    } else {
        debug!(path = ?path, "no planner config found; using built-in defaults");
        Ok(PlannerConfig::default())
    }
}

/// Default config location: `Taskplan.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Taskplan.toml")
}
