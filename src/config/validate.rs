// src/config/validate.rs

use crate::config::model::{PlannerConfig, RawPlannerConfig};
use crate::errors::{PlannerError, Result};

impl TryFrom<RawPlannerConfig> for PlannerConfig {
    type Error = crate::errors::PlannerError;

    fn try_from(raw: RawPlannerConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(PlannerConfig::new_unchecked(raw.config, raw.default))
    }
}

fn validate_raw_config(cfg: &RawPlannerConfig) -> Result<()> {
    validate_default_budget(cfg)?;
    Ok(())
}

fn validate_default_budget(cfg: &RawPlannerConfig) -> Result<()> {
    // Mode, ordering and policy are strongly typed and checked during
    // deserialization; only the numeric budget needs a semantic check.
    if let Some(hours) = cfg.default.total_hours {
        if !hours.is_finite() || hours <= 0.0 {
            return Err(PlannerError::ConfigError(format!(
                "[default].total_hours must be a positive number of hours (got {hours})"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_default_budget_is_rejected() {
        let mut raw = RawPlannerConfig::default();
        raw.default.total_hours = Some(0.0);

        match PlannerConfig::try_from(raw) {
            Err(PlannerError::ConfigError(msg)) => assert!(msg.contains("total_hours")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn empty_config_is_valid() {
        let cfg = PlannerConfig::try_from(RawPlannerConfig::default()).unwrap();
        assert_eq!(cfg.default.estimated_hours, 1);
        assert_eq!(cfg.default.total_hours, None);
    }
}
