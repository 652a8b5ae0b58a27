//! Caller policy configuration
//!
//! The planner itself only reports. A caller that wants stricter rules (for
//! example, treating leftover value-source keys as a failure) describes them
//! here and checks plans with [`PlanPolicy::check`].

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::plan::ConstructionPlan;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How plans are judged before execution
    pub policy: PlanPolicy,
}

impl Config {
    /// Read a policy file; absent keys take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).context(format!("Failed to read config file: {}", path.display()))?;
        let config: Self =
            serde_yaml::from_str(&content).context(format!("Failed to parse config file: {}", path.display()))?;
        debug!(path = %path.display(), policy = ?config.policy, "Loaded plan policy");
        Ok(config)
    }

    /// Write the config as YAML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        fs::write(path, content).context(format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

/// What to do with value-source keys nothing consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnusedEntries {
    #[default]
    Ignore,
    Reject,
}

/// What to do with warnings (settable members left unset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Warnings {
    #[default]
    Allow,
    Reject,
}

/// Acceptance rules applied on top of a plan's own error count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanPolicy {
    #[serde(rename = "unused-entries")]
    pub unused_entries: UnusedEntries,

    pub warnings: Warnings,
}

/// Why a policy refused a plan
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("Plan has {0} error(s)")]
    HasErrors(usize),

    #[error("Plan left {0} settable member(s) unset")]
    HasWarnings(usize),

    #[error("Unused value source entries: {}", .0.iter().cloned().collect::<Vec<_>>().join(", "))]
    UnusedEntries(BTreeSet<String>),
}

impl PlanPolicy {
    /// A policy that rejects anything short of a clean plan
    pub fn strict() -> Self {
        Self {
            unused_entries: UnusedEntries::Reject,
            warnings: Warnings::Reject,
        }
    }

    /// Check a plan against this policy; plans with errors always fail
    pub fn check<T>(&self, plan: &ConstructionPlan<T>) -> Result<(), PolicyViolation> {
        if plan.error_count() > 0 {
            return Err(PolicyViolation::HasErrors(plan.error_count()));
        }
        if self.warnings == Warnings::Reject && plan.warning_count() > 0 {
            return Err(PolicyViolation::HasWarnings(plan.warning_count()));
        }
        if self.unused_entries == UnusedEntries::Reject && !plan.nonmatching_provider_entries().is_empty() {
            return Err(PolicyViolation::UnusedEntries(plan.nonmatching_provider_entries().clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callable::FnCallable;
    use crate::provider::MapValueProvider;
    use tempfile::TempDir;

    #[derive(Debug, Default)]
    struct Flag {
        on: bool,
    }

    crate::constructible! {
        Flag {
            var on: bool,
        }
    }

    fn plan_for(provider: &MapValueProvider) -> ConstructionPlan<Flag> {
        let ctor = FnCallable::<Flag>::constructor("new").build(|_| Ok(Flag::default()));
        ConstructionPlan::build(ctor, provider).unwrap()
    }

    #[test]
    fn test_default_policy_accepts_warnings_and_unused() {
        let plan = plan_for(&MapValueProvider::new().with("extra", 1));
        assert_eq!(plan.warning_count(), 1);
        assert!(PlanPolicy::default().check(&plan).is_ok());
    }

    #[test]
    fn test_strict_policy() {
        let plan = plan_for(&MapValueProvider::new().with("extra", 1));
        assert_eq!(PlanPolicy::strict().check(&plan), Err(PolicyViolation::HasWarnings(1)));

        let plan = plan_for(&MapValueProvider::new().with("on", true).with("extra", 1));
        let err = PlanPolicy::strict().check(&plan).unwrap_err();
        assert!(err.to_string().contains("extra"));

        let plan = plan_for(&MapValueProvider::new().with("on", true));
        assert!(PlanPolicy::strict().check(&plan).is_ok());
        assert!(plan.execute().unwrap().on);
    }

    #[test]
    fn test_load_from_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("binderplan.yml");
        fs::write(&path, "policy:\n  unused-entries: reject\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.policy.unused_entries, UnusedEntries::Reject);
        assert_eq!(config.policy.warnings, Warnings::Allow);
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.yml");
        let config = Config {
            policy: PlanPolicy::strict(),
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_bad_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yml");
        fs::write(&path, "policy: [not, a, map]\n").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("bad.yml"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let err = Config::load(temp.path().join("absent.yml")).unwrap_err();
        assert!(err.to_string().contains("absent.yml"));
    }

    #[test]
    fn test_empty_policy_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.yml");
        fs::write(&path, "policy: {}\n").unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }
}
