//! Run configuration
use rmr_core::{Result, RmrError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which rules to run and what to do afterwards.
///
/// ```yaml
/// rules: ["6a", "19a"]
/// save_instances: true
/// log_filter: "rmr_rules=debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Rule codes, or `"all"`
    pub rules: Vec<String>,
    /// Write the three stage documents after the run
    pub save_instances: bool,
    /// Filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            rules: vec![crate::registry::ALL.to_string()],
            save_instances: false,
            log_filter: "info".to_string(),
        }
    }
}

impl CheckConfig {
    /// Config that runs exactly `rules`
    pub fn for_rules<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: rules.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| RmrError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| RmrError::io(path, e))?;
        Self::from_yaml(&yaml)
    }
}
