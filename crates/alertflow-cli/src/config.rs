//! TOML configuration.
//!
//! ```toml
//! log_level = "debug"
//!
//! [layout]
//! columnWidth = 240
//! rowHeight = 64
//!
//! [hierarchy]
//! levels = ["project", "feed", "matchProcess", "source", "workflow", "state"]
//!
//! [filters]
//! project = ["Sanctions", "Fraud"]
//!
//! [views]
//! report_name = "Weekly Alert Report"
//! thresholds = { medium = 500, high = 2000 }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use alertflow_hierarchy::{FilterSelection, HierarchyError, LayoutOptions};
use alertflow_model::{LevelOrder, ModelError};
use alertflow_views::SeverityThresholds;

pub const DEFAULT_REPORT_NAME: &str = "Workflow Alert Report";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Custom nesting order; all six levels, each once.
    pub levels: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    pub report_name: String,
    pub thresholds: SeverityThresholds,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            report_name: DEFAULT_REPORT_NAME.to_string(),
            thresholds: SeverityThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertflowConfig {
    /// Log level for alertflow crates when RUST_LOG is unset.
    pub log_level: Option<String>,
    pub layout: LayoutOptions,
    pub hierarchy: HierarchyConfig,
    /// Level name → selected values.
    pub filters: BTreeMap<String, Vec<String>>,
    pub views: ViewsConfig,
}

impl AlertflowConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("alertflow").join("config.toml"))
    }

    /// Load from `path`, or from the default location if it exists.
    /// An explicit path that cannot be read is an error; a missing default
    /// file yields the built-in defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.layout.validate()?;
        self.level_order()?;
        self.filter_selection()?;
        Ok(())
    }

    pub fn level_order(&self) -> Result<LevelOrder, ModelError> {
        match &self.hierarchy.levels {
            Some(names) => LevelOrder::from_names(names),
            None => Ok(LevelOrder::canonical()),
        }
    }

    pub fn filter_selection(&self) -> Result<FilterSelection, HierarchyError> {
        FilterSelection::from_pairs(
            self.filters
                .iter()
                .flat_map(|(level, values)| values.iter().map(move |v| (level, v.clone()))),
        )
    }
}
