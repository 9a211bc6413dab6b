//! The six hierarchy levels and their ordering.
//!
//! Every record maps to one label per level. Blank values resolve to a
//! placeholder (`"Unknown Feed"`, ...) so grouping never drops a record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ModelError, ModelResult, WorkflowRecord};

/// A fixed position in the project → feed → source → match process →
/// workflow → state hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Level {
    Project,
    Feed,
    Source,
    MatchProcess,
    Workflow,
    State,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Project,
        Level::Feed,
        Level::Source,
        Level::MatchProcess,
        Level::Workflow,
        Level::State,
    ];

    /// Canonical API name, as accepted by filters and config files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Feed => "feed",
            Self::Source => "source",
            Self::MatchProcess => "matchProcess",
            Self::Workflow => "workflow",
            Self::State => "state",
        }
    }

    /// Human-readable name used in placeholder labels.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Feed => "Feed",
            Self::Source => "Source",
            Self::MatchProcess => "Match Process",
            Self::Workflow => "Workflow",
            Self::State => "State",
        }
    }

    /// Label substituted when a record has no value at this level.
    pub fn placeholder(&self) -> String {
        format!("Unknown {}", self.display_name())
    }

    /// Depth of this level in the canonical order.
    pub fn canonical_depth(&self) -> usize {
        match self {
            Self::Project => 0,
            Self::Feed => 1,
            Self::Source => 2,
            Self::MatchProcess => 3,
            Self::Workflow => 4,
            Self::State => 5,
        }
    }

    /// Raw field value of `record` at this level, possibly blank.
    pub fn raw_value<'a>(&self, record: &'a WorkflowRecord) -> &'a str {
        match self {
            Self::Project => &record.director_project,
            Self::Feed => &record.director_feedname,
            Self::Source => &record.scm_source,
            Self::MatchProcess => &record.match_process,
            Self::Workflow => &record.workflow,
            Self::State => &record.state,
        }
    }

    /// Grouping label of `record` at this level, with placeholder fallback.
    pub fn label_of(&self, record: &WorkflowRecord) -> String {
        let raw = self.raw_value(record);
        if raw.trim().is_empty() {
            self.placeholder()
        } else {
            raw.to_string()
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Level {
    type Err = ModelError;

    /// Accepts canonical names, record field names and snake_case spellings,
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "project" | "directorproject" => Ok(Self::Project),
            "feed" | "feedname" | "directorfeedname" => Ok(Self::Feed),
            "source" | "scmsource" => Ok(Self::Source),
            "matchprocess" | "match" => Ok(Self::MatchProcess),
            "workflow" => Ok(Self::Workflow),
            "state" => Ok(Self::State),
            _ => Err(ModelError::UnknownLevel(s.to_string())),
        }
    }
}

/// Order in which levels nest. Always a permutation of all six levels;
/// a level's depth is its index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LevelOrder {
    levels: [Level; 6],
}

impl LevelOrder {
    pub fn canonical() -> Self {
        Self { levels: Level::ALL }
    }

    pub fn new(levels: Vec<Level>) -> ModelResult<Self> {
        let levels: [Level; 6] = levels.try_into().map_err(|v: Vec<Level>| {
            ModelError::InvalidLevelOrder(format!("expected 6 levels, got {}", v.len()))
        })?;
        for (i, level) in levels.iter().enumerate() {
            if levels[..i].contains(level) {
                return Err(ModelError::InvalidLevelOrder(format!(
                    "level '{level}' appears more than once"
                )));
            }
        }
        Ok(Self { levels })
    }

    /// Parse an order from level names, e.g. from a config file.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> ModelResult<Self> {
        let levels = names
            .iter()
            .map(|n| n.as_ref().parse::<Level>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(levels)
    }

    pub fn levels(&self) -> &[Level; 6] {
        &self.levels
    }

    pub fn depth_of(&self, level: Level) -> usize {
        self.levels
            .iter()
            .position(|l| *l == level)
            .unwrap_or_else(|| level.canonical_depth())
    }

    /// Label path of `record` in this order, placeholders applied.
    pub fn path_of(&self, record: &WorkflowRecord) -> [String; 6] {
        self.levels.map(|level| level.label_of(record))
    }
}

impl Default for LevelOrder {
    fn default() -> Self {
        Self::canonical()
    }
}
