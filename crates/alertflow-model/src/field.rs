//! Named record fields, shared by import header matching, free-text search
//! and table sorting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ModelError, WorkflowRecord};

/// Every column of a [`WorkflowRecord`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    #[default]
    Project,
    Feed,
    ScmFeed,
    MatchProcess,
    Source,
    Workflow,
    State,
    Priority,
    Validated,
    Owner,
    AlertCount,
}

impl RecordField {
    pub const ALL: [RecordField; 11] = [
        RecordField::Project,
        RecordField::Feed,
        RecordField::ScmFeed,
        RecordField::MatchProcess,
        RecordField::Source,
        RecordField::Workflow,
        RecordField::State,
        RecordField::Priority,
        RecordField::Validated,
        RecordField::Owner,
        RecordField::AlertCount,
    ];

    /// Normalized header spellings that map onto this field.
    pub(crate) fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Project => &["directorproject", "project"],
            Self::Feed => &["directorfeedname", "directorfeed", "feedname", "feed"],
            Self::ScmFeed => &["scmfeedname", "scmfeed"],
            Self::MatchProcess => &["matchprocess", "match", "process"],
            Self::Source => &["scmsource", "source"],
            Self::Workflow => &["workflow", "workflowname"],
            Self::State => &["state", "status", "endstate"],
            Self::Priority => &["priority"],
            Self::Validated => &["validated", "isvalidated"],
            Self::Owner => &["owner", "team"],
            Self::AlertCount => &["alertcount", "alerts", "count"],
        }
    }

    /// Serialized (camelCase) name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Project => "directorProject",
            Self::Feed => "directorFeedname",
            Self::ScmFeed => "scmFeedname",
            Self::MatchProcess => "matchProcess",
            Self::Source => "scmSource",
            Self::Workflow => "workflow",
            Self::State => "state",
            Self::Priority => "priority",
            Self::Validated => "validated",
            Self::Owner => "owner",
            Self::AlertCount => "alertCount",
        }
    }

    /// Fields holding free text (everything except `validated` and `alertCount`).
    pub fn is_text(&self) -> bool {
        !matches!(self, Self::Validated | Self::AlertCount)
    }

    /// The raw value of a text field; `None` for `validated` and `alertCount`.
    pub fn text_of<'a>(&self, record: &'a WorkflowRecord) -> Option<&'a str> {
        match self {
            Self::Project => Some(&record.director_project),
            Self::Feed => Some(&record.director_feedname),
            Self::ScmFeed => Some(&record.scm_feedname),
            Self::MatchProcess => Some(&record.match_process),
            Self::Source => Some(&record.scm_source),
            Self::Workflow => Some(&record.workflow),
            Self::State => Some(&record.state),
            Self::Priority => Some(record.priority.as_str()),
            Self::Owner => Some(record.owner.as_str()),
            Self::Validated | Self::AlertCount => None,
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RecordField {
    type Err = ModelError;

    /// Accepts any header alias, ignoring case and punctuation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_header(s);
        Self::ALL
            .into_iter()
            .find(|f| f.aliases().contains(&key.as_str()))
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

/// Lower-case and strip everything but ASCII alphanumerics, so
/// `"Director Project"`, `"director_project"` and `"directorProject"` agree.
pub(crate) fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}
