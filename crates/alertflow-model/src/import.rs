//! Import boundary for spreadsheet-style rows.
//!
//! A [`RawImportedRow`] maps arbitrary column headers to loosely-typed
//! values. [`RawImportedRow::into_record`] matches headers against known
//! aliases and coerces every field, substituting defaults for anything
//! missing or unparseable. The resulting [`WorkflowRecord`] is strict.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::field::normalize_header;
use crate::{Level, ModelError, Owner, Priority, RecordField, WorkflowRecord};

pub const DEFAULT_SCM_FEEDNAME: &str = "Unknown SCM Feed";

/// Render a cell as trimmed text. Null and nested values are treated as blank.
fn cell_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn parse_priority(text: &str) -> Priority {
    match text.to_ascii_lowercase().as_str() {
        "high" => Priority::High,
        "low" => Priority::Low,
        _ => Priority::Medium,
    }
}

fn parse_owner(text: &str) -> Owner {
    match text.to_ascii_lowercase().as_str() {
        "tech" => Owner::Tech,
        "dm" => Owner::Dm,
        _ => Owner::Ops,
    }
}

fn parse_validated(text: &str) -> bool {
    matches!(
        text.to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

/// Positive integer counts pass through; anything else becomes 1.
fn parse_alert_count(value: &Value) -> u64 {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n > 0 => n,
        _ => 1,
    }
}

/// One untyped row as produced by a spreadsheet or CSV reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawImportedRow {
    pub cells: BTreeMap<String, Value>,
}

impl RawImportedRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, header: &str, value: impl Into<Value>) -> Self {
        self.cells.insert(header.to_string(), value.into());
        self
    }

    /// First non-blank cell whose header matches one of the field's aliases.
    fn lookup(&self, field: RecordField) -> Option<&Value> {
        let aliases = field.aliases();
        self.cells
            .iter()
            .filter(|(header, _)| aliases.contains(&normalize_header(header).as_str()))
            .map(|(_, value)| value)
            .find(|value| cell_text(value).is_some())
    }

    fn text(&self, field: RecordField) -> Option<String> {
        self.lookup(field).and_then(cell_text)
    }

    /// Names of canonical fields this row does not supply.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        RecordField::ALL
            .iter()
            .filter(|f| self.lookup(**f).is_none())
            .map(|f| f.name())
            .collect()
    }

    /// Coerce into a strict record, defaulting every missing value.
    pub fn into_record(self) -> WorkflowRecord {
        let level_text =
            |field: RecordField, level: Level| self.text(field).unwrap_or_else(|| level.placeholder());

        WorkflowRecord {
            director_project: level_text(RecordField::Project, Level::Project),
            director_feedname: level_text(RecordField::Feed, Level::Feed),
            scm_feedname: self
                .text(RecordField::ScmFeed)
                .unwrap_or_else(|| DEFAULT_SCM_FEEDNAME.to_string()),
            match_process: level_text(RecordField::MatchProcess, Level::MatchProcess),
            scm_source: level_text(RecordField::Source, Level::Source),
            workflow: level_text(RecordField::Workflow, Level::Workflow),
            state: level_text(RecordField::State, Level::State),
            priority: self
                .text(RecordField::Priority)
                .map(|t| parse_priority(&t))
                .unwrap_or_default(),
            validated: self
                .text(RecordField::Validated)
                .map(|t| parse_validated(&t))
                .unwrap_or(false),
            owner: self
                .text(RecordField::Owner)
                .map(|t| parse_owner(&t))
                .unwrap_or_default(),
            alert_count: Some(self.lookup(RecordField::AlertCount).map_or(1, parse_alert_count)),
        }
    }
}

/// Parse a JSON array of row objects and coerce each into a record.
pub fn import_rows(json: &str) -> Result<Vec<WorkflowRecord>, ModelError> {
    let values: Vec<Value> = serde_json::from_str(json)?;

    let mut rows = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match value {
            Value::Object(map) => rows.push(RawImportedRow {
                cells: map.into_iter().collect(),
            }),
            other => {
                tracing::warn!(index, kind = %json_kind(&other), "Rejected non-object import row");
                return Err(ModelError::Import(format!(
                    "row {index} is a {}, expected an object",
                    json_kind(&other)
                )));
            }
        }
    }

    let defaulted: BTreeSet<&'static str> =
        rows.iter().flat_map(|r| r.missing_fields()).collect();
    if !defaulted.is_empty() {
        tracing::debug!(
            rows = rows.len(),
            fields = ?defaulted,
            "Defaulted missing columns during import"
        );
    }

    Ok(rows.into_iter().map(RawImportedRow::into_record).collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
