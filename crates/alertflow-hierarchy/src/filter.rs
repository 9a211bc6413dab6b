//! Per-level multi-select filtering of records.
//!
//! AND across levels, OR within a level. A level with no selected values
//! imposes no constraint. Values are matched against the placeholder-aware
//! label, so selecting "Unknown Feed" keeps records with a blank feed.
//!
//! An optional free-text search term is ANDed with the level filters: a
//! record passes when any of its text fields contains the term, ignoring
//! case.

use std::collections::{BTreeMap, BTreeSet};

use alertflow_model::{Level, RecordField, WorkflowRecord};
use serde::{Deserialize, Serialize};

use crate::{HierarchyError, HierarchyResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    /// Never holds an empty set: deselecting the last value drops the level.
    levels: BTreeMap<Level, BTreeSet<String>>,
    /// Lower-cased, never blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from `(level name, value)` pairs.
    pub fn from_pairs<I, L, V>(pairs: I) -> HierarchyResult<Self>
    where
        I: IntoIterator<Item = (L, V)>,
        L: AsRef<str>,
        V: Into<String>,
    {
        let mut selection = Self::new();
        for (level, value) in pairs {
            selection.select(level.as_ref(), value)?;
        }
        Ok(selection)
    }

    /// Add one `LEVEL=VALUE` expression, as given on a command line.
    pub fn apply_expression(&mut self, expr: &str) -> HierarchyResult<()> {
        let (level, value) = expr
            .split_once('=')
            .ok_or_else(|| HierarchyError::InvalidFilterExpression(expr.to_string()))?;
        let (level, value) = (level.trim(), value.trim());
        if level.is_empty() || value.is_empty() {
            return Err(HierarchyError::InvalidFilterExpression(expr.to_string()));
        }
        self.select(level, value)
    }

    pub fn select(&mut self, level: &str, value: impl Into<String>) -> HierarchyResult<()> {
        self.select_level(level.parse()?, value);
        Ok(())
    }

    pub fn select_level(&mut self, level: Level, value: impl Into<String>) {
        self.levels.entry(level).or_default().insert(value.into());
    }

    /// Returns whether the value was selected.
    pub fn deselect(&mut self, level: &str, value: &str) -> HierarchyResult<bool> {
        Ok(self.deselect_level(level.parse()?, value))
    }

    pub fn deselect_level(&mut self, level: Level, value: &str) -> bool {
        let Some(values) = self.levels.get_mut(&level) else {
            return false;
        };
        let removed = values.remove(value);
        if values.is_empty() {
            self.levels.remove(&level);
        }
        removed
    }

    /// Select the value if absent, deselect it if present. Returns `true`
    /// if the value is selected afterwards. Toggling twice is a no-op.
    pub fn toggle(&mut self, level: &str, value: &str) -> HierarchyResult<bool> {
        Ok(self.toggle_level(level.parse()?, value))
    }

    pub fn toggle_level(&mut self, level: Level, value: &str) -> bool {
        if self.deselect_level(level, value) {
            false
        } else {
            self.select_level(level, value);
            true
        }
    }

    pub fn clear_level(&mut self, level: &str) -> HierarchyResult<()> {
        let level: Level = level.parse()?;
        self.levels.remove(&level);
        Ok(())
    }

    /// Drops every level constraint and the search term.
    pub fn clear(&mut self) {
        self.levels.clear();
        self.search = None;
    }

    /// Set the free-text search term. A blank term clears the search.
    pub fn set_search(&mut self, term: &str) {
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_lowercase());
    }

    pub fn clear_search(&mut self) {
        self.search = None;
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// True when there is no search term or some text field of `record`
    /// contains it.
    pub fn matches_search(&self, record: &WorkflowRecord) -> bool {
        let Some(term) = &self.search else {
            return true;
        };
        RecordField::ALL
            .iter()
            .filter_map(|f| f.text_of(record))
            .any(|text| text.to_lowercase().contains(term.as_str()))
    }

    pub fn values(&self, level: Level) -> Option<&BTreeSet<String>> {
        self.levels.get(&level)
    }

    pub fn is_selected(&self, level: Level, value: &str) -> bool {
        self.levels.get(&level).is_some_and(|v| v.contains(value))
    }

    /// True when nothing constrains the records.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty() && self.search.is_none()
    }

    pub fn active_levels(&self) -> impl Iterator<Item = Level> + '_ {
        self.levels.keys().copied()
    }

    /// Merge another selection into this one (union per level). The other
    /// search term applies only if this selection has none.
    pub fn extend(&mut self, other: &FilterSelection) {
        if self.search.is_none() {
            self.search.clone_from(&other.search);
        }
        for (level, values) in &other.levels {
            self.levels
                .entry(*level)
                .or_default()
                .extend(values.iter().cloned());
        }
    }

    pub fn allows(&self, record: &WorkflowRecord) -> bool {
        self.matches_search(record)
            && self
                .levels
                .iter()
                .all(|(level, values)| values.is_empty() || values.contains(&level.label_of(record)))
    }
}

/// Records that satisfy every active level of `filters`, in input order.
pub fn project(records: &[WorkflowRecord], filters: &FilterSelection) -> Vec<WorkflowRecord> {
    if filters.is_empty() {
        return records.to_vec();
    }
    let kept: Vec<WorkflowRecord> = records
        .iter()
        .filter(|r| filters.allows(r))
        .cloned()
        .collect();

    tracing::debug!(
        total = records.len(),
        kept = kept.len(),
        levels = filters.levels.len(),
        search = filters.search.as_deref().unwrap_or(""),
        "Projected records through filters"
    );
    kept
}
