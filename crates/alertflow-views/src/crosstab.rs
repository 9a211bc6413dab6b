//! Coverage matrix of one level against another (feeds × match processes
//! by default): which combinations occur and how many alerts they carry.

use alertflow_model::{Level, WorkflowRecord};
use serde::{Deserialize, Serialize};

use crate::grouping::{distinct_values, positions};

/// Alert totals above which a mapped cell is flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityThresholds {
    pub medium: u64,
    pub high: u64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self { medium: 20, high: 50 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    /// No record has this combination.
    Unmapped,
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn classify(exists: bool, alert_count: u64, thresholds: &SeverityThresholds) -> Self {
        if !exists {
            Self::Unmapped
        } else if alert_count > thresholds.high {
            Self::High
        } else if alert_count > thresholds.medium {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossTabCell {
    pub column: String,
    pub exists: bool,
    pub alert_count: u64,
    pub record_count: usize,
    /// Distinct workflows in this cell, first-seen order.
    pub workflows: Vec<String>,
    /// Distinct states in this cell, first-seen order.
    pub states: Vec<String>,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossTabRow {
    pub label: String,
    pub cells: Vec<CrossTabCell>,
    /// Number of columns this row maps to.
    pub mapped: usize,
    pub total_alerts: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossTab {
    pub row_level: Level,
    pub column_level: Level,
    pub columns: Vec<String>,
    pub rows: Vec<CrossTabRow>,
}

impl CrossTab {
    pub fn build(
        records: &[WorkflowRecord],
        row_level: Level,
        column_level: Level,
        thresholds: &SeverityThresholds,
    ) -> Self {
        let row_labels = distinct_values(records, row_level);
        let columns = distinct_values(records, column_level);
        let row_pos = positions(&row_labels);
        let col_pos = positions(&columns);

        let mut grid: Vec<Vec<CrossTabCell>> = row_labels
            .iter()
            .map(|_| {
                columns
                    .iter()
                    .map(|c| CrossTabCell {
                        column: c.clone(),
                        exists: false,
                        alert_count: 0,
                        record_count: 0,
                        workflows: Vec::new(),
                        states: Vec::new(),
                        severity: Severity::Unmapped,
                    })
                    .collect()
            })
            .collect();

        for record in records {
            let (Some(&r), Some(&c)) = (
                row_pos.get(row_level.label_of(record).as_str()),
                col_pos.get(column_level.label_of(record).as_str()),
            ) else {
                continue;
            };
            let cell = &mut grid[r][c];
            cell.exists = true;
            cell.alert_count = cell.alert_count.saturating_add(record.contribution());
            cell.record_count += 1;
            let workflow = Level::Workflow.label_of(record);
            if !cell.workflows.contains(&workflow) {
                cell.workflows.push(workflow);
            }
            let state = Level::State.label_of(record);
            if !cell.states.contains(&state) {
                cell.states.push(state);
            }
        }

        let rows = row_labels
            .into_iter()
            .zip(grid)
            .map(|(label, mut cells)| {
                for cell in &mut cells {
                    cell.severity = Severity::classify(cell.exists, cell.alert_count, thresholds);
                }
                CrossTabRow {
                    label,
                    mapped: cells.iter().filter(|c| c.exists).count(),
                    total_alerts: cells
                        .iter()
                        .fold(0u64, |t, c| t.saturating_add(c.alert_count)),
                    cells,
                }
            })
            .collect();

        Self {
            row_level,
            column_level,
            columns,
            rows,
        }
    }

    pub fn cell(&self, row: &str, column: &str) -> Option<&CrossTabCell> {
        self.rows
            .iter()
            .find(|r| r.label == row)?
            .cells
            .iter()
            .find(|c| c.column == column)
    }
}
