//! Alert density of one level against another (projects × states by default).

use alertflow_model::{Level, WorkflowRecord};
use serde::{Deserialize, Serialize};

use crate::grouping::{distinct_values, positions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntensityBand {
    NoActivity,
    VeryLow,
    Low,
    Medium,
    High,
    Critical,
}

impl IntensityBand {
    /// Bands are 0.2 wide; exactly 0 is `NoActivity`.
    pub fn for_intensity(intensity: f64) -> Self {
        if intensity <= 0.0 {
            Self::NoActivity
        } else if intensity < 0.2 {
            Self::VeryLow
        } else if intensity < 0.4 {
            Self::Low
        } else if intensity < 0.6 {
            Self::Medium
        } else if intensity < 0.8 {
            Self::High
        } else {
            Self::Critical
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    pub column: String,
    pub alert_count: u64,
    pub record_count: usize,
    /// `alert_count` relative to the busiest cell, in `[0, 1]`.
    pub intensity: f64,
    pub band: IntensityBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapRow {
    pub label: String,
    pub cells: Vec<HeatmapCell>,
    pub total_alerts: u64,
    pub record_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heatmap {
    pub row_level: Level,
    pub column_level: Level,
    pub columns: Vec<String>,
    pub rows: Vec<HeatmapRow>,
    /// Alert total of the busiest cell.
    pub max_cell: u64,
}

impl Heatmap {
    pub fn build(records: &[WorkflowRecord], row_level: Level, column_level: Level) -> Self {
        let row_labels = distinct_values(records, row_level);
        let columns = distinct_values(records, column_level);
        let row_pos = positions(&row_labels);
        let col_pos = positions(&columns);

        // (alerts, records) per cell
        let mut totals = vec![vec![(0u64, 0usize); columns.len()]; row_labels.len()];
        for record in records {
            let (Some(&r), Some(&c)) = (
                row_pos.get(row_level.label_of(record).as_str()),
                col_pos.get(column_level.label_of(record).as_str()),
            ) else {
                continue;
            };
            totals[r][c].0 = totals[r][c].0.saturating_add(record.contribution());
            totals[r][c].1 += 1;
        }

        let max_cell = totals
            .iter()
            .flat_map(|row| row.iter().map(|(alerts, _)| *alerts))
            .max()
            .unwrap_or(0);

        let rows = row_labels
            .into_iter()
            .zip(totals)
            .map(|(label, row)| {
                let cells: Vec<HeatmapCell> = columns
                    .iter()
                    .zip(row)
                    .map(|(column, (alert_count, record_count))| {
                        let intensity = if max_cell > 0 {
                            alert_count as f64 / max_cell as f64
                        } else {
                            0.0
                        };
                        HeatmapCell {
                            column: column.clone(),
                            alert_count,
                            record_count,
                            intensity,
                            band: IntensityBand::for_intensity(intensity),
                        }
                    })
                    .collect();
                HeatmapRow {
                    label,
                    total_alerts: cells
                        .iter()
                        .fold(0u64, |t, c| t.saturating_add(c.alert_count)),
                    record_count: cells.iter().map(|c| c.record_count).sum(),
                    cells,
                }
            })
            .collect();

        Self {
            row_level,
            column_level,
            columns,
            rows,
            max_cell,
        }
    }
}
