//! Flat record listing sorted by any column.
//!
//! Text columns compare case-insensitively. `alertCount` compares as a
//! number with a missing count treated as 0 (not the aggregate
//! contribution of 1), so unset rows sort first ascending. Rows that tie
//! keep their input order in both directions.

use std::cmp::Ordering;

use alertflow_model::{RecordField, WorkflowRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The other direction, as a column header click would produce.
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub sort_field: RecordField,
    pub direction: SortDirection,
    pub rows: Vec<WorkflowRecord>,
}

impl Table {
    pub fn build(records: &[WorkflowRecord], sort_field: RecordField, direction: SortDirection) -> Self {
        let mut rows = records.to_vec();
        rows.sort_by(|a, b| {
            let ord = compare(sort_field, a, b);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        tracing::debug!(
            rows = rows.len(),
            field = %sort_field,
            direction = ?direction,
            "Sorted record table"
        );
        Self {
            sort_field,
            direction,
            rows,
        }
    }
}

fn compare(field: RecordField, a: &WorkflowRecord, b: &WorkflowRecord) -> Ordering {
    match field {
        RecordField::AlertCount => a.alert_count.unwrap_or(0).cmp(&b.alert_count.unwrap_or(0)),
        RecordField::Validated => a.validated.cmp(&b.validated),
        _ => {
            let lower = |r: &WorkflowRecord| field.text_of(r).unwrap_or_default().to_lowercase();
            lower(a).cmp(&lower(b))
        }
    }
}
