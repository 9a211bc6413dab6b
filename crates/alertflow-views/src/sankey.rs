//! Column flow view: alert volume along label paths through a few levels
//! (project → workflow → state by default).

use std::collections::HashMap;

use alertflow_model::{Level, WorkflowRecord};
use serde::{Deserialize, Serialize};

use crate::grouping::{alert_total, group_by};

pub const DEFAULT_STAGES: [Level; 3] = [Level::Project, Level::Workflow, Level::State];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SankeyFlow {
    /// One label per stage.
    pub path: Vec<String>,
    pub alert_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnNode {
    pub label: String,
    pub alert_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SankeyColumn {
    pub level: Level,
    /// First-seen order.
    pub nodes: Vec<ColumnNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SankeyFlows {
    pub columns: Vec<SankeyColumn>,
    /// Heaviest first; equal totals keep first-seen order.
    pub flows: Vec<SankeyFlow>,
}

impl SankeyFlows {
    pub fn build(records: &[WorkflowRecord]) -> Self {
        Self::build_with_stages(records, &DEFAULT_STAGES)
    }

    pub fn build_with_stages(records: &[WorkflowRecord], stages: &[Level]) -> Self {
        let columns = stages
            .iter()
            .map(|&level| SankeyColumn {
                level,
                nodes: group_by(records, level)
                    .into_iter()
                    .map(|(label, members)| ColumnNode {
                        label,
                        alert_count: alert_total(members),
                    })
                    .collect(),
            })
            .collect();

        let mut flows: Vec<SankeyFlow> = Vec::new();
        if !stages.is_empty() {
            let mut index: HashMap<Vec<String>, usize> = HashMap::new();
            for record in records {
                let path: Vec<String> = stages.iter().map(|l| l.label_of(record)).collect();
                match index.get(&path) {
                    Some(&i) => {
                        flows[i].alert_count =
                            flows[i].alert_count.saturating_add(record.contribution());
                    }
                    None => {
                        index.insert(path.clone(), flows.len());
                        flows.push(SankeyFlow {
                            path,
                            alert_count: record.contribution(),
                        });
                    }
                }
            }
            // stable sort keeps first-seen order among ties
            flows.sort_by(|a, b| b.alert_count.cmp(&a.alert_count));
        }

        Self { columns, flows }
    }

    pub fn total(&self) -> u64 {
        self.flows
            .iter()
            .fold(0u64, |t, f| t.saturating_add(f.alert_count))
    }
}
