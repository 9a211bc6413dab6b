//! Summary report: headline totals plus per-project and per-state breakdowns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use alertflow_model::{Level, WorkflowRecord};

use crate::grouping::{alert_total, group_by};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBreakdown {
    pub project: String,
    pub records: usize,
    pub alerts: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateAnalysis {
    pub state: String,
    pub records: usize,
    pub validated: usize,
    pub alerts: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub name: String,
    pub generated_at: DateTime<Utc>,
    pub total_records: usize,
    pub total_alerts: u64,
    pub unique_projects: usize,
    pub unique_states: usize,
    pub unique_workflows: usize,
    pub projects: Vec<ProjectBreakdown>,
    pub states: Vec<StateAnalysis>,
}

impl SummaryReport {
    pub fn build(name: &str, records: &[WorkflowRecord], generated_at: DateTime<Utc>) -> Self {
        let projects: Vec<ProjectBreakdown> = group_by(records, Level::Project)
            .into_iter()
            .map(|(project, members)| ProjectBreakdown {
                project,
                records: members.len(),
                alerts: alert_total(members),
            })
            .collect();

        let states: Vec<StateAnalysis> = group_by(records, Level::State)
            .into_iter()
            .map(|(state, members)| StateAnalysis {
                state,
                records: members.len(),
                validated: members.iter().filter(|r| r.validated).count(),
                alerts: alert_total(members),
            })
            .collect();

        let report = Self {
            name: name.to_string(),
            generated_at,
            total_records: records.len(),
            total_alerts: alert_total(records),
            unique_projects: projects.len(),
            unique_states: states.len(),
            unique_workflows: group_by(records, Level::Workflow).len(),
            projects,
            states,
        };

        tracing::debug!(
            name = %report.name,
            records = report.total_records,
            alerts = report.total_alerts,
            "Built summary report"
        );
        report
    }
}
