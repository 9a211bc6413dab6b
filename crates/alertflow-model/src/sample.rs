//! Built-in demo dataset of compliance alert workflows.

use crate::WorkflowRecord;

const SAMPLE_JSON: &str = include_str!("../data/sample_workflows.json");

/// The twelve demo records across the Sanctions, Fraud, AML, KYC and Credit projects.
pub fn sample_records() -> Vec<WorkflowRecord> {
    parse_embedded(SAMPLE_JSON)
}

/// Logs and yields no records when `json` does not parse.
fn parse_embedded(json: &str) -> Vec<WorkflowRecord> {
    match serde_json::from_str(json) {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, "Embedded sample dataset is corrupt");
            Vec::new()
        }
    }
}
