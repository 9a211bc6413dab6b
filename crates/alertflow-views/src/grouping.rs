use std::collections::HashMap;

use alertflow_model::{Level, WorkflowRecord};

/// Distinct labels at `level`, in first-seen order. Used for filter option lists.
pub fn distinct_values(records: &[WorkflowRecord], level: Level) -> Vec<String> {
    group_by(records, level).into_iter().map(|(label, _)| label).collect()
}

/// Records grouped by their label at `level`, groups in first-seen order.
pub(crate) fn group_by(
    records: &[WorkflowRecord],
    level: Level,
) -> Vec<(String, Vec<&WorkflowRecord>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&WorkflowRecord>)> = Vec::new();
    for record in records {
        let label = level.label_of(record);
        match index.get(&label) {
            Some(&i) => groups[i].1.push(record),
            None => {
                index.insert(label.clone(), groups.len());
                groups.push((label, vec![record]));
            }
        }
    }
    groups
}

/// Sum of record contributions, saturating at `u64::MAX`.
pub(crate) fn alert_total<'a>(records: impl IntoIterator<Item = &'a WorkflowRecord>) -> u64 {
    records
        .into_iter()
        .fold(0u64, |total, r| total.saturating_add(r.contribution()))
}

/// Position lookup for a first-seen label list.
pub(crate) fn positions(labels: &[String]) -> HashMap<&str, usize> {
    labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect()
}
