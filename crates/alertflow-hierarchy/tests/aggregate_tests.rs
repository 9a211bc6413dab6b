use alertflow_hierarchy::*;
use alertflow_model::{sample_records, Level, LevelOrder, WorkflowRecord};

fn scenario() -> Vec<WorkflowRecord> {
    vec![
        WorkflowRecord::new("A", "F1", "S1", "M1", "W1", "Done", Some(10)),
        WorkflowRecord::new("A", "F1", "S1", "M1", "W1", "Failed", Some(5)),
        WorkflowRecord::new("B", "F2", "S2", "M2", "W2", "Done", Some(7)),
    ]
}

fn assert_conserved(node: &HierarchyNode) {
    if node.is_leaf() {
        return;
    }
    let child_sum: u64 = node.children.iter().map(|c| c.aggregate_count).sum();
    assert_eq!(
        child_sum, node.aggregate_count,
        "children of {} must sum to its count",
        node.id
    );
    let child_records: usize = node.children.iter().map(|c| c.record_count).sum();
    assert_eq!(child_records, node.record_count);
    for child in &node.children {
        assert_conserved(child);
    }
}

#[test]
fn test_scenario_roots_and_leaves() {
    let roots = aggregate(&scenario());
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0].label, "A");
    assert_eq!(roots[0].aggregate_count, 15);
    assert_eq!(roots[1].label, "B");
    assert_eq!(roots[1].aggregate_count, 7);

    let leaves: Vec<&HierarchyNode> = roots[0].leaves().collect();
    assert_eq!(leaves.len(), 2);
    assert!(leaves.iter().all(|l| l.depth == 5 && l.level == Level::State));
    assert_eq!(leaves[0].label, "Done");
    assert_eq!(leaves[0].aggregate_count, 10);
    assert_eq!(leaves[1].label, "Failed");
    assert_eq!(leaves[1].aggregate_count, 5);
}

#[test]
fn test_blank_feed_grouped_under_placeholder() {
    let records = vec![WorkflowRecord::new("A", "", "S1", "M1", "W1", "Done", Some(4))];
    let roots = aggregate(&records);
    let feed = &roots[0].children[0];
    assert_eq!(feed.label, "Unknown Feed");
    assert_eq!(feed.aggregate_count, 4);
}

#[test]
fn test_blank_project_is_not_dropped() {
    let records = vec![
        WorkflowRecord::new("", "F", "S", "M", "W", "Done", Some(3)),
        WorkflowRecord::new("A", "F", "S", "M", "W", "Done", Some(2)),
    ];
    let roots = aggregate(&records);
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0].label, "Unknown Project");
    assert_eq!(roots[0].aggregate_count, 3);
}

#[test]
fn test_project_totals_match_record_sums() {
    let records = sample_records();
    let roots = aggregate(&records);
    for root in &roots {
        let expected: u64 = records
            .iter()
            .filter(|r| Level::Project.label_of(r) == root.label)
            .map(|r| r.contribution())
            .sum();
        assert_eq!(root.aggregate_count, expected, "project {}", root.label);
        assert_conserved(root);
    }
    let labels: Vec<&str> = roots.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["Sanctions", "Fraud", "AML", "KYC", "Credit"]);
    assert_eq!(roots[0].aggregate_count, 2_820);
}

#[test]
fn test_zero_and_missing_counts_contribute_one() {
    let records = vec![
        WorkflowRecord::new("A", "F", "S", "M", "W", "Done", Some(0)),
        WorkflowRecord::new("A", "F", "S", "M", "W", "Done", None),
    ];
    let roots = aggregate(&records);
    assert_eq!(roots[0].aggregate_count, 2);
}

#[test]
fn test_aggregation_is_deterministic() {
    let records = sample_records();
    assert_eq!(aggregate(&records), aggregate(&records));
}

#[test]
fn test_same_label_under_different_parents_is_distinct() {
    let records = vec![
        WorkflowRecord::new("A", "Shared", "S", "M", "W", "Done", Some(1)),
        WorkflowRecord::new("B", "Shared", "S", "M", "W", "Done", Some(1)),
    ];
    let roots = aggregate(&records);
    assert_ne!(roots[0].children[0].id, roots[1].children[0].id);
}

#[test]
fn test_separator_labels_do_not_merge_nodes() {
    let records = vec![
        WorkflowRecord::new("A/B", "C", "S", "M", "W", "Done", Some(1)),
        WorkflowRecord::new("A", "B/C", "S", "M", "W", "Done", Some(1)),
    ];
    let roots = aggregate(&records);
    let ids: Vec<&NodeId> = walk(&roots).map(|n| &n.id).collect();
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(ids.len(), unique.len());
}

#[test]
fn test_empty_input_yields_empty_forest() {
    assert!(aggregate(&[]).is_empty());
}

#[test]
fn test_custom_level_order() {
    let order = LevelOrder::new(vec![
        Level::Project,
        Level::Feed,
        Level::MatchProcess,
        Level::Source,
        Level::Workflow,
        Level::State,
    ])
    .unwrap();
    let roots = aggregate_with(&scenario(), &order);
    let third = &roots[0].children[0].children[0];
    assert_eq!(third.level, Level::MatchProcess);
    assert_eq!(third.label, "M1");
    assert_eq!(third.depth, 2);
}

#[test]
fn test_find_by_id() {
    let roots = aggregate(&scenario());
    let id = NodeId::from_path(&["A", "F1", "S1", "M1", "W1", "Failed"]).unwrap();
    let node = find(&roots, &id).expect("leaf should be found");
    assert_eq!(node.aggregate_count, 5);
    assert!(find(&roots, &NodeId::root("Z")).is_none());
}

#[test]
fn test_huge_alert_counts_saturate() {
    let records = vec![
        WorkflowRecord::new("A", "F", "S", "M", "W", "Done", Some(u64::MAX)),
        WorkflowRecord::new("A", "F", "S", "M", "W", "Done", Some(1)),
        WorkflowRecord::new("A", "F", "S", "M", "W", "Open", Some(3)),
    ];
    let roots = aggregate(&records);
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].aggregate_count, u64::MAX);
    assert_eq!(roots[0].record_count, 3);

    let open = find(&roots, &NodeId::from_path(&["A", "F", "S", "M", "W", "Open"]).unwrap()).unwrap();
    assert_eq!(open.aggregate_count, 3);
}
