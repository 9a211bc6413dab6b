use std::io::Write;

use clap::Parser;

use alertflow_cli::{run, AlertflowConfig, Cli};
use alertflow_hierarchy::{Layout, NodeId};
use alertflow_model::RecordField;
use alertflow_views::{CrossTab, Heatmap, SankeyFlows, SortDirection, SummaryReport, Table};

fn exec(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("alertflow").chain(args.iter().copied()))?;
    run(&cli, &AlertflowConfig::default())
}

#[test]
fn test_tree_lists_projects_in_first_seen_order() {
    let out = exec(&["tree"]).unwrap();
    let roots: Vec<&str> = out.lines().filter(|l| !l.starts_with(' ')).collect();
    assert_eq!(
        roots,
        vec![
            "Sanctions [2820]",
            "Fraud [3770]",
            "AML [770]",
            "KYC [5680]",
            "Credit [4300]",
        ]
    );
    assert!(out.contains("\n  OFAC_Screening [2140]\n"));
}

#[test]
fn test_tree_with_filter() {
    let out = exec(&["tree", "--filter", "project=KYC"]).unwrap();
    assert!(out.starts_with("KYC [5680]\n"));
    assert!(!out.contains("Sanctions"));
}

#[test]
fn test_filter_after_subcommand() {
    let out = exec(&["tree", "--filter", "state=Filed"]).unwrap();
    assert!(out.starts_with("AML [320]\n"));
}

#[test]
fn test_bad_filter_expression_fails() {
    assert!(exec(&["tree", "--filter", "project"]).is_err());
}

#[test]
fn test_layout_collapsed_shows_roots_only() {
    let out = exec(&["layout"]).unwrap();
    let layout: Layout = serde_json::from_str(&out).unwrap();
    assert_eq!(layout.nodes.len(), 5);
    assert!(layout.edges.is_empty());
}

#[test]
fn test_layout_expand_single_node() {
    let out = exec(&["layout", "--expand", "Sanctions"]).unwrap();
    let layout: Layout = serde_json::from_str(&out).unwrap();
    // 5 roots + OFAC_Screening + EU_Sanctions
    assert_eq!(layout.nodes.len(), 7);
    assert_eq!(layout.edges.len(), 2);
    assert!(layout.node(&NodeId::from("Sanctions/EU_Sanctions")).is_some());
}

#[test]
fn test_layout_expand_all_links_every_child() {
    let out = exec(&["layout", "--expand-all"]).unwrap();
    let layout: Layout = serde_json::from_str(&out).unwrap();
    assert_eq!(layout.edges.len(), layout.nodes.len() - 5);
}

#[test]
fn test_summary_name_and_totals() {
    let out = exec(&["summary", "--name", "Q3"]).unwrap();
    let report: SummaryReport = serde_json::from_str(&out).unwrap();
    assert_eq!(report.name, "Q3");
    assert_eq!(report.total_records, 12);
    assert_eq!(report.total_alerts, 17340);
    assert_eq!(report.unique_projects, 5);
}

#[test]
fn test_matrix_defaults_to_feed_by_match_process() {
    let out = exec(&["matrix"]).unwrap();
    let matrix: CrossTab = serde_json::from_str(&out).unwrap();
    assert!(matrix.cell("OFAC_Screening", "Name_Match_Fuzzy").is_some());
}

#[test]
fn test_matrix_rejects_unknown_level() {
    assert!(exec(&["matrix", "--rows", "colour"]).is_err());
}

#[test]
fn test_heatmap_max_cell() {
    let out = exec(&["heatmap"]).unwrap();
    let heatmap: Heatmap = serde_json::from_str(&out).unwrap();
    assert_eq!(heatmap.max_cell, 5500);
}

#[test]
fn test_sankey_custom_stages() {
    let out = exec(&["sankey", "--stage", "project", "--stage", "state"]).unwrap();
    let flows: SankeyFlows = serde_json::from_str(&out).unwrap();
    assert_eq!(flows.columns.len(), 2);
    assert_eq!(flows.total(), 17340);
}

#[test]
fn test_values_for_level() {
    let out = exec(&["values", "project", "--filter", "project=AML"]).unwrap();
    let values: Vec<String> = serde_json::from_str(&out).unwrap();
    assert_eq!(values, vec!["AML"]);
}

#[test]
fn test_record_file_input() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"directorProject":"P","directorFeedname":"F","workflow":"W","state":"S","alertCount":7}},
            {{"directorProject":"P","directorFeedname":"F","workflow":"W","state":"S"}}]"#
    )
    .unwrap();
    let path = file.path().to_str().unwrap();

    let out = exec(&["--input", path, "tree"]).unwrap();
    assert!(out.starts_with("P [8]\n"));
    assert!(out.contains("Unknown Match Process"));
}

#[test]
fn test_raw_rows_input() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"Project":"Ops","Feed Name":"Daily","Workflow":"Triage","State":"Open","Alert Count":"12"}}]"#
    )
    .unwrap();
    let path = file.path().to_str().unwrap();

    let out = exec(&["--raw", "--input", path, "summary"]).unwrap();
    let report: SummaryReport = serde_json::from_str(&out).unwrap();
    assert_eq!(report.total_alerts, 12);
    assert_eq!(report.projects[0].project, "Ops");
}

#[test]
fn test_missing_input_file_fails() {
    assert!(exec(&["--input", "/definitely/not/here.json", "tree"]).is_err());
}

#[test]
fn test_search_flag_combines_with_filters() {
    let out = exec(&["tree", "--search", "MANUAL"]).unwrap();
    let roots: Vec<&str> = out.lines().filter(|l| !l.starts_with(' ')).collect();
    assert_eq!(roots, vec!["Sanctions [890]", "Fraud [750]", "KYC [180]", "Credit [1100]"]);

    let out = exec(&["tree", "--search", "manual", "--filter", "project=Credit"]).unwrap();
    assert!(out.starts_with("Credit [1100]\n"));
    assert_eq!(out.lines().filter(|l| !l.starts_with(' ')).count(), 1);
}

#[test]
fn test_layout_respects_search() {
    let out = exec(&["layout", "--expand-all", "--search", "fuzzy"]).unwrap();
    let layout: Layout = serde_json::from_str(&out).unwrap();
    assert_eq!(layout.nodes.len(), 6);
    assert_eq!(layout.edges.len(), 5);
    assert_eq!(layout.nodes[5].label, "Reviewed");
}

#[test]
fn test_table_sorted_by_alert_count_descending() {
    let out = exec(&["table", "--sort", "alertCount", "--desc"]).unwrap();
    let table: Table = serde_json::from_str(&out).unwrap();
    assert_eq!(table.sort_field, RecordField::AlertCount);
    assert_eq!(table.direction, SortDirection::Desc);
    let counts: Vec<u64> = table.rows.iter().filter_map(|r| r.alert_count).collect();
    assert_eq!(counts.len(), 12);
    assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(counts[0], 5500);
}

#[test]
fn test_table_rejects_unknown_column() {
    assert!(exec(&["table", "--sort", "colour"]).is_err());
}
