use alertflow_model::*;

#[test]
fn test_import_maps_spreadsheet_headers() {
    let json = r#"[
        {
            "Director Project": "Sanctions",
            "Director Feedname": "OFAC_Screening",
            "SCM Feedname": "OFAC_SDN_Feed",
            "Match Process": "Name_Match_Fuzzy",
            "SCM Source": "Treasury_OFAC",
            "Workflow": "Auto_Review",
            "State": "Reviewed",
            "Priority": "High",
            "Validated": "Yes",
            "Owner": "tech",
            "Alert Count": "1250"
        }
    ]"#;
    let records = import_rows(json).unwrap();
    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.director_project, "Sanctions");
    assert_eq!(r.director_feedname, "OFAC_Screening");
    assert_eq!(r.scm_feedname, "OFAC_SDN_Feed");
    assert_eq!(r.match_process, "Name_Match_Fuzzy");
    assert_eq!(r.scm_source, "Treasury_OFAC");
    assert_eq!(r.workflow, "Auto_Review");
    assert_eq!(r.state, "Reviewed");
    assert_eq!(r.priority, Priority::High);
    assert!(r.validated);
    assert_eq!(r.owner, Owner::Tech);
    assert_eq!(r.alert_count, Some(1250));
}

#[test]
fn test_import_defaults_missing_columns() {
    let records = import_rows(r#"[{"workflow": "Manual_Review"}]"#).unwrap();
    let r = &records[0];
    assert_eq!(r.director_project, "Unknown Project");
    assert_eq!(r.director_feedname, "Unknown Feed");
    assert_eq!(r.scm_source, "Unknown Source");
    assert_eq!(r.match_process, "Unknown Match Process");
    assert_eq!(r.state, "Unknown State");
    assert_eq!(r.scm_feedname, "Unknown SCM Feed");
    assert_eq!(r.priority, Priority::Medium);
    assert_eq!(r.owner, Owner::Ops);
    assert!(!r.validated);
    assert_eq!(r.alert_count, Some(1));
}

#[test]
fn test_import_blank_cells_are_defaulted() {
    let records = import_rows(r#"[{"project": "   ", "feed": null, "alerts": "abc"}]"#).unwrap();
    assert_eq!(records[0].director_project, "Unknown Project");
    assert_eq!(records[0].director_feedname, "Unknown Feed");
    assert_eq!(records[0].alert_count, Some(1));
}

#[test]
fn test_import_numeric_cells_become_labels() {
    let records = import_rows(r#"[{"project": 2024, "state": true}]"#).unwrap();
    assert_eq!(records[0].director_project, "2024");
    assert_eq!(records[0].state, "true");
}

#[test]
fn test_import_rejects_non_object_rows() {
    let err = import_rows(r#"[{"project": "A"}, 7]"#).unwrap_err();
    match err {
        ModelError::Import(msg) => assert!(msg.contains("row 1"), "message was: {msg}"),
        other => panic!("expected import error, got {other:?}"),
    }
}

#[test]
fn test_import_rejects_malformed_json() {
    assert!(matches!(import_rows("{not json"), Err(ModelError::Json(_))));
}

#[test]
fn test_missing_fields_lists_unsupplied_columns() {
    let row = RawImportedRow::new()
        .with("Director Project", "AML")
        .with("state", "Filed");
    let missing = row.missing_fields();
    assert!(!missing.contains(&"directorProject"));
    assert!(!missing.contains(&"state"));
    assert!(missing.contains(&"alertCount"));
    assert!(missing.contains(&"directorFeedname"));
}
