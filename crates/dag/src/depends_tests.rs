// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn doc_same_job_id() -> DagDocument {
    let json = r#"{
        "app1": {"job_type": "bash"},
        "app2": {"job_type": "bash", "depends_on": {"app1": "same_job_id"}}
    }"#;
    serde_json::from_str(json).unwrap()
}

#[test]
fn same_job_id_parents_and_children_are_symmetric() {
    let doc = doc_same_job_id();
    let registry = FunctionRegistry::new();
    let app2 = AppName::new("app2");
    let app1 = AppName::new("app1");
    let job = JobId::new("j1");

    let p = parents(&doc, &registry, &app2, &job).unwrap();
    assert!(p.contains(&(app1.clone(), job.clone())));

    let c = children(&doc, &app1, &job).unwrap();
    assert!(c.contains(&(app2, job)));
}

#[test]
fn fan_out_parents_abc_to_d() {
    let json = r#"{
        "a": {"job_type": "bash"},
        "b": {"job_type": "bash"},
        "c": {"job_type": "bash"},
        "d": {"job_type": "bash", "depends_on": {"a": "same_job_id", "b": "same_job_id", "c": "same_job_id"}}
    }"#;
    let doc: DagDocument = serde_json::from_str(json).unwrap();
    let registry = FunctionRegistry::new();
    let d = AppName::new("d");
    let job = JobId::new("j1");
    let p = parents(&doc, &registry, &d, &job).unwrap();
    assert_eq!(p.len(), 3);
    for app in ["a", "b", "c"] {
        assert!(p.contains(&(AppName::new(app), job.clone())));
    }
}

#[test]
fn enumerate_values_fans_hourly_into_daily_parents() {
    let json = r#"{
        "hourly": {"job_type": "bash", "job_id_grammar": ["date", "hour"]},
        "daily": {
            "job_type": "bash",
            "job_id_grammar": ["date"],
            "depends_on": {"hourly": {"hour": ["00", "01"]}}
        }
    }"#;
    let doc: DagDocument = serde_json::from_str(json).unwrap();
    let registry = FunctionRegistry::new();
    let daily = AppName::new("daily");
    let job = JobId::new("20260101");
    let p = parents(&doc, &registry, &daily, &job).unwrap();
    assert_eq!(p.len(), 2);
    assert!(p.contains(&(AppName::new("hourly"), JobId::new("20260101_00"))));
    assert!(p.contains(&(AppName::new("hourly"), JobId::new("20260101_01"))));
}

#[test]
fn enumerate_values_children_only_for_matching_field_value() {
    let json = r#"{
        "hourly": {"job_type": "bash", "job_id_grammar": ["date", "hour"]},
        "daily": {
            "job_type": "bash",
            "job_id_grammar": ["date"],
            "depends_on": {"hourly": {"hour": ["00", "01"]}}
        }
    }"#;
    let doc: DagDocument = serde_json::from_str(json).unwrap();
    let hourly = AppName::new("hourly");

    let in_range = children(&doc, &hourly, &JobId::new("20260101_00")).unwrap();
    assert!(in_range.contains(&(AppName::new("daily"), JobId::new("20260101"))));

    let out_of_range = children(&doc, &hourly, &JobId::new("20260101_12")).unwrap();
    assert!(out_of_range.is_empty());
}

#[test]
fn named_func_selector_computes_parent_ids() {
    let json = r#"{
        "weekly_parent": {"job_type": "bash", "job_id_grammar": ["week"]},
        "app1": {
            "job_type": "bash",
            "job_id_grammar": ["date"],
            "depends_on": {"weekly_parent": {"_func": "stolos.examples.week_of"}}
        }
    }"#;
    let doc: DagDocument = serde_json::from_str(json).unwrap();
    let mut registry = FunctionRegistry::new();
    registry.register_depends_on(
        "stolos.examples.week_of",
        std::sync::Arc::new(|fields: &Fields| {
            let date = fields.get("date").cloned().unwrap_or_default();
            vec![format!("W{}", &date[..6])]
        }),
    );
    let app1 = AppName::new("app1");
    let job = JobId::new("20260115");
    let p = parents(&doc, &registry, &app1, &job).unwrap();
    assert!(p.contains(&(AppName::new("weekly_parent"), JobId::new("W202601"))));
}

#[test]
fn unregistered_func_is_config_error() {
    let json = r#"{
        "p": {"job_type": "bash"},
        "c": {"job_type": "bash", "depends_on": {"p": {"_func": "missing.fn"}}}
    }"#;
    let doc: DagDocument = serde_json::from_str(json).unwrap();
    let registry = FunctionRegistry::new();
    let err = parents(&doc, &registry, &AppName::new("c"), &JobId::new("j1")).unwrap_err();
    assert!(matches!(err, DagError::UnknownFunction(name) if name == "missing.fn"));
}

#[test]
fn unknown_app_is_config_error() {
    let doc = doc_same_job_id();
    let registry = FunctionRegistry::new();
    let err = parents(&doc, &registry, &AppName::new("ghost"), &JobId::new("j1")).unwrap_err();
    assert!(matches!(err, DagError::UnknownApp(_)));
}
