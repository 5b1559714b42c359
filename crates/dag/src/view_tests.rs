// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::StaticConfigSource;
use std::sync::Arc;

fn make_view() -> JsonDagView {
    let json = r#"{
        "upstream": {"job_type": "bash", "max_retry": 2, "priority": 5},
        "downstream": {
            "job_type": "bash",
            "depends_on": {"upstream": "same_job_id"},
            "valid_if_or": {"region": ["us"]}
        }
    }"#;
    let doc: DagDocument = serde_json::from_str(json).unwrap();
    let source = Arc::new(StaticConfigSource::new(doc));
    JsonDagView::new(source, FunctionRegistry::new())
}

#[test]
fn parents_and_children_are_symmetric() {
    let view = make_view();
    let job = JobId::new("j1");
    let parents = view.parents(&AppName::new("downstream"), &job).unwrap();
    assert_eq!(parents, vec![TaskKey::new("upstream", "j1")]);

    let children = view.children(&AppName::new("upstream"), &job).unwrap();
    assert_eq!(children, vec![TaskKey::new("downstream", "j1")]);
}

#[test]
fn options_reports_configured_values() {
    let view = make_view();
    let opts = view.options(&AppName::new("upstream")).unwrap();
    assert_eq!(opts.max_retry, 2);
    assert_eq!(opts.priority.0, 5);
}

#[test]
fn is_valid_reflects_document_edits_between_calls() {
    let json = r#"{"a": {"job_type": "bash", "valid_if_or": {"region": ["us"]}}}"#;
    let doc: DagDocument = serde_json::from_str(json).unwrap();
    let source = Arc::new(StaticConfigSource::new(doc));
    let view = JsonDagView::new(source.clone(), FunctionRegistry::new());
    let app = AppName::new("a");
    let job = JobId::new("region_eu");

    assert!(!view.is_valid(&app, &job).unwrap());

    let mut edited = DagDocument::default();
    edited.apps.insert("a".to_string(), crate::config::AppConfig::default());
    source.replace(edited);

    assert!(view.is_valid(&app, &job).unwrap());
}

#[test]
fn unknown_app_surfaces_as_dag_error() {
    let view = make_view();
    let err = view.options(&AppName::new("ghost")).unwrap_err();
    assert!(matches!(err, DagError::UnknownApp(_)));
}

#[test]
fn topological_sort_orders_parent_before_child() {
    let view = make_view();
    let job = JobId::new("j1");
    let nodes = vec![TaskKey::new("downstream", "j1"), TaskKey::new("upstream", "j1")];
    let sorted = view.topological_sort(nodes).unwrap();
    assert_eq!(sorted, vec![TaskKey::new("upstream", job.clone()), TaskKey::new("downstream", job)]);
}
