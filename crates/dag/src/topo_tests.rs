// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::DagDocument;
use stolos_core::{AppName, JobId};

fn doc() -> DagDocument {
    let json = r#"{
        "a": {"job_type": "bash"},
        "b": {"job_type": "bash", "depends_on": {"a": "same_job_id"}},
        "c": {"job_type": "bash", "depends_on": {"b": "same_job_id"}}
    }"#;
    serde_json::from_str(json).unwrap()
}

#[test]
fn orders_parents_before_children() {
    let doc = doc();
    let registry = FunctionRegistry::new();
    let job = JobId::new("j1");
    let nodes = vec![
        (AppName::new("c"), job.clone()),
        (AppName::new("a"), job.clone()),
        (AppName::new("b"), job.clone()),
    ];
    let sorted = topological_sort(&doc, &registry, nodes).unwrap();
    let pos = |app: &str| sorted.iter().position(|(a, _)| a.as_str() == app).unwrap();
    assert!(pos("a") < pos("b"));
    assert!(pos("b") < pos("c"));
}

#[test]
fn deterministic_across_runs() {
    let doc = doc();
    let registry = FunctionRegistry::new();
    let job = JobId::new("j1");
    let nodes = || {
        vec![
            (AppName::new("c"), job.clone()),
            (AppName::new("b"), job.clone()),
            (AppName::new("a"), job.clone()),
        ]
    };
    let first = topological_sort(&doc, &registry, nodes()).unwrap();
    let second = topological_sort(&doc, &registry, nodes()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn independent_nodes_tiebreak_by_app_then_job_id() {
    let json = r#"{
        "a": {"job_type": "bash"},
        "b": {"job_type": "bash"}
    }"#;
    let doc: DagDocument = serde_json::from_str(json).unwrap();
    let registry = FunctionRegistry::new();
    let nodes = vec![
        (AppName::new("b"), JobId::new("2")),
        (AppName::new("b"), JobId::new("1")),
        (AppName::new("a"), JobId::new("2")),
        (AppName::new("a"), JobId::new("1")),
    ];
    let sorted = topological_sort(&doc, &registry, nodes).unwrap();
    assert_eq!(
        sorted,
        vec![
            (AppName::new("a"), JobId::new("1")),
            (AppName::new("a"), JobId::new("2")),
            (AppName::new("b"), JobId::new("1")),
            (AppName::new("b"), JobId::new("2")),
        ]
    );
}

#[test]
fn cycle_within_the_node_set_is_rejected() {
    let json = r#"{
        "a": {"job_type": "bash", "depends_on": {"b": "same_job_id"}},
        "b": {"job_type": "bash", "depends_on": {"a": "same_job_id"}}
    }"#;
    let doc: DagDocument = serde_json::from_str(json).unwrap();
    let registry = FunctionRegistry::new();
    let job = JobId::new("j1");
    let nodes = vec![(AppName::new("a"), job.clone()), (AppName::new("b"), job)];
    let err = topological_sort(&doc, &registry, nodes).unwrap_err();
    assert!(matches!(err, DagError::CycleDetected(_)));
}
