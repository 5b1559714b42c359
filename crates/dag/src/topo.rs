// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic topological sort over a fixed set of tasks (§4.2):
//! "deterministic across runs (stable tiebreak by app_name then job_id)".

use std::collections::{BTreeMap, BTreeSet};

use stolos_core::{AppName, JobId};

use crate::config::DagDocument;
use crate::error::DagError;
use crate::registry::FunctionRegistry;

/// Kahn's algorithm restricted to `nodes`, breaking ties on `(app, job_id)`
/// ordering so the result is the same for the same input set every time.
/// Edges to parents outside `nodes` are ignored — the sort only orders
/// the given set relative to each other.
pub fn topological_sort(
    doc: &DagDocument,
    registry: &FunctionRegistry,
    nodes: impl IntoIterator<Item = (AppName, JobId)>,
) -> Result<Vec<(AppName, JobId)>, DagError> {
    let set: BTreeSet<(AppName, JobId)> = nodes.into_iter().collect();

    let mut parents_in_set: BTreeMap<(AppName, JobId), BTreeSet<(AppName, JobId)>> = BTreeMap::new();
    let mut dependents: BTreeMap<(AppName, JobId), BTreeSet<(AppName, JobId)>> = BTreeMap::new();
    for node in &set {
        parents_in_set.entry(node.clone()).or_default();
        dependents.entry(node.clone()).or_default();
    }
    for (app, job_id) in &set {
        let node = (app.clone(), job_id.clone());
        let all_parents = crate::depends::parents(doc, registry, app, job_id)?;
        for parent in all_parents {
            if !set.contains(&parent) {
                continue;
            }
            if let Some(entry) = parents_in_set.get_mut(&node) {
                entry.insert(parent.clone());
            }
            if let Some(entry) = dependents.get_mut(&parent) {
                entry.insert(node.clone());
            }
        }
    }

    let mut ready: BTreeSet<(AppName, JobId)> =
        parents_in_set.iter().filter(|(_, p)| p.is_empty()).map(|(n, _)| n.clone()).collect();
    let mut out = Vec::with_capacity(set.len());
    let mut remaining = parents_in_set;

    while let Some(node) = ready.iter().next().cloned() {
        ready.remove(&node);
        out.push(node.clone());
        for dependent in dependents.get(&node).cloned().unwrap_or_default() {
            if let Some(parents) = remaining.get_mut(&dependent) {
                parents.remove(&node);
                if parents.is_empty() {
                    ready.insert(dependent);
                }
            }
        }
        remaining.remove(&node);
    }

    if let Some((app, _)) = remaining.keys().next() {
        return Err(DagError::CycleDetected(app.to_string()));
    }

    Ok(out)
}

#[cfg(test)]
#[path = "topo_tests.rs"]
mod tests;
