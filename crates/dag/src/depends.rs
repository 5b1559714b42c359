// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Evaluates `depends_on` selectors in both directions: `parents()` walks
//! forward from a child's fields to the parent ids it names; `children()`
//! walks the document backward, asking every other app whether this task
//! would be one of its named parents.
//!
//! A `Func` selector's `children()` direction is approximated by
//! reconstructing the dependent's id from the fields shared by name
//! between the two grammars — the function itself only governs the
//! forward `parents()` direction (§12, Open Question resolutions).

use std::collections::HashSet;

use stolos_core::{AppName, JobId};

use crate::config::{AppConfig, DagDocument, JobIdSelector};
use crate::error::DagError;
use crate::grammar::Fields;
use crate::registry::FunctionRegistry;

fn cartesian_product(map: &std::collections::HashMap<String, Vec<String>>) -> Vec<Fields> {
    let mut combos: Vec<Fields> = vec![Fields::new()];
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    for key in keys {
        let values = &map[key];
        let mut next = Vec::with_capacity(combos.len() * values.len().max(1));
        for combo in &combos {
            for value in values {
                let mut extended = combo.clone();
                extended.insert(key.clone(), value.clone());
                next.push(extended);
            }
        }
        combos = next;
    }
    combos
}

/// Job ids this `(app, job_id)` depends on for one named parent app.
pub fn resolve_parent_ids(
    doc: &DagDocument,
    registry: &FunctionRegistry,
    child_app: &str,
    child_fields: &Fields,
    parent_app: &str,
    selector: &JobIdSelector,
) -> Result<Vec<String>, DagError> {
    let child_cfg = doc.apps.get(child_app).ok_or_else(|| DagError::UnknownApp(child_app.to_string()))?;
    let parent_cfg =
        doc.apps.get(parent_app).ok_or_else(|| DagError::UnknownApp(parent_app.to_string()))?;

    match selector {
        JobIdSelector::SameJobId(_) => {
            let id = child_cfg
                .job_id_grammar
                .render(child_fields)
                .ok_or_else(|| unresolved(child_app, parent_app, "job_id"))?;
            Ok(vec![id])
        }
        JobIdSelector::Func { _func } => {
            let f = registry
                .depends_on(_func)
                .ok_or_else(|| DagError::UnknownFunction(_func.clone()))?;
            Ok(f(child_fields))
        }
        JobIdSelector::EnumerateValues(map) => {
            let mut ids = Vec::new();
            for combo in cartesian_product(map) {
                let mut fields = backbone_fields(&parent_cfg.job_id_grammar.fields().to_vec(), child_fields);
                for (k, v) in &combo {
                    fields.insert(k.clone(), v.clone());
                }
                let id = parent_cfg
                    .job_id_grammar
                    .render(&fields)
                    .ok_or_else(|| unresolved_field(child_app, parent_app, &parent_cfg.job_id_grammar))?;
                ids.push(id);
            }
            Ok(ids)
        }
    }
}

fn backbone_fields(parent_grammar: &[String], child_fields: &Fields) -> Fields {
    let mut fields = Fields::new();
    for name in parent_grammar {
        if let Some(value) = child_fields.get(name) {
            fields.insert(name.clone(), value.clone());
        }
    }
    fields
}

fn unresolved(child: &str, parent: &str, field: &str) -> DagError {
    DagError::UnresolvedField { app: child.to_string(), parent: parent.to_string(), field: field.to_string() }
}

fn unresolved_field(child: &str, parent: &str, grammar: &crate::grammar::Grammar) -> DagError {
    let missing = grammar.fields().first().cloned().unwrap_or_default();
    unresolved(child, parent, &missing)
}

/// All `(parent_app, parent_job_id)` pairs a task depends on.
pub fn parents(
    doc: &DagDocument,
    registry: &FunctionRegistry,
    app: &AppName,
    job_id: &JobId,
) -> Result<HashSet<(AppName, JobId)>, DagError> {
    let cfg = doc.apps.get(app.as_str()).ok_or_else(|| DagError::UnknownApp(app.to_string()))?;
    let child_fields = cfg.job_id_grammar.parse(app.as_str(), job_id.as_str()).map_err(|_| {
        DagError::InvalidJobId { app: app.to_string(), job_id: job_id.to_string() }
    })?;

    let mut out = HashSet::new();
    for (parent_app, selector) in &cfg.depends_on {
        let ids = resolve_parent_ids(doc, registry, app.as_str(), &child_fields, parent_app, selector)?;
        for id in ids {
            out.insert((AppName::new(parent_app.clone()), JobId::new(id)));
        }
    }
    Ok(out)
}

/// All `(child_app, child_job_id)` pairs that depend on this task, by
/// scanning every other app's `depends_on` for an entry naming `app`.
pub fn children(
    doc: &DagDocument,
    app: &AppName,
    job_id: &JobId,
) -> Result<HashSet<(AppName, JobId)>, DagError> {
    let cfg = doc.apps.get(app.as_str()).ok_or_else(|| DagError::UnknownApp(app.to_string()))?;
    let my_fields = cfg.job_id_grammar.parse(app.as_str(), job_id.as_str()).map_err(|_| {
        DagError::InvalidJobId { app: app.to_string(), job_id: job_id.to_string() }
    })?;

    let mut out = HashSet::new();
    for (candidate_name, candidate_cfg) in &doc.apps {
        let Some(selector) = candidate_cfg.depends_on.get(app.as_str()) else { continue };
        if let Some(child_id) = child_id_for(selector, &my_fields, candidate_cfg) {
            out.insert((AppName::new(candidate_name.clone()), JobId::new(child_id)));
        }
    }
    Ok(out)
}

/// Reconstructs one candidate child id from my fields, or `None` if this
/// selector doesn't apply to this particular parent task instance.
fn child_id_for(selector: &JobIdSelector, my_fields: &Fields, child_cfg: &AppConfig) -> Option<String> {
    match selector {
        JobIdSelector::SameJobId(_) => child_cfg.job_id_grammar.render(my_fields),
        JobIdSelector::Func { .. } => {
            let backbone = backbone_fields(&child_cfg.job_id_grammar.fields().to_vec(), my_fields);
            child_cfg.job_id_grammar.render(&backbone)
        }
        JobIdSelector::EnumerateValues(map) => {
            for (field, allowed) in map {
                let Some(value) = my_fields.get(field) else { return None };
                if !allowed.contains(value) {
                    return None;
                }
            }
            let backbone = backbone_fields(&child_cfg.job_id_grammar.fields().to_vec(), my_fields);
            child_cfg.job_id_grammar.render(&backbone)
        }
    }
}

#[cfg(test)]
#[path = "depends_tests.rs"]
mod tests;
