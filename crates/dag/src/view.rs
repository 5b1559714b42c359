// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `DagView` (C2): the pure, read-only query surface the engine and
//! runner use to reason about the DAG. Every method re-reads the
//! underlying `ConfigSource` so edits to the document between calls are
//! visible on the next query (§4.2, §9).

use std::sync::Arc;

use stolos_core::{AppName, JobId, TaskKey};

use crate::config::{ConfigSource, DagDocument};
use crate::error::DagError;
use crate::grammar::Fields;
use crate::options::AppOptions;
use crate::registry::FunctionRegistry;
use crate::{depends, topo, valid_if};

/// Pure DAG queries over a `(depends_on, valid_if_or, job_id_grammar)`
/// document. No method here touches the coordination store — it only
/// answers questions about the shape of the DAG and the validity of a
/// given job id.
pub trait DagView: Send + Sync {
    /// Parents `(app, job_id)` depends on, resolved from its own grammar
    /// fields via its `depends_on` entries.
    fn parents(&self, app: &AppName, job_id: &JobId) -> Result<Vec<TaskKey>, DagError>;

    /// Children that would depend on `(app, job_id)`, found by scanning
    /// every other app's `depends_on` for a selector naming `app`.
    fn children(&self, app: &AppName, job_id: &JobId) -> Result<Vec<TaskKey>, DagError>;

    /// Whether this task passes its app's `valid_if_or` filter.
    fn is_valid(&self, app: &AppName, job_id: &JobId) -> Result<bool, DagError>;

    /// Static per-app options (`max_retry`, `priority`, `job_type`).
    fn options(&self, app: &AppName) -> Result<AppOptions, DagError>;

    /// Parsed job-id fields for one task, per its app's grammar.
    fn parse_job_id(&self, app: &AppName, job_id: &JobId) -> Result<Fields, DagError>;

    /// Deterministic ordering (parents before children, stable tiebreak)
    /// over a fixed set of tasks.
    fn topological_sort(&self, nodes: Vec<TaskKey>) -> Result<Vec<TaskKey>, DagError>;
}

/// The concrete `DagView` backing every deployment: a JSON document
/// behind a `ConfigSource`, plus a registry for named `_func` selectors.
#[derive(Clone)]
pub struct JsonDagView {
    source: Arc<dyn ConfigSource>,
    registry: FunctionRegistry,
}

impl JsonDagView {
    pub fn new(source: Arc<dyn ConfigSource>, registry: FunctionRegistry) -> Self {
        Self { source, registry }
    }

    fn load(&self) -> Result<DagDocument, DagError> {
        self.source.load()
    }
}

impl DagView for JsonDagView {
    fn parents(&self, app: &AppName, job_id: &JobId) -> Result<Vec<TaskKey>, DagError> {
        let doc = self.load()?;
        let pairs = depends::parents(&doc, &self.registry, app, job_id)?;
        Ok(pairs.into_iter().map(|(a, j)| TaskKey::new(a, j)).collect())
    }

    fn children(&self, app: &AppName, job_id: &JobId) -> Result<Vec<TaskKey>, DagError> {
        let doc = self.load()?;
        let pairs = depends::children(&doc, app, job_id)?;
        Ok(pairs.into_iter().map(|(a, j)| TaskKey::new(a, j)).collect())
    }

    fn is_valid(&self, app: &AppName, job_id: &JobId) -> Result<bool, DagError> {
        let doc = self.load()?;
        let cfg = doc.apps.get(app.as_str()).ok_or_else(|| DagError::UnknownApp(app.to_string()))?;
        let fields = cfg.job_id_grammar.parse(app.as_str(), job_id.as_str()).map_err(|_| {
            DagError::InvalidJobId { app: app.to_string(), job_id: job_id.to_string() }
        })?;
        valid_if::is_valid(&self.registry, cfg, &fields)
    }

    fn options(&self, app: &AppName) -> Result<AppOptions, DagError> {
        let doc = self.load()?;
        let cfg = doc.apps.get(app.as_str()).ok_or_else(|| DagError::UnknownApp(app.to_string()))?;
        Ok(AppOptions::from(cfg))
    }

    fn parse_job_id(&self, app: &AppName, job_id: &JobId) -> Result<Fields, DagError> {
        let doc = self.load()?;
        let cfg = doc.apps.get(app.as_str()).ok_or_else(|| DagError::UnknownApp(app.to_string()))?;
        cfg.job_id_grammar.parse(app.as_str(), job_id.as_str()).map_err(|_| {
            DagError::InvalidJobId { app: app.to_string(), job_id: job_id.to_string() }
        })
    }

    fn topological_sort(&self, nodes: Vec<TaskKey>) -> Result<Vec<TaskKey>, DagError> {
        let doc = self.load()?;
        let pairs = nodes.into_iter().map(|k| (k.app, k.job_id));
        let sorted = topo::topological_sort(&doc, &self.registry, pairs)?;
        Ok(sorted.into_iter().map(|(a, j)| TaskKey::new(a, j)).collect())
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
