// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The DAG configuration document (§6) and its `ConfigSource` (§9,
//! "inject a `ConfigSource` into the DagView explicitly" — this crate's
//! stand-in for the original's process-wide, re-read-on-query globals).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::DagError;
use crate::grammar::Grammar;

/// One app's entry in the DAG document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub depends_on: HashMap<String, JobIdSelector>,
    #[serde(default)]
    pub valid_if_or: ValidIfOr,
    #[serde(default)]
    pub max_retry: Option<u32>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub job_id_grammar: Grammar,
}

/// How a child app's job id maps to a parent app's job id (§4.2, §11).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobIdSelector {
    /// `{"_func": "dotted.path"}` — a named function computes the
    /// parent job id(s) from the child's parsed fields.
    Func { _func: String },
    /// `{"field": ["v1", "v2"]}` — fan out/in over explicit value sets;
    /// fields not named here are inherited from the child by shared name.
    EnumerateValues(HashMap<String, Vec<String>>),
    /// The literal string `"same_job_id"` — the parent shares the
    /// child's job id string exactly (the common case in practice).
    SameJobId(String),
}

/// A `valid_if_or` filter (§4.2, §6): a map from job-id field name to
/// its list of accepted values, optionally with a `"_func"` entry
/// naming a registered predicate. The overall predicate is the OR of
/// every entry — a task is valid if *any* field's parsed value is in
/// its accepted list, or if the named function accepts the parsed
/// fields. An empty (or absent) map is always valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidIfOr(pub HashMap<String, ValidIfEntry>);

impl ValidIfOr {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// One entry of a `valid_if_or` map: either the list of values accepted
/// for that field, or (under the `"_func"` key) the dotted name of a
/// registered predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidIfEntry {
    Values(Vec<String>),
    Func(String),
}

/// The full DAG document: app name → options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DagDocument {
    pub apps: HashMap<String, AppConfig>,
}

/// Where the DAG document comes from. Re-read on every call per §4.2
/// ("Mutation of the underlying document between queries is allowed;
/// each call takes a fresh snapshot").
pub trait ConfigSource: Send + Sync {
    fn load(&self) -> Result<DagDocument, DagError>;
}

/// Reads the document from a JSON file on every call (the `TASKS_JSON`
/// file in the original source).
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSource for FileConfigSource {
    fn load(&self) -> Result<DagDocument, DagError> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| DagError::Load(format!("{}: {e}", self.path.display())))?;
        serde_json::from_str(&text).map_err(|e| DagError::Load(e.to_string()))
    }
}

/// An in-memory document, mutable between calls — used by tests that
/// exercise "live edit mid-processing" behavior (§11).
#[derive(Clone)]
pub struct StaticConfigSource {
    doc: Arc<Mutex<DagDocument>>,
}

impl StaticConfigSource {
    pub fn new(doc: DagDocument) -> Self {
        Self { doc: Arc::new(Mutex::new(doc)) }
    }

    pub fn replace(&self, doc: DagDocument) {
        *self.doc.lock() = doc;
    }

    pub fn insert_app(&self, name: impl Into<String>, config: AppConfig) {
        self.doc.lock().apps.insert(name.into(), config);
    }
}

impl ConfigSource for StaticConfigSource {
    fn load(&self) -> Result<DagDocument, DagError> {
        Ok(self.doc.lock().clone())
    }
}

pub fn load_from_path(path: &Path) -> Result<DagDocument, DagError> {
    FileConfigSource::new(path).load()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
