// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job-id grammar: an ordered list of field names, `_`-delimited in the
//! wire format (`20140601_1` against the grammar `["date", "counter"]`).
//!
//! Out of scope per §1 ("job-id grammar/validation") refers to *defining
//! new grammars at the plugin boundary*; the grammar is still data the
//! DAG document carries and the engine must parse to evaluate
//! `depends_on`/`valid_if_or`, so it lives here.

use std::collections::BTreeMap;

use crate::error::DagError;

/// Parsed job-id fields, keyed by grammar field name.
pub type Fields = BTreeMap<String, String>;

/// Ordered field names for one app's job ids. An empty grammar means the
/// job id is treated as a single opaque field named `"job_id"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Grammar(pub Vec<String>);

impl Grammar {
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    /// Split a job id into its named fields per this grammar.
    ///
    /// Returns `DagError::InvalidJobId` if the id doesn't split into
    /// exactly as many parts as the grammar has fields.
    pub fn parse(&self, app: &str, job_id: &str) -> Result<Fields, DagError> {
        if self.0.is_empty() {
            let mut fields = Fields::new();
            fields.insert("job_id".to_string(), job_id.to_string());
            return Ok(fields);
        }
        let parts: Vec<&str> = job_id.splitn(self.0.len(), '_').collect();
        if parts.len() != self.0.len() {
            return Err(DagError::InvalidJobId { app: app.to_string(), job_id: job_id.to_string() });
        }
        Ok(self.0.iter().cloned().zip(parts.into_iter().map(str::to_string)).collect())
    }

    /// Reconstruct a job id string from a field map, in grammar order.
    ///
    /// Returns `None` if any grammar field is missing from `fields`
    /// (never produced by the engine per invariant 5 — callers treat
    /// this as "cannot derive this dependency" and skip it).
    pub fn render(&self, fields: &Fields) -> Option<String> {
        if self.0.is_empty() {
            return fields.get("job_id").cloned();
        }
        let mut parts = Vec::with_capacity(self.0.len());
        for name in &self.0 {
            parts.push(fields.get(name)?.as_str());
        }
        Some(parts.join("_"))
    }

    /// Field names shared by name with another grammar, in `self`'s order.
    /// Used to reconstruct a dependent task's id from a shared "backbone"
    /// of fields when a selector pins or enumerates additional fields.
    pub fn backbone_with(&self, other: &Grammar) -> Vec<String> {
        self.0.iter().filter(|f| other.0.contains(f)).cloned().collect()
    }
}

#[cfg(test)]
#[path = "grammar_tests.rs"]
mod tests;
