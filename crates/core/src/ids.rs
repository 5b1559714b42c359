// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! App and job identifiers.
//!
//! Unlike the engine's other identifiers, `JobId` is never generated by
//! this crate: the grammar that defines a valid job id lives in the DAG
//! configuration (see `stolos-dag`) and is produced by external callers
//! (a cron scheduler, an operator, a bubble-up parent enqueue). A `JobId`
//! is just an opaque, cheaply-cloned string wrapper; equality is exact
//! string equality per spec.

use std::borrow::Borrow;
use std::fmt;

/// Name of a DAG node (an "application" in Stolos terms).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AppName(pub String);

impl AppName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AppName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AppName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for AppName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Opaque job identifier: one concrete unit of execution for an app.
///
/// Two `(app, job_id)` pairs are equal iff both strings are equal (§3).
/// The engine never constructs a `JobId` that fails its app's grammar,
/// but an invalid one may already exist in the store (arrived via an
/// external writer) and the engine must tolerate it (invariant 5).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for JobId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A `(app, job_id)` pair: the atomic unit of execution (a "task").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct TaskKey {
    pub app: AppName,
    pub job_id: JobId,
}

impl TaskKey {
    pub fn new(app: impl Into<AppName>, job_id: impl Into<JobId>) -> Self {
        Self { app: app.into(), job_id: job_id.into() }
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.app, self.job_id)
    }
}
