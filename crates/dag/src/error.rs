// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! DagView errors — surfaced to the engine as `ConfigError` (§7).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DagError {
    #[error("unknown app {0:?}")]
    UnknownApp(String),

    #[error("job id {job_id:?} does not satisfy the grammar for app {app:?}")]
    InvalidJobId { app: String, job_id: String },

    #[error("dependency cycle detected involving app {0:?}")]
    CycleDetected(String),

    #[error("no registered valid_if_or/depends_on function named {0:?}")]
    UnknownFunction(String),

    #[error("app {app:?} depends_on {parent:?} but field {field:?} is in neither grammar")]
    UnresolvedField { app: String, parent: String, field: String },

    #[error("failed to load DAG document: {0}")]
    Load(String),
}
