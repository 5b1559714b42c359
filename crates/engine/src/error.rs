// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine errors (§7): aggregates the lower layers plus the engine's
//! own cases.

use stolos_core::{AppName, JobId};
use stolos_dag::DagError;
use stolos_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{app}/{job_id} is already queued")]
    JobAlreadyQueued { app: AppName, job_id: JobId },

    #[error("plugin reported failure for {app}/{job_id}: {message}")]
    PluginFailed { app: AppName, job_id: JobId, message: String },

    #[error("{app}/{job_id} exceeded max_retry ({retry_count} > {max_retry})")]
    PluginMaxRetriesExceeded { app: AppName, job_id: JobId, retry_count: u32, max_retry: u32 },

    #[error("DAG configuration error: {0}")]
    Config(#[from] DagError),

    #[error("coordination store error: {0}")]
    Store(#[from] StoreError),
}
