// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors a plugin runner can hit that are not themselves a `PluginOutcome`
/// (i.e. the runner couldn't even attempt the work).
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("job_type {0:?} has no registered runner")]
    UnknownJobType(String),
    #[error("no function registered for name {0:?}")]
    UnknownFunction(String),
    #[error("--bash requires a non-empty command")]
    MissingBashCommand,
}
