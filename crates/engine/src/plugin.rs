// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `PluginRunner` (§6): the one collaborator the runner loop invokes to
//! actually execute a task's payload. Concrete runners (bash, noop,
//! named function) live in `stolos-plugins`; this crate only depends on
//! the trait.

use async_trait::async_trait;
use stolos_core::{AppName, JobId};

use crate::options::RunOptions;

/// What a plugin invocation reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginOutcome {
    Completed,
    Failed { message: String },
    Skipped,
}

/// Executes the user payload for one `(app, job_id)`. Implementations
/// MUST be side-effect-safe under retry (§6: "Plugins MUST be
/// side-effect-safe under retry").
#[async_trait]
pub trait PluginRunner: Send + Sync {
    async fn run(&self, app: &AppName, job_id: &JobId, options: &RunOptions) -> PluginOutcome;
}
