// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `NoopRunner`: `job_type=noop`. Always completes immediately; used for
//! DAG fixtures/tests where only the dependency wiring matters, not the
//! payload.

use async_trait::async_trait;
use stolos_core::{AppName, JobId};
use stolos_engine::{PluginOutcome, PluginRunner, RunOptions};

pub struct NoopRunner;

#[async_trait]
impl PluginRunner for NoopRunner {
    async fn run(&self, _app: &AppName, _job_id: &JobId, _options: &RunOptions) -> PluginOutcome {
        PluginOutcome::Completed
    }
}
