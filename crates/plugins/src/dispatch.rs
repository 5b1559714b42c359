// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `DispatchingRunner`: the tagged-variant dispatch over `job_type`
//! described in §9 Design Notes ("Dynamic dispatch over job_type.
//! Modelled as a tagged variant of plugin runners (bash, noop,
//! user_func, ...); the runner selects by job_type at invocation
//! time"). `bash` and `noop` are built in; anything else falls through
//! to the embedded `UserFuncRunner`.

use async_trait::async_trait;
use stolos_core::{AppName, JobId};
use stolos_engine::{PluginOutcome, PluginRunner, RunOptions};

use crate::bash::BashRunner;
use crate::noop::NoopRunner;
use crate::user_func::UserFuncRunner;

pub struct DispatchingRunner {
    bash: BashRunner,
    noop: NoopRunner,
    user_func: UserFuncRunner,
}

impl DispatchingRunner {
    pub fn new(user_func: UserFuncRunner) -> Self {
        Self { bash: BashRunner, noop: NoopRunner, user_func }
    }
}

impl Default for DispatchingRunner {
    fn default() -> Self {
        Self::new(UserFuncRunner::new())
    }
}

#[async_trait]
impl PluginRunner for DispatchingRunner {
    async fn run(&self, app: &AppName, job_id: &JobId, options: &RunOptions) -> PluginOutcome {
        match options.job_type.as_str() {
            "bash" => self.bash.run(app, job_id, options).await,
            "noop" => self.noop.run(app, job_id, options).await,
            _ => self.user_func.run(app, job_id, options).await,
        }
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
