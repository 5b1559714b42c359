// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `UserFuncRunner`: a named-function registry for `job_type`s that are
//! neither `bash` nor `noop`. Mirrors `stolos_dag::FunctionRegistry`'s
//! dotted-path-keyed `Arc<dyn Fn>` shape (§6: "the runner selects by
//! job_type at invocation time... any mechanism (registry map populated
//! at startup, reflection, plugin table)" — here, a startup-populated
//! map), but over task execution rather than `valid_if_or`/`depends_on`
//! predicates.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use stolos_core::{AppName, JobId};
use stolos_engine::{PluginOutcome, PluginRunner, RunOptions};
use tracing::warn;

pub type UserFn = Arc<dyn Fn(&AppName, &JobId, &RunOptions) -> PluginOutcome + Send + Sync>;

#[derive(Clone, Default)]
pub struct UserFuncRunner {
    functions: HashMap<String, UserFn>,
}

impl UserFuncRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `job_type` as the dotted name dispatching to `f`.
    pub fn register(&mut self, job_type: impl Into<String>, f: UserFn) {
        self.functions.insert(job_type.into(), f);
    }
}

#[async_trait]
impl PluginRunner for UserFuncRunner {
    async fn run(&self, app: &AppName, job_id: &JobId, options: &RunOptions) -> PluginOutcome {
        match self.functions.get(&options.job_type) {
            Some(f) => f(app, job_id, options),
            None => {
                warn!(%app, %job_id, job_type = %options.job_type, "no user_func registered for job_type");
                PluginOutcome::Failed {
                    message: format!("no function registered for job_type {:?}", options.job_type),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "user_func_tests.rs"]
mod tests;
