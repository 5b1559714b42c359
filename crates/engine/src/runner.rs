// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner Loop (C5, §4.5): one iteration of "pull a job, decide,
//! execute, record outcome". `RunnerLoop` owns a `DependencyEngine` and
//! a `PluginRunner`; `run_once` is the entire per-iteration algorithm,
//! releasing every acquired lock on every exit path (§7).

use std::sync::Arc;
use std::time::Duration;

use stolos_core::{AppName, JobId, TaskState};
use stolos_dag::DagView;
use stolos_store::StateStore;
use tracing::{info, warn};

use crate::dependency_engine::DependencyEngine;
use crate::error::EngineError;
use crate::options::RunOptions;
use crate::plugin::{PluginOutcome, PluginRunner};

/// How one runner invocation should select its work (§6 CLI surface).
#[derive(Debug, Clone)]
pub enum RunMode {
    /// Pull the next job from the app's queue.
    Normal,
    /// Act only on the named job id; dependency and lock checks still
    /// apply.
    Manual(JobId),
    /// Run the plugin inline; the queue and state store are untouched
    /// (`--bypass_scheduler`).
    Bypass(JobId),
}

/// What one runner iteration did, for the CLI to translate into an exit
/// code (§6: success/skip/no-work is 0; plugin failure under
/// `--job_id` and fatal engine errors are non-zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IterationOutcome {
    NoWork,
    Completed { app: AppName, job_id: JobId },
    Skipped { app: AppName, job_id: JobId },
    /// Own execute-lock unavailable or a parent is executing; queue
    /// entry was rotated to the tail for a later attempt.
    Cycled { app: AppName, job_id: JobId },
    /// Non-completed parents were locked and queued on our behalf; our
    /// own queue entry was consumed since the parents now own
    /// continuation.
    Deferred { app: AppName, job_id: JobId },
    RetriedWithFailure { app: AppName, job_id: JobId, retry_count: u32 },
    Failed { app: AppName, job_id: JobId },
    ManualRefused { app: AppName, job_id: JobId, reason: String },
    BypassRan { app: AppName, job_id: JobId, outcome: PluginOutcome },
}

pub struct RunnerLoop<D: DagView, S: StateStore> {
    engine: DependencyEngine<D, S>,
    plugin: Arc<dyn PluginRunner>,
    max_retry_override: Option<u32>,
}

impl<D: DagView, S: StateStore> RunnerLoop<D, S> {
    pub fn new(
        engine: DependencyEngine<D, S>,
        plugin: Arc<dyn PluginRunner>,
        max_retry_override: Option<u32>,
    ) -> Self {
        Self { engine, plugin, max_retry_override }
    }

    pub fn engine(&self) -> &DependencyEngine<D, S> {
        &self.engine
    }

    fn max_retry(&self, app: &AppName) -> Result<u32, EngineError> {
        match self.max_retry_override {
            Some(n) => Ok(n),
            None => Ok(self.engine.dag().options(app)?.max_retry),
        }
    }

    fn run_options(
        &self,
        app: &AppName,
        bash_cmd: Option<String>,
        redirect_to_stderr: bool,
        timeout: Option<Duration>,
    ) -> Result<RunOptions, EngineError> {
        let opts = self.engine.dag().options(app)?;
        Ok(RunOptions { job_type: opts.job_type, bash_cmd, redirect_to_stderr, timeout })
    }

    /// One iteration of the runner loop (§4.5).
    pub async fn run_once(
        &self,
        app: &AppName,
        mode: RunMode,
        bash_cmd: Option<String>,
        redirect_to_stderr: bool,
        timeout: Option<Duration>,
    ) -> Result<IterationOutcome, EngineError> {
        match mode {
            RunMode::Bypass(job_id) => {
                let options = self.run_options(app, bash_cmd, redirect_to_stderr, timeout)?;
                let outcome = self.plugin.run(app, &job_id, &options).await;
                info!(%app, %job_id, ?outcome, "bypass run");
                Ok(IterationOutcome::BypassRan { app: app.clone(), job_id, outcome })
            }
            RunMode::Manual(job_id) => {
                self.run_manual(app, job_id, bash_cmd, redirect_to_stderr, timeout).await
            }
            RunMode::Normal => self.run_from_queue(app, bash_cmd, redirect_to_stderr, timeout).await,
        }
    }

    /// `--job_id` mode: refused outright if the task is already
    /// `completed`, already `in_queue`, or already executing (§4.5: "if
    /// J is completed or in_queue or has a held lock, emit a warning and
    /// exit gracefully"); otherwise it is queued here. `process` is
    /// driven through the same peek/consume/cycle machinery as the
    /// normal path, so (as with the normal path) it assumes `job_id`
    /// ends up at the head of its app's queue — true whenever the queue
    /// was empty before this call, which holds for every manual
    /// invocation in practice (an operator targeting one specific stuck
    /// job).
    async fn run_manual(
        &self,
        app: &AppName,
        job_id: JobId,
        bash_cmd: Option<String>,
        redirect_to_stderr: bool,
        timeout: Option<Duration>,
    ) -> Result<IterationOutcome, EngineError> {
        let store = self.engine.store();
        if store.check_state(app, &job_id, TaskState::Completed) {
            return Ok(self.refuse(app, job_id, "already completed"));
        }
        if store.queue(app).contains(&job_id) {
            return Ok(self.refuse(app, job_id, "already queued"));
        }
        if store.is_executing(app, &job_id) {
            return Ok(self.refuse(app, job_id, "execute-lock already held"));
        }
        let priority = self.engine.dag().options(app)?.priority;
        store.queue(app).put(job_id.clone(), priority);
        store.queue(app).get();
        self.process(app, &job_id, bash_cmd, redirect_to_stderr, timeout).await
    }

    fn refuse(&self, app: &AppName, job_id: JobId, reason: &str) -> IterationOutcome {
        warn!(%app, %job_id, reason, "manual run refused");
        IterationOutcome::ManualRefused { app: app.clone(), job_id, reason: reason.to_string() }
    }

    async fn run_from_queue(
        &self,
        app: &AppName,
        bash_cmd: Option<String>,
        redirect_to_stderr: bool,
        timeout: Option<Duration>,
    ) -> Result<IterationOutcome, EngineError> {
        let Some(head) = self.engine.store().queue(app).get() else {
            return Ok(IterationOutcome::NoWork);
        };
        self.process(app, &head.job_id, bash_cmd, redirect_to_stderr, timeout).await
    }

    /// Steps 3–6 of §4.5. The caller must have already peeked `job_id`
    /// to the head of `app`'s queue (via `get()`); this finalizes that
    /// peek with exactly one `consume()` or `cycle()` on every path.
    async fn process(
        &self,
        app: &AppName,
        job_id: &JobId,
        bash_cmd: Option<String>,
        redirect_to_stderr: bool,
        timeout: Option<Duration>,
    ) -> Result<IterationOutcome, EngineError> {
        let store = self.engine.store();
        let dag = self.engine.dag();
        let queue = store.queue(app);

        // §7 InvalidJobId: a job id that fails its app's grammar may still
        // arrive via the unsafe path (§3 invariant 5, §8 scenario 11). The
        // engine never produces one, but must tolerate one that exists:
        // fail it after a single attempt and drain it from the queue
        // rather than propagating a `ConfigError` that would abort the
        // worker mid-iteration.
        match dag.is_valid(app, job_id) {
            Ok(true) => {}
            Ok(false) => {
                store.set_state(app, job_id, TaskState::Skipped);
                queue.consume()?;
                self.engine.queue_children(app, job_id)?;
                return Ok(IterationOutcome::Skipped { app: app.clone(), job_id: job_id.clone() });
            }
            Err(stolos_dag::DagError::InvalidJobId { .. }) => {
                warn!(%app, %job_id, "invalid job id, failing without running the plugin");
                store.set_state_unsafe(app, job_id, TaskState::Failed);
                queue.consume()?;
                return Ok(IterationOutcome::Failed { app: app.clone(), job_id: job_id.clone() });
            }
            Err(e) => return Err(e.into()),
        }

        let ensure = self.engine.ensure_parents_completed(app, job_id)?;
        if !ensure.all_parents_completed {
            if ensure.should_consume_self {
                queue.consume()?;
                for lock in &ensure.parent_locks {
                    store.release_lock(lock);
                }
                return Ok(IterationOutcome::Deferred { app: app.clone(), job_id: job_id.clone() });
            }
            queue.cycle()?;
            return Ok(IterationOutcome::Cycled { app: app.clone(), job_id: job_id.clone() });
        }

        let Some(own_lock) = store.obtain_execute_lock(app, job_id, self.engine.session()) else {
            queue.cycle()?;
            return Ok(IterationOutcome::Cycled { app: app.clone(), job_id: job_id.clone() });
        };

        store.set_state(app, job_id, TaskState::Pending);

        let options = self.run_options(app, bash_cmd, redirect_to_stderr, timeout)?;
        let outcome = self.plugin.run(app, job_id, &options).await;
        let result = self.record_outcome(app, job_id, outcome).await;
        store.release_lock(&own_lock);
        result
    }

    async fn record_outcome(
        &self,
        app: &AppName,
        job_id: &JobId,
        outcome: PluginOutcome,
    ) -> Result<IterationOutcome, EngineError> {
        let store = self.engine.store();
        let queue = store.queue(app);
        match outcome {
            PluginOutcome::Completed => {
                store.set_state(app, job_id, TaskState::Completed);
                queue.consume()?;
                self.engine.queue_children(app, job_id)?;
                info!(%app, %job_id, "task completed");
                Ok(IterationOutcome::Completed { app: app.clone(), job_id: job_id.clone() })
            }
            PluginOutcome::Skipped => {
                store.set_state(app, job_id, TaskState::Skipped);
                queue.consume()?;
                self.engine.queue_children(app, job_id)?;
                Ok(IterationOutcome::Skipped { app: app.clone(), job_id: job_id.clone() })
            }
            PluginOutcome::Failed { message } => {
                let max_retry = self.max_retry(app)?;
                let (retry_count, exceeded) = store.increment_retry(app, job_id, max_retry);
                if exceeded {
                    store.set_state(app, job_id, TaskState::Failed);
                    queue.consume()?;
                    warn!(%app, %job_id, %message, retry_count, "task failed, max_retry exceeded");
                    return Ok(IterationOutcome::Failed { app: app.clone(), job_id: job_id.clone() });
                }
                queue.cycle()?;
                warn!(%app, %job_id, %message, retry_count, "task failed, retrying");
                Ok(IterationOutcome::RetriedWithFailure {
                    app: app.clone(),
                    job_id: job_id.clone(),
                    retry_count,
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
