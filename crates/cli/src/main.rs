// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot worker binary (§6): parses flags, wires `DagView` +
//! `StateStore` + `DependencyEngine` + `PluginRunner`, runs exactly one
//! runner-loop iteration, and exits with the code the iteration implies.

mod cli;
mod exit_error;
mod logging;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use exit_error::ExitError;
use stolos_core::AppName;
use stolos_dag::{FileConfigSource, FunctionRegistry, JsonDagView};
use stolos_engine::{DependencyEngine, IterationOutcome, PluginOutcome, RunMode, RunnerLoop};
use stolos_plugins::DispatchingRunner;
use stolos_store::{MemoryStore, SessionId};

#[tokio::main]
async fn main() {
    let args = cli::Cli::parse();
    let _log_guard = logging::init(args.log_dir.as_deref());

    match run(args).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            tracing::error!(error = %err, "fatal error");
            eprintln!("stolos: {err}");
            std::process::exit(err.code);
        }
    }
}

async fn run(args: cli::Cli) -> Result<i32, ExitError> {
    let app = AppName::new(args.app_name);
    let source = Arc::new(FileConfigSource::new(args.tasks_json));
    let dag = Arc::new(JsonDagView::new(source, FunctionRegistry::new()));
    // `MemoryStore` is the reference `StateStore`/`LockingQueue` backend
    // this workspace ships (Design Notes §9); a deployment that needs
    // state to survive past this one process swaps this line for a
    // client against the real shared coordination cluster without
    // touching the engine, since both speak the same trait.
    let store = Arc::new(MemoryStore::new());
    // A fresh random session id per invocation: process ids get reused by
    // the OS across the lifetime of a long-running scheduler, a `Uuid`
    // doesn't.
    let session = SessionId(uuid::Uuid::new_v4().as_u128() as u64);
    let engine = DependencyEngine::new(dag, store, session);
    let plugin = Arc::new(DispatchingRunner::default());
    let runner = RunnerLoop::new(engine, plugin, args.max_retry);

    let timeout = args.timeout.map(Duration::from_secs);
    let is_manual = args.job_id.is_some();

    let mode = match (&args.bypass_scheduler, &args.job_id) {
        (true, Some(job_id)) => RunMode::Bypass(job_id.as_str().into()),
        (true, None) => {
            return Err(ExitError::new(2, "--bypass_scheduler requires --job_id"));
        }
        (false, Some(job_id)) => RunMode::Manual(job_id.as_str().into()),
        (false, None) => RunMode::Normal,
    };

    let outcome = runner.run_once(&app, mode, args.bash, args.redirect_to_stderr, timeout).await?;
    Ok(exit_code(&outcome, is_manual))
}

/// §6: "Exit code 0 on successful task completion, skipped task, or
/// no-work-available; non-zero on plugin failure when `--job_id` was
/// specified... and on fatal engine errors." A normal-mode retry-cap
/// failure is recorded in the store and does not fail the worker
/// process itself; the next scheduled invocation simply won't see that
/// task queued again.
fn exit_code(outcome: &IterationOutcome, is_manual: bool) -> i32 {
    match outcome {
        IterationOutcome::NoWork
        | IterationOutcome::Completed { .. }
        | IterationOutcome::Skipped { .. }
        | IterationOutcome::Cycled { .. }
        | IterationOutcome::Deferred { .. }
        | IterationOutcome::RetriedWithFailure { .. } => 0,
        IterationOutcome::Failed { .. } => i32::from(is_manual),
        IterationOutcome::ManualRefused { .. } => 1,
        IterationOutcome::BypassRan { outcome, .. } => match outcome {
            PluginOutcome::Failed { .. } => 1,
            PluginOutcome::Completed | PluginOutcome::Skipped => 0,
        },
    }
}
