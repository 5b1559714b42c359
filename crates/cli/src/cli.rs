// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flag parsing for one worker invocation (§6 CLI surface).

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "stolos", about = "Stolos distributed DAG job scheduler worker")]
pub struct Cli {
    /// Which app queue to service.
    #[arg(short = 'a', long)]
    pub app_name: String,

    /// Manual mode: act only on this job id.
    #[arg(long)]
    pub job_id: Option<String>,

    /// Run the plugin inline; do not touch the coordination store.
    #[arg(long)]
    pub bypass_scheduler: bool,

    /// Override the app's configured max_retry.
    #[arg(long)]
    pub max_retry: Option<u32>,

    /// Plugin execution timeout, in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// For job_type=bash, the command to exec.
    #[arg(long)]
    pub bash: Option<String>,

    /// Route plugin stdout to stderr.
    #[arg(long)]
    pub redirect_to_stderr: bool,

    /// Path to the DAG configuration document (JSON).
    #[arg(long, env = "TASKS_JSON")]
    pub tasks_json: PathBuf,

    /// Directory for a rotating log file, in addition to stderr.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
