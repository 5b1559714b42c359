// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `BashRunner`: `job_type=bash` (§6 `--bash CMD…`). Shells out via
//! `tokio::process::Command`, the same shape the teacher's effect
//! executor uses for its own shell effects (`bash -c`, `current_dir`,
//! output captured and logged rather than inherited).

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use stolos_core::{AppName, JobId};
use stolos_engine::{PluginOutcome, PluginRunner, RunOptions};
use tokio::process::Command;
use tracing::{info, warn};

pub struct BashRunner;

#[async_trait]
impl PluginRunner for BashRunner {
    async fn run(&self, app: &AppName, job_id: &JobId, options: &RunOptions) -> PluginOutcome {
        let Some(cmd) = options.bash_cmd.as_deref().filter(|c| !c.trim().is_empty()) else {
            return PluginOutcome::Failed { message: "--bash requires a non-empty command".into() };
        };

        let script = if options.redirect_to_stderr { format!("{cmd} 1>&2") } else { cmd.to_string() };

        let mut command = Command::new("bash");
        command
            .arg("-c")
            .arg(&script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        info!(%app, %job_id, %cmd, "running bash plugin");
        let output = match options.timeout {
            Some(timeout) => run_with_timeout(command, timeout).await,
            None => command.output().await.map_err(|e| e.to_string()),
        };

        match output {
            Ok(output) if output.status.success() => {
                if !output.stdout.is_empty() {
                    info!(%app, %job_id, stdout = %String::from_utf8_lossy(&output.stdout), "bash plugin stdout");
                }
                PluginOutcome::Completed
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                let code = output.status.code().unwrap_or(-1);
                warn!(%app, %job_id, exit_code = code, %stderr, "bash plugin failed");
                PluginOutcome::Failed { message: format!("exit code {code}: {stderr}") }
            }
            Err(message) => {
                warn!(%app, %job_id, %message, "bash plugin execution error");
                PluginOutcome::Failed { message }
            }
        }
    }
}

async fn run_with_timeout(mut command: Command, timeout: Duration) -> Result<std::process::Output, String> {
    let mut child = command.spawn().map_err(|e| e.to_string())?;
    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(_) => Err(format!("timed out after {:?}", timeout)),
    }
}

#[cfg(test)]
#[path = "bash_tests.rs"]
mod tests;
