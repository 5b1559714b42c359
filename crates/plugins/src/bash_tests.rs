// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use super::*;

fn options(bash_cmd: &str) -> RunOptions {
    RunOptions {
        job_type: "bash".to_string(),
        bash_cmd: Some(bash_cmd.to_string()),
        redirect_to_stderr: false,
        timeout: None,
    }
}

#[tokio::test]
async fn a_succeeding_command_completes() {
    let runner = BashRunner;
    let app = AppName::new("a");
    let job = JobId::new("j1");
    let outcome = runner.run(&app, &job, &options("exit 0")).await;
    assert_eq!(outcome, PluginOutcome::Completed);
}

#[tokio::test]
async fn a_failing_command_reports_the_exit_code() {
    let runner = BashRunner;
    let app = AppName::new("a");
    let job = JobId::new("j1");
    let outcome = runner.run(&app, &job, &options("exit 7")).await;
    match outcome {
        PluginOutcome::Failed { message } => assert!(message.contains("exit code 7")),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn a_missing_command_fails_without_spawning_a_shell() {
    let runner = BashRunner;
    let app = AppName::new("a");
    let job = JobId::new("j1");
    let opts = RunOptions { job_type: "bash".into(), bash_cmd: None, redirect_to_stderr: false, timeout: None };
    let outcome = runner.run(&app, &job, &opts).await;
    assert!(matches!(outcome, PluginOutcome::Failed { .. }));
}

#[tokio::test]
async fn a_command_past_its_timeout_is_killed_and_reported_as_failed() {
    let runner = BashRunner;
    let app = AppName::new("a");
    let job = JobId::new("j1");
    let mut opts = options("sleep 5");
    opts.timeout = Some(Duration::from_millis(50));
    let outcome = runner.run(&app, &job, &opts).await;
    match outcome {
        PluginOutcome::Failed { message } => assert!(message.contains("timed out")),
        other => panic!("expected Failed, got {other:?}"),
    }
}
