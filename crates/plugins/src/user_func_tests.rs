// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn options(job_type: &str) -> RunOptions {
    RunOptions { job_type: job_type.to_string(), bash_cmd: None, redirect_to_stderr: false, timeout: None }
}

#[tokio::test]
async fn dispatches_to_the_registered_function_by_job_type() {
    let mut registry = UserFuncRunner::new();
    registry.register("send_email", Arc::new(|_app: &AppName, _job_id: &JobId, _opts: &RunOptions| PluginOutcome::Completed));

    let app = AppName::new("notifications");
    let job = JobId::new("j1");
    let outcome = registry.run(&app, &job, &options("send_email")).await;
    assert_eq!(outcome, PluginOutcome::Completed);
}

#[tokio::test]
async fn an_unregistered_job_type_fails_rather_than_panicking() {
    let registry = UserFuncRunner::new();
    let app = AppName::new("notifications");
    let job = JobId::new("j1");
    let outcome = registry.run(&app, &job, &options("unregistered")).await;
    assert!(matches!(outcome, PluginOutcome::Failed { .. }));
}
