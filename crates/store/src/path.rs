// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path builders for the abstract store layout (§6):
//! `<root>/<app_name>/{queue, locks/<job_id>, <job_id>/state, <job_id>/retry_count}`.
//!
//! Exact path strings are implementation-defined but stable across worker
//! versions — callers never construct these strings by hand.

pub fn app_root(app: &str) -> String {
    format!("/{app}")
}

pub fn queue_path(app: &str) -> String {
    format!("{}/queue", app_root(app))
}

pub fn lock_path(app: &str, job_id: &str) -> String {
    format!("{}/locks/{job_id}", app_root(app))
}

pub fn state_path(app: &str, job_id: &str) -> String {
    format!("{}/{job_id}/state", app_root(app))
}

pub fn retry_count_path(app: &str, job_id: &str) -> String {
    format!("{}/{job_id}/retry_count", app_root(app))
}
