// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-task state machine (§4.3).
//!
//! ```text
//! absent ──set(pending)──▶ pending ──set(completed)──▶ completed
//! pending ──set(skipped)──▶ skipped
//! pending ──(retry++ ≤ max)──▶ pending
//! pending ──(retry++ > max)──▶ failed
//! completed ──readd──▶ pending   (also recursively resets descendants)
//! ```

use serde::{Deserialize, Serialize};

/// The state of a single `(app, job_id)` task.
///
/// `Absent` is not a state that is ever persisted; it is the value
/// `StateStore::check_state`/`inspect` return for a task that has never
/// been created (no `set_state`/`put` has happened yet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Absent,
    Pending,
    Completed,
    Failed,
    Skipped,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Failed | TaskState::Skipped)
    }

    /// Skipped tasks count as completed for bubble-down purposes (§4.4, glossary).
    pub fn counts_as_completed(self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Skipped)
    }
}

crate::simple_display! {
    TaskState {
        Absent => "absent",
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
        Skipped => "skipped",
    }
}

/// Queue/lock-derived snapshot of one task, as returned by `inspect` (§4.3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInspection {
    pub state: TaskState,
    pub retry_count: u32,
    pub in_queue: bool,
    pub executing: bool,
    pub app_qsize: u64,
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
