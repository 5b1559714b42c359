// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State Store (C3, §4.3): the per-task state machine, retry counter,
//! queue-membership flag, and execute-lock, all addressed by `(app,
//! job_id)`. `MemoryStore` is the in-memory reference implementation
//! used by tests and, per Design Notes §9, ports to a real ZooKeeper-like
//! backend by swapping this module for one that issues the same
//! check-and-set sequence against a real cluster.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use stolos_core::{AppName, JobId, TaskInspection, TaskState};

use crate::lock::{Lock, LockTable, SessionId};
use crate::queue::{LockingQueue, MemoryLockingQueue};

/// The C3 interface the dependency engine and runner consume. Every
/// method is atomic with respect to concurrent callers against the same
/// backing store.
pub trait StateStore: Send + Sync {
    /// Exact-state test; `Absent` matches a task that was never created.
    fn check_state(&self, app: &AppName, job_id: &JobId, state: TaskState) -> bool;

    fn get_state(&self, app: &AppName, job_id: &JobId) -> TaskState;

    /// Atomic `state` transition. This is the checked entry point; it is
    /// identical to `set_state_unsafe` in this implementation because
    /// job-id grammar validation is the caller's (`DagView`'s)
    /// responsibility, not the store's (§4.3: the store has no grammar
    /// to check a job_id against — only `DagView` does).
    fn set_state(&self, app: &AppName, job_id: &JobId, state: TaskState);

    /// Unchecked variant for engine-internal use, identical here to
    /// `set_state` (§4.3).
    fn set_state_unsafe(&self, app: &AppName, job_id: &JobId, state: TaskState) {
        self.set_state(app, job_id, state);
    }

    /// Increments the retry counter and reports whether it now exceeds
    /// `max_retry`.
    fn increment_retry(&self, app: &AppName, job_id: &JobId, max_retry: u32) -> (u32, bool);

    fn retry_count(&self, app: &AppName, job_id: &JobId) -> u32;

    fn reset_retry(&self, app: &AppName, job_id: &JobId);

    /// Non-blocking; `None` if another session holds the lock.
    fn obtain_execute_lock(&self, app: &AppName, job_id: &JobId, session: SessionId) -> Option<Lock>;

    fn release_lock(&self, lock: &Lock);

    fn is_executing(&self, app: &AppName, job_id: &JobId) -> bool;

    fn inspect(&self, app: &AppName, job_id: &JobId) -> TaskInspection;

    /// This app's `LockingQueue`, created on first reference.
    fn queue(&self, app: &AppName) -> Arc<dyn LockingQueue>;
}

#[derive(Debug, Clone)]
struct TaskRecord {
    state: TaskState,
    retry_count: u32,
}

impl Default for TaskRecord {
    fn default() -> Self {
        Self { state: TaskState::Absent, retry_count: 0 }
    }
}

pub struct MemoryStore {
    tasks: Mutex<HashMap<(AppName, JobId), TaskRecord>>,
    locks: LockTable,
    queues: Mutex<HashMap<AppName, Arc<MemoryLockingQueue>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { tasks: Mutex::new(HashMap::new()), locks: LockTable::new(), queues: Mutex::new(HashMap::new()) }
    }

    fn lock_path(app: &AppName, job_id: &JobId) -> String {
        crate::path::lock_path(app.as_str(), job_id.as_str())
    }

    fn queue_impl(&self, app: &AppName) -> Arc<MemoryLockingQueue> {
        let mut queues = self.queues.lock();
        queues.entry(app.clone()).or_insert_with(|| Arc::new(MemoryLockingQueue::new())).clone()
    }
}

impl StateStore for MemoryStore {
    fn check_state(&self, app: &AppName, job_id: &JobId, state: TaskState) -> bool {
        self.get_state(app, job_id) == state
    }

    fn get_state(&self, app: &AppName, job_id: &JobId) -> TaskState {
        self.tasks.lock().get(&(app.clone(), job_id.clone())).map(|t| t.state).unwrap_or(TaskState::Absent)
    }

    fn set_state(&self, app: &AppName, job_id: &JobId, state: TaskState) {
        let mut tasks = self.tasks.lock();
        tasks.entry((app.clone(), job_id.clone())).or_default().state = state;
    }

    fn increment_retry(&self, app: &AppName, job_id: &JobId, max_retry: u32) -> (u32, bool) {
        let mut tasks = self.tasks.lock();
        let record = tasks.entry((app.clone(), job_id.clone())).or_default();
        record.retry_count += 1;
        (record.retry_count, record.retry_count > max_retry)
    }

    fn retry_count(&self, app: &AppName, job_id: &JobId) -> u32 {
        self.tasks.lock().get(&(app.clone(), job_id.clone())).map(|t| t.retry_count).unwrap_or(0)
    }

    fn reset_retry(&self, app: &AppName, job_id: &JobId) {
        let mut tasks = self.tasks.lock();
        tasks.entry((app.clone(), job_id.clone())).or_default().retry_count = 0;
    }

    fn obtain_execute_lock(&self, app: &AppName, job_id: &JobId, session: SessionId) -> Option<Lock> {
        self.locks.try_acquire(&Self::lock_path(app, job_id), session)
    }

    fn release_lock(&self, lock: &Lock) {
        self.locks.release(lock);
    }

    fn is_executing(&self, app: &AppName, job_id: &JobId) -> bool {
        self.locks.is_held(&Self::lock_path(app, job_id))
    }

    fn inspect(&self, app: &AppName, job_id: &JobId) -> TaskInspection {
        let queue = self.queue_impl(app);
        TaskInspection {
            state: self.get_state(app, job_id),
            retry_count: self.retry_count(app, job_id),
            in_queue: queue.contains(job_id),
            executing: self.is_executing(app, job_id),
            app_qsize: queue.len(),
        }
    }

    fn queue(&self, app: &AppName) -> Arc<dyn LockingQueue> {
        self.queue_impl(app)
    }
}

#[cfg(test)]
#[path = "state_store_tests.rs"]
mod tests;
