// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency Engine (C4, §4.4): `maybe_add_subtask`, `readd_subtask`,
//! `ensure_parents_completed`, and the bubble-down (`queue_children`) —
//! the race-free bubble-up/bubble-down logic that is the heart of the
//! scheduler.
//!
//! Recursion through the DAG (descendant reset, bubble-down) is
//! implemented with an explicit worklist rather than direct recursion,
//! per Design Notes §9, to bound stack usage and make traversal order
//! deterministic.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use stolos_core::{AppName, JobId, Priority, TaskKey, TaskState};
use stolos_dag::DagView;
use stolos_store::{SessionId, StateStore};

use crate::error::EngineError;
use crate::result::EnsureParentsResult;

pub struct DependencyEngine<D: DagView, S: StateStore> {
    dag: Arc<D>,
    store: Arc<S>,
    session: SessionId,
}

impl<D: DagView, S: StateStore> DependencyEngine<D, S> {
    pub fn new(dag: Arc<D>, store: Arc<S>, session: SessionId) -> Self {
        Self { dag, store, session }
    }

    pub fn dag(&self) -> &D {
        &self.dag
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// §4.4 `maybe_add_subtask`: enqueue iff not already `in_queue` and
    /// not `completed`. Sets `pending` only for a task that has never
    /// been seen before (`Absent`); an existing `failed`/`skipped` task
    /// keeps its recorded state when re-enqueued by a caller other than
    /// `readd_subtask` (which resets state explicitly).
    pub fn maybe_add_subtask(
        &self,
        app: &AppName,
        job_id: &JobId,
        priority: Option<Priority>,
    ) -> Result<bool, EngineError> {
        if self.store.check_state(app, job_id, TaskState::Completed) {
            return Ok(false);
        }
        if self.store.check_state(app, job_id, TaskState::Skipped) {
            return Ok(false);
        }
        let queue = self.store.queue(app);
        if queue.contains(job_id) {
            return Ok(false);
        }
        if self.store.check_state(app, job_id, TaskState::Absent) {
            self.store.set_state(app, job_id, TaskState::Pending);
        }
        queue.put(job_id.clone(), priority.unwrap_or(stolos_core::DEFAULT_PRIORITY));
        Ok(true)
    }

    /// §4.4 `readd_subtask`: re-queue a task in any state. Fails with
    /// `JobAlreadyQueued` if the task is currently `in_queue` — re-adding
    /// something already live is a user error (§8 scenario 10).
    pub fn readd_subtask(&self, app: &AppName, job_id: &JobId) -> Result<(), EngineError> {
        if self.store.queue(app).contains(job_id) {
            return Err(EngineError::JobAlreadyQueued { app: app.clone(), job_id: job_id.clone() });
        }
        self.store.set_state(app, job_id, TaskState::Pending);
        self.store.reset_retry(app, job_id);
        self.store.queue(app).put(job_id.clone(), stolos_core::DEFAULT_PRIORITY);
        self.reset_completed_descendants(app, job_id)?;
        Ok(())
    }

    /// Walks every descendant of `(app, job_id)` and resets any that
    /// count as completed (`completed` or `skipped`) back to `pending`,
    /// without re-queueing them — descendants are re-queued naturally
    /// when their parent completes again and bubble-down fires (§4.4).
    fn reset_completed_descendants(&self, app: &AppName, job_id: &JobId) -> Result<(), EngineError> {
        let mut worklist: VecDeque<TaskKey> = VecDeque::new();
        worklist.push_back(TaskKey::new(app.clone(), job_id.clone()));
        let mut visited: HashSet<TaskKey> = HashSet::new();

        while let Some(node) = worklist.pop_front() {
            for child in self.dag.children(&node.app, &node.job_id)? {
                if !visited.insert(child.clone()) {
                    continue;
                }
                if self.store.get_state(&child.app, &child.job_id).counts_as_completed() {
                    self.store.set_state(&child.app, &child.job_id, TaskState::Pending);
                }
                worklist.push_back(child);
            }
        }
        Ok(())
    }

    /// §4.4 `ensure_parents_completed`. Called by a worker that has just
    /// peeked (not consumed) `(app, job_id)`.
    pub fn ensure_parents_completed(
        &self,
        app: &AppName,
        job_id: &JobId,
    ) -> Result<EnsureParentsResult, EngineError> {
        let parents = self.dag.parents(app, job_id)?;
        let mut held_locks = Vec::new();
        let mut all_completed = true;

        for parent in &parents {
            if self.store.get_state(&parent.app, &parent.job_id).counts_as_completed() {
                continue;
            }
            all_completed = false;
            match self.store.obtain_execute_lock(&parent.app, &parent.job_id, self.session) {
                Some(lock) => {
                    self.maybe_add_subtask(&parent.app, &parent.job_id, None)?;
                    held_locks.push(lock);
                }
                None => {
                    // A parent is executing right now. Design Notes §9
                    // open question (b): release every lock acquired so
                    // far and report failure; the caller cycles and
                    // retries later.
                    for lock in held_locks.drain(..) {
                        self.store.release_lock(&lock);
                    }
                    return Ok(EnsureParentsResult {
                        all_parents_completed: false,
                        should_consume_self: false,
                        parent_locks: Vec::new(),
                    });
                }
            }
        }

        Ok(EnsureParentsResult {
            all_parents_completed: all_completed,
            should_consume_self: !all_completed,
            parent_locks: held_locks,
        })
    }

    /// §4.4 `_maybe_queue_children`. MUST be called only after the
    /// parent has been marked `completed` (the runner loop enforces
    /// this ordering; see §4.4 "Race C").
    pub fn queue_children(&self, parent_app: &AppName, parent_job_id: &JobId) -> Result<(), EngineError> {
        let mut worklist: VecDeque<TaskKey> = VecDeque::new();
        worklist.push_back(TaskKey::new(parent_app.clone(), parent_job_id.clone()));

        while let Some(node) = worklist.pop_front() {
            for child in self.dag.children(&node.app, &node.job_id)? {
                if self.store.get_state(&child.app, &child.job_id).counts_as_completed() {
                    continue;
                }
                if self.store.queue(&child.app).contains(&child.job_id) {
                    continue;
                }
                if self.store.is_executing(&child.app, &child.job_id) {
                    continue;
                }
                if !self.dag.is_valid(&child.app, &child.job_id)? {
                    self.store.set_state(&child.app, &child.job_id, TaskState::Skipped);
                    // Skipped counts as completed for bubble-down (glossary).
                    worklist.push_back(child);
                    continue;
                }
                let options = self.dag.options(&child.app)?;
                self.maybe_add_subtask(&child.app, &child.job_id, Some(options.priority))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "dependency_engine_tests.rs"]
mod tests;
