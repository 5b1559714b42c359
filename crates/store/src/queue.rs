// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `LockingQueue` (C1, §4.1): a per-app FIFO ordered by
//! `(priority_bucket, insertion_order)`, with a two-phase `get`/`consume`
//! so a peeked head survives until explicitly finalized, and a `cycle`
//! to rotate past a head that cannot run right now.

use std::collections::VecDeque;

use parking_lot::Mutex;
use stolos_core::{JobId, Priority};

use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    job_id: JobId,
    priority: Priority,
    seq: u64,
}

/// The head of the queue, returned by `get()`. Held until `consume()` or
/// `cycle()` is called; another `get()` before then returns the same
/// head again (a peek, not a dequeue).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueHead {
    pub job_id: JobId,
    pub priority: Priority,
}

pub trait LockingQueue: Send + Sync {
    /// Appends `job_id` at its priority bucket; within a bucket, FIFO by
    /// insertion order. Duplicate rejection is an engine-level concern,
    /// not this primitive's (§4.1).
    fn put(&self, job_id: JobId, priority: Priority);

    /// Peek the current head without removing it. Returns `None` if
    /// empty. Repeated calls return the same entry until `consume` or
    /// `cycle`.
    fn get(&self) -> Option<QueueHead>;

    /// Finalizes (removes) the currently held head. Errors if nothing is
    /// held (`get` was never called, or it was already consumed/cycled).
    fn consume(&self) -> Result<(), StoreError>;

    /// Removes the head and re-puts it at the tail with the same
    /// priority — used to rotate past a task that cannot run right now.
    fn cycle(&self) -> Result<(), StoreError>;

    /// Releases a held peek without consuming or cycling it, as happens
    /// when the holder's session is lost mid-inspection (§4.1: "on
    /// session loss the peek is released so another worker may claim
    /// the head"). A no-op if nothing is held.
    fn release_peek(&self);

    /// Whether `job_id` currently has an entry anywhere in the queue.
    fn contains(&self, job_id: &JobId) -> bool;

    /// Number of entries currently queued.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory `LockingQueue` for one app. Ordering is maintained by a
/// stable sort on `(priority, seq)` each time the head is recomputed —
/// queues in practice stay small (per-app backlog), so this trades a
/// small amount of CPU for a much simpler implementation than a heap
/// with priority-decrease support.
#[derive(Default)]
pub struct MemoryLockingQueue {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    entries: VecDeque<Entry>,
    next_seq: u64,
    /// The job_id of the entry currently "held" by a peek, if any. The
    /// entry itself stays in `entries` until consumed or cycled so that
    /// `len()`/`contains()` remain accurate while a peek is outstanding.
    held: Option<JobId>,
}

impl MemoryLockingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn head_entry(inner: &Inner) -> Option<&Entry> {
        inner.entries.iter().min_by(|a, b| (a.priority, a.seq).cmp(&(b.priority, b.seq)))
    }
}

impl LockingQueue for MemoryLockingQueue {
    fn put(&self, job_id: JobId, priority: Priority) {
        let mut inner = self.inner.lock();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.push_back(Entry { job_id, priority, seq });
    }

    fn get(&self) -> Option<QueueHead> {
        let mut inner = self.inner.lock();
        let head = Self::head_entry(&inner).cloned()?;
        inner.held = Some(head.job_id.clone());
        Some(QueueHead { job_id: head.job_id, priority: head.priority })
    }

    fn consume(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let Some(held) = inner.held.take() else {
            return Err(StoreError::NotFound("no held queue entry to consume".to_string()));
        };
        if let Some(pos) = inner.entries.iter().position(|e| e.job_id == held) {
            inner.entries.remove(pos);
        }
        Ok(())
    }

    fn cycle(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let Some(held) = inner.held.take() else {
            return Err(StoreError::NotFound("no held queue entry to cycle".to_string()));
        };
        let Some(pos) = inner.entries.iter().position(|e| e.job_id == held) else {
            return Ok(());
        };
        if let Some(entry) = inner.entries.remove(pos) {
            let seq = inner.next_seq;
            inner.next_seq += 1;
            inner.entries.push_back(Entry { seq, ..entry });
        }
        Ok(())
    }

    fn release_peek(&self) {
        self.inner.lock().held = None;
    }

    fn contains(&self, job_id: &JobId) -> bool {
        let inner = self.inner.lock();
        inner.entries.iter().any(|e| &e.job_id == job_id)
    }

    fn len(&self) -> u64 {
        self.inner.lock().entries.len() as u64
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
