// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ephemeral execute-locks (§3, §4.1): a per-task mutual-exclusion
//! primitive whose lifetime is bounded by the holder's session. Worker
//! death is simulated via explicit session-loss, which releases every
//! lock that session held.

use std::collections::HashMap;

use parking_lot::Mutex;

/// Identifies one worker's store session. Locks held by a session are
/// released when the session is declared lost (§5, "worker death is
/// detected via ephemeral-lock session loss").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

/// A held execute-lock. Dropping this without calling `release` leaves
/// the lock held — callers release explicitly on every exit path (§7
/// policy: "all acquired locks are released on every exit path").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lock {
    pub path: String,
    pub session: SessionId,
}

#[derive(Default)]
pub struct LockTable {
    holders: Mutex<HashMap<String, SessionId>>,
}

impl LockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-blocking acquire. Returns `None` if another session already
    /// holds the lock at `path`; re-entrant for the same session (a
    /// session that already holds a lock may "acquire" it again, which
    /// is how a child observing its own previously-taken parent-lock
    /// behaves under the engine's worklist traversal).
    pub fn try_acquire(&self, path: &str, session: SessionId) -> Option<Lock> {
        let mut holders = self.holders.lock();
        match holders.get(path) {
            Some(holder) if *holder != session => None,
            _ => {
                holders.insert(path.to_string(), session);
                Some(Lock { path: path.to_string(), session })
            }
        }
    }

    pub fn release(&self, lock: &Lock) {
        let mut holders = self.holders.lock();
        if holders.get(lock.path.as_str()) == Some(&lock.session) {
            holders.remove(&lock.path);
        }
    }

    pub fn is_held(&self, path: &str) -> bool {
        self.holders.lock().contains_key(path)
    }

    /// Releases every lock held by `session` (simulated crash / session
    /// expiry).
    pub fn release_session(&self, session: SessionId) {
        self.holders.lock().retain(|_, holder| *holder != session);
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
