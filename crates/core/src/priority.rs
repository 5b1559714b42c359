// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue priority (§3 Queue, §4.1 `LockingQueue`).
//!
//! Smaller value dequeues first; ties break on FIFO insertion order.

use serde::{Deserialize, Serialize};

/// Fixed middle bucket used when a caller doesn't specify a priority
/// (`maybe_add_subtask(app, job_id, priority=None)`, §4.4).
pub const DEFAULT_PRIORITY: Priority = Priority(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub i64);

impl Priority {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }
}

impl Default for Priority {
    fn default() -> Self {
        DEFAULT_PRIORITY
    }
}

impl From<i64> for Priority {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_ascending() {
        assert!(Priority::new(10) < Priority::new(20));
    }

    #[test]
    fn default_is_the_middle_bucket() {
        assert_eq!(Priority::default(), DEFAULT_PRIORITY);
    }
}
