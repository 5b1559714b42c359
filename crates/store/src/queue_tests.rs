// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use stolos_core::DEFAULT_PRIORITY;

#[test]
fn priority_ascending_then_fifo() {
    let q = MemoryLockingQueue::new();
    q.put(JobId::new("j1"), Priority(20));
    q.put(JobId::new("j2"), Priority(10));
    q.put(JobId::new("j3"), Priority(10));

    let head = q.get().unwrap();
    assert_eq!(head.job_id, JobId::new("j2"));
    q.consume().unwrap();

    let head = q.get().unwrap();
    assert_eq!(head.job_id, JobId::new("j3"));
    q.consume().unwrap();

    let head = q.get().unwrap();
    assert_eq!(head.job_id, JobId::new("j1"));
}

#[test]
fn get_peeks_without_removing() {
    let q = MemoryLockingQueue::new();
    q.put(JobId::new("j1"), DEFAULT_PRIORITY);
    assert_eq!(q.get(), q.get());
    assert_eq!(q.len(), 1);
}

#[test]
fn cycle_moves_head_to_tail_preserving_priority() {
    let q = MemoryLockingQueue::new();
    q.put(JobId::new("j1"), Priority(5));
    q.put(JobId::new("j2"), Priority(5));
    q.get().unwrap();
    q.cycle().unwrap();

    let head = q.get().unwrap();
    assert_eq!(head.job_id, JobId::new("j2"));
    assert_eq!(q.len(), 2);
}

#[test]
fn consume_without_a_held_peek_errors() {
    let q = MemoryLockingQueue::new();
    assert!(q.consume().is_err());
}

#[test]
fn release_peek_lets_another_worker_claim_the_head() {
    let q = MemoryLockingQueue::new();
    q.put(JobId::new("j1"), DEFAULT_PRIORITY);
    q.get().unwrap();
    q.release_peek();
    assert!(q.consume().is_err());
    assert_eq!(q.get().unwrap().job_id, JobId::new("j1"));
}

#[test]
fn contains_reflects_queue_membership() {
    let q = MemoryLockingQueue::new();
    assert!(!q.contains(&JobId::new("j1")));
    q.put(JobId::new("j1"), DEFAULT_PRIORITY);
    assert!(q.contains(&JobId::new("j1")));
}

/// §8 scenario 1 and the `(priority ascending, insertion FIFO)` testable
/// property, across several entry orderings: whatever order the puts
/// arrive in, the dequeue order is priority-ascending with ties broken
/// by insertion order.
#[yare::parameterized(
    already_sorted = { &[("j1", 10), ("j2", 20), ("j3", 30)], &["j1", "j2", "j3"] },
    reverse_order  = { &[("j1", 30), ("j2", 20), ("j3", 10)], &["j3", "j2", "j1"] },
    tie_breaks_fifo = { &[("j1", 10), ("j2", 10), ("j3", 10)], &["j1", "j2", "j3"] },
    mixed_priorities = { &[("j1", 20), ("j2", 10), ("j3", 10), ("j4", 5)], &["j4", "j2", "j3", "j1"] },
)]
fn priority_then_fifo_ordering(entries: &[(&str, i64)], expected: &[&str]) {
    let q = MemoryLockingQueue::new();
    for (job_id, priority) in entries {
        q.put(JobId::new(*job_id), Priority(*priority));
    }
    for want in expected {
        let head = q.get().unwrap();
        assert_eq!(head.job_id, JobId::new(*want));
        q.consume().unwrap();
    }
    assert!(q.get().is_none());
}
