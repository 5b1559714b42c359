// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordination-store errors (§7).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("execute-lock for {0:?} is held by another session")]
    LockNotAcquired(String),

    #[error("session {0:?} has expired; its locks and queue peeks were released")]
    SessionExpired(String),

    #[error("compare-and-swap conflict at path {0:?}")]
    CasConflict(String),

    #[error("no node at path {0:?}")]
    NotFound(String),

    #[error("store I/O error: {0}")]
    Io(String),
}
