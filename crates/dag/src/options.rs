// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-app options (§4.1's `options(app) -> {max_retry, priority,
//! job_type, ...}`): the small bag of static configuration the engine
//! and runner consult that isn't dependency or validity shaped.

use stolos_core::{Priority, DEFAULT_PRIORITY};

use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    pub job_type: String,
    pub max_retry: u32,
    pub priority: Priority,
}

pub const DEFAULT_MAX_RETRY: u32 = 0;

impl From<&AppConfig> for AppOptions {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            job_type: cfg.job_type.clone(),
            max_retry: cfg.max_retry.unwrap_or(DEFAULT_MAX_RETRY),
            priority: cfg.priority.map(Priority).unwrap_or(DEFAULT_PRIORITY),
        }
    }
}
