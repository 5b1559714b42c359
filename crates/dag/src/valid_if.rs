// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `valid_if_or` evaluation (§4.2, §6): true iff the parsed job-id
//! fields satisfy *any* entry of the configured map — a field's parsed
//! value is in its accepted list, or a named `_func` predicate accepts
//! the parsed fields. A task with no `valid_if_or` configured is
//! always valid.

use crate::config::{AppConfig, ValidIfEntry};
use crate::error::DagError;
use crate::grammar::Fields;
use crate::registry::FunctionRegistry;

pub fn is_valid(
    registry: &FunctionRegistry,
    cfg: &AppConfig,
    fields: &Fields,
) -> Result<bool, DagError> {
    if cfg.valid_if_or.is_empty() {
        return Ok(true);
    }
    for (field, entry) in &cfg.valid_if_or.0 {
        if entry_matches(registry, field, entry, fields)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn entry_matches(
    registry: &FunctionRegistry,
    field: &str,
    entry: &ValidIfEntry,
    fields: &Fields,
) -> Result<bool, DagError> {
    match entry {
        ValidIfEntry::Func(name) => {
            let f = registry.valid_if(name).ok_or_else(|| DagError::UnknownFunction(name.clone()))?;
            Ok(f(fields))
        }
        ValidIfEntry::Values(allowed) => {
            Ok(fields.get(field).map(|v| allowed.contains(v)).unwrap_or(false))
        }
    }
}

#[cfg(test)]
#[path = "valid_if_tests.rs"]
mod tests;
