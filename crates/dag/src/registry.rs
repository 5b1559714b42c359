// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named-function registry for `depends_on`/`valid_if_or` `_func` entries
//! (§4.2, Design Notes §9: "a named function registry keyed by a dotted
//! path; implementations may choose any mechanism").
//!
//! Stolos uses a plain registry map populated at startup rather than
//! reflection, matching the teacher's preference for explicit
//! dependency-injected behavior over dynamic lookup.

use std::collections::HashMap;
use std::sync::Arc;

use crate::grammar::Fields;

/// A `depends_on._func` predicate: given the child's parsed job-id
/// fields, returns the parent job ids it depends on.
pub type DependsOnFn = Arc<dyn Fn(&Fields) -> Vec<String> + Send + Sync>;

/// A `valid_if_or._func` predicate: given a task's parsed job-id fields,
/// returns whether the task should run.
pub type ValidIfFn = Arc<dyn Fn(&Fields) -> bool + Send + Sync>;

#[derive(Clone, Default)]
pub struct FunctionRegistry {
    depends_on: HashMap<String, DependsOnFn>,
    valid_if: HashMap<String, ValidIfFn>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_depends_on(&mut self, name: impl Into<String>, f: DependsOnFn) -> &mut Self {
        self.depends_on.insert(name.into(), f);
        self
    }

    pub fn register_valid_if(&mut self, name: impl Into<String>, f: ValidIfFn) -> &mut Self {
        self.valid_if.insert(name.into(), f);
        self
    }

    pub fn depends_on(&self, name: &str) -> Option<&DependsOnFn> {
        self.depends_on.get(name)
    }

    pub fn valid_if(&self, name: &str) -> Option<&ValidIfFn> {
        self.valid_if.get(name)
    }
}
