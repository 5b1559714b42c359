// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! stolos-dag: the pure, read-only DAG query surface (C2 `DagView`).
//!
//! A DAG document maps app names to `depends_on`/`valid_if_or`/
//! `job_id_grammar` configuration. Every query here is a pure function
//! of the document plus its arguments — nothing in this crate talks to
//! the coordination store. Mutating the underlying document between
//! queries is expected and supported via `ConfigSource`.

pub mod config;
pub mod depends;
pub mod error;
pub mod grammar;
pub mod options;
pub mod registry;
pub mod topo;
pub mod valid_if;
pub mod view;

pub use config::{AppConfig, ConfigSource, DagDocument, FileConfigSource, JobIdSelector, StaticConfigSource, ValidIfEntry, ValidIfOr};
pub use error::DagError;
pub use grammar::{Fields, Grammar};
pub use options::AppOptions;
pub use registry::{DependsOnFn, FunctionRegistry, ValidIfFn};
pub use topo::topological_sort;
pub use view::{DagView, JsonDagView};
