// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concrete `PluginRunner` implementations (§6 Plugin contract):
//! `bash` (shells out), `noop` (always completes), and a named-function
//! registry for anything else, tied together by job_type dispatch.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod bash;
pub mod dispatch;
pub mod error;
pub mod noop;
pub mod user_func;

pub use bash::BashRunner;
pub use dispatch::DispatchingRunner;
pub use error::PluginError;
pub use noop::NoopRunner;
pub use user_func::{UserFn, UserFuncRunner};
