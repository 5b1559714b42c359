// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Options passed through to a `PluginRunner` invocation (§6 CLI
//! surface: `--bash`, `--redirect_to_stderr`, `--timeout`).

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOptions {
    pub job_type: String,
    pub bash_cmd: Option<String>,
    pub redirect_to_stderr: bool,
    pub timeout: Option<Duration>,
}
