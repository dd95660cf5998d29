//! Hook execution boundary
//!
//! Modules carry optional shell hooks (`init.sh`, `refresh.sh`) that run as
//! separate processes with captured output. The [`HookRunner`] trait keeps
//! the initializer and refresh flows testable without spawning anything.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{self, Result};

/// Captured result of one hook invocation.
#[derive(Debug, Clone)]
pub struct HookOutcome {
    /// Exit status code; `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl HookOutcome {
    /// Whether the hook exited successfully.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Exit status for display, `-1` standing in for signal termination.
    pub fn status_code(&self) -> i32 {
        self.status.unwrap_or(-1)
    }
}

/// Runs module hooks as blocking external processes.
pub trait HookRunner {
    /// Run the hook file, blocking until it exits. An `Err` means the hook
    /// could not be started at all; a started hook that exits non-zero is an
    /// `Ok` outcome with `success() == false`.
    fn run(&self, hook: &Path) -> Result<HookOutcome>;
}

/// Executes hooks as `sh <hook-path>` with the workspace root as working
/// directory, so every hook sees the whole workspace regardless of which
/// module it belongs to.
pub struct ProcessHookRunner {
    workspace_root: PathBuf,
}

impl ProcessHookRunner {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
        }
    }
}

impl HookRunner for ProcessHookRunner {
    fn run(&self, hook: &Path) -> Result<HookOutcome> {
        let output = Command::new("sh")
            .arg(hook)
            .current_dir(&self.workspace_root)
            .output()
            .map_err(|e| {
                error::io_error(format!("Failed to run hook {}: {}", hook.display(), e))
            })?;

        Ok(HookOutcome {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
