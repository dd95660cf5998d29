//! Error types and handling for Sprout
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration errors
//! - [`workspace`]: Workspace errors
//! - [`manifest`]: Module manifest errors
//! - [`git`]: Git operation errors
//! - [`module`]: Module lifecycle errors
//! - [`fs`]: File system errors

// Declare submodules
pub mod config;
pub mod fs;
pub mod git;
pub mod manifest;
pub mod module;
pub mod workspace;

// Re-export convenience constructors from submodules
#[allow(unused_imports)]
pub use config::{
    not_found as config_not_found, parse_failed as config_parse_failed,
    read_failed as config_read_failed,
};
#[allow(unused_imports)]
pub use fs::{io_error, read_failed as file_read_failed, write_failed as file_write_failed};
#[allow(unused_imports)]
pub use git::{clone_failed, operation_failed as git_operation_failed};
#[allow(unused_imports)]
pub use manifest::invalid_placement_path;
#[allow(unused_imports)]
pub use module::{
    hook_failed, init_incomplete, no_refresh_hook, not_found as module_not_found,
    refresh_incomplete,
};
#[allow(unused_imports)]
pub use workspace::{not_found as workspace_not_found, unreadable as workspace_unreadable};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Sprout operations
#[derive(Error, Diagnostic, Debug)]
pub enum SproutError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(sprout::config::not_found),
        help("Create a sprout.yaml with a 'modules:' list, or pass --config <file>")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(sprout::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(sprout::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // Workspace errors
    #[error("Workspace not found at: {path}")]
    #[diagnostic(
        code(sprout::workspace::not_found),
        help("Run 'sprout init' from the project root, or pass --workspace <dir>")
    )]
    WorkspaceNotFound { path: String },

    #[error("Cannot access workspace root: {path}")]
    #[diagnostic(code(sprout::workspace::unreadable))]
    WorkspaceUnreadable { path: String, reason: String },

    // Manifest errors
    #[error("Placement path escapes the workspace: {path}")]
    #[diagnostic(
        code(sprout::manifest::invalid_placement_path),
        help("Manifest 'path' entries must stay inside the workspace root")
    )]
    InvalidPlacementPath { path: String },

    // Git errors
    #[error("Git operation failed: {message}")]
    #[diagnostic(code(sprout::git::operation_failed))]
    GitOperationFailed { message: String },

    #[error("Failed to clone repository: {url}: {reason}")]
    #[diagnostic(
        code(sprout::git::clone_failed),
        help("Check that URL is correct and you have access to repository")
    )]
    GitCloneFailed { url: String, reason: String },

    // Module lifecycle errors
    #[error("Module '{name}' not found")]
    #[diagnostic(
        code(sprout::module::not_found),
        help("Run 'sprout list' to see the modules placed in this workspace")
    )]
    ModuleNotFound { name: String },

    #[error("Module '{name}' has no refresh hook")]
    #[diagnostic(code(sprout::module::no_refresh_hook))]
    NoRefreshHook { name: String },

    #[error("Hook failed for module '{name}' (exit status {status})")]
    #[diagnostic(code(sprout::module::hook_failed))]
    HookFailed { name: String, status: i32 },

    #[error("Initialization failed for {failed} module(s)")]
    #[diagnostic(
        code(sprout::module::init_incomplete),
        help("See the diagnostics above; re-running 'sprout init' is safe")
    )]
    InitIncomplete { failed: usize },

    #[error("Refresh failed for {failed} module(s)")]
    #[diagnostic(code(sprout::module::refresh_incomplete))]
    RefreshIncomplete { failed: usize },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(sprout::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(sprout::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(sprout::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for SproutError {
    fn from(err: std::io::Error) -> Self {
        SproutError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for SproutError {
    fn from(err: serde_yaml::Error) -> Self {
        SproutError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SproutError {
    fn from(err: serde_json::Error) -> Self {
        SproutError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<git2::Error> for SproutError {
    fn from(err: git2::Error) -> Self {
        SproutError::GitOperationFailed {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for SproutError {
    fn from(err: inquire::InquireError) -> Self {
        SproutError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SproutError>;
