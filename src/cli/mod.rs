//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - init: Init command arguments
//! - refresh: Refresh command arguments
//! - show: Show command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod init;
pub mod refresh;
pub mod show;

pub use completions::CompletionsArgs;
pub use init::InitArgs;
pub use refresh::RefreshArgs;
pub use show::ShowArgs;

/// Sprout - modular workspace bootstrapper
///
/// Resolve module repositories and assemble them into a local workspace.
#[derive(Parser, Debug)]
#[command(
    name = "sprout",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Bootstrap modular project workspaces from git module repositories",
    long_about = "Sprout resolves the module repositories listed in sprout.yaml, places them \
                  into the workspace tree at the paths their manifests declare, and runs each \
                  module's init hook in dependency order.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  sprout init                     \x1b[90m# Resolve and initialize all modules\x1b[0m\n   \
                  sprout init --force --yes       \x1b[90m# Re-place modules even if present\x1b[0m\n   \
                  sprout refresh                  \x1b[90m# Run every module's refresh hook\x1b[0m\n   \
                  sprout refresh -m telemetry     \x1b[90m# Refresh a single module\x1b[0m\n   \
                  sprout list                     \x1b[90m# List placed modules\x1b[0m\n   \
                  sprout show telemetry           \x1b[90m# Show module information\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Workspace directory (defaults to the nearest ancestor with sprout.yaml)
    #[arg(long, short = 'w', global = true, env = "SPROUT_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve module repositories and initialize the workspace
    Init(InitArgs),

    /// Run module refresh hooks
    Refresh(RefreshArgs),

    /// List placed modules
    List,

    /// Show module information
    Show(ShowArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
