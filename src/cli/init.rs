use clap::Parser;
use std::path::PathBuf;

/// Arguments for the init command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Initialize the workspace:\n    sprout init\n\n\
                  Use an alternate config file:\n    sprout init --config ./configs/sprout.yaml\n\n\
                  Replace modules even when already placed:\n    sprout init --force\n\n\
                  Skip the confirmation prompt:\n    sprout init --force --yes")]
pub struct InitArgs {
    /// Project config file (defaults to sprout.yaml at the workspace root)
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Remove existing module directories and place them again
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y')]
    pub yes: bool,
}
