//! Sprout - modular workspace bootstrapper
//!
//! A command line tool that assembles modular project workspaces: it resolves
//! the git module repositories listed in sprout.yaml, places them into the
//! workspace tree at the paths their manifests declare, and runs each
//! module's init hook in dependency order.

use clap::Parser;

mod cli;
mod commands;
mod common;
mod config;
mod error;
mod fetch;
mod git;
mod hooks;
mod initializer;
mod manifest;
mod module;
mod progress;
mod resolver;
mod source;
mod version;
mod workspace;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init(args) => commands::init::run(cli.workspace, args, cli.verbose),
        Commands::Refresh(args) => commands::refresh::run(cli.workspace, args, cli.verbose),
        Commands::List => commands::list::run(cli.workspace, cli.verbose),
        Commands::Show(args) => commands::show::run(cli.workspace, args, cli.verbose),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
