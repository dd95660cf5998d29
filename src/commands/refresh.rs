//! Refresh command implementation
//!
//! Runs refresh hooks for placed modules, either across the whole workspace
//! or for a single module named with --module.

use std::path::PathBuf;

use console::Style;

use crate::cli::RefreshArgs;
use crate::error::{self, Result};
use crate::hooks::{HookOutcome, HookRunner, ProcessHookRunner};
use crate::module::{self, ModuleInfo};
use crate::{commands::helpers, workspace};

/// Run refresh command
pub fn run(workspace_flag: Option<PathBuf>, args: RefreshArgs, verbose: bool) -> Result<()> {
    let root = workspace::resolve_root(workspace_flag.as_deref())?;
    let modules = helpers::scan_modules(&root)?;
    let runner = ProcessHookRunner::new(&root);

    match args.module {
        Some(ref name) => refresh_single(&runner, &modules, name),
        None => refresh_all(&runner, &modules, verbose),
    }
}

/// Refresh one module; missing module or hook is an error here.
fn refresh_single(runner: &ProcessHookRunner, modules: &[ModuleInfo], name: &str) -> Result<()> {
    let module = module::find_by_name(modules, name).ok_or_else(|| error::module_not_found(name))?;
    let hook = module
        .refresh_hook()
        .ok_or_else(|| error::no_refresh_hook(name))?;

    println!("Refreshing {}...", module.name);
    let outcome = runner.run(&hook)?;
    print_hook_output(&outcome);

    if !outcome.success() {
        return Err(error::hook_failed(name, outcome.status_code()));
    }
    println!("{} refreshed.", module.name);
    Ok(())
}

fn refresh_all(runner: &ProcessHookRunner, modules: &[ModuleInfo], verbose: bool) -> Result<()> {
    let mut refreshed = 0usize;
    let mut without_hook = 0usize;
    let mut failed: Vec<String> = Vec::new();

    for module in modules {
        let Some(hook) = module.refresh_hook() else {
            without_hook += 1;
            if verbose {
                println!("{} has no refresh hook, skipping", module.name);
            }
            continue;
        };

        println!("Refreshing {}...", module.name);
        match runner.run(&hook) {
            Ok(outcome) if outcome.success() => refreshed += 1,
            Ok(outcome) => {
                print_hook_output(&outcome);
                println!(
                    "{} {} exited with status {}",
                    Style::new().red().bold().apply_to("Failed:"),
                    module.name,
                    outcome.status_code()
                );
                failed.push(module.name.clone());
            }
            Err(e) => {
                println!(
                    "{} {}: {}",
                    Style::new().red().bold().apply_to("Failed:"),
                    module.name,
                    e
                );
                failed.push(module.name.clone());
            }
        }
    }

    println!();
    println!(
        "Refreshed {} module(s), {} without a refresh hook, {} failed",
        refreshed,
        without_hook,
        failed.len()
    );

    if !failed.is_empty() {
        return Err(error::refresh_incomplete(failed.len()));
    }
    Ok(())
}

fn print_hook_output(outcome: &HookOutcome) {
    if !outcome.stdout.is_empty() {
        print!("{}", outcome.stdout);
    }
    if !outcome.stderr.is_empty() {
        eprint!("{}", outcome.stderr);
    }
}
