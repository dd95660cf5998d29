//! Init command implementation
//!
//! This command resolves the module repositories listed in the project
//! config, places them into the workspace tree at the paths their manifests
//! declare, runs each module's init hook in dependency order, and finishes
//! by regenerating the editor workspace descriptor.

use std::path::{Path, PathBuf};

use console::Style;
use inquire::Confirm;

use crate::cli::InitArgs;
use crate::config::{CONFIG_FILE, ProjectConfig};
use crate::error::{self, Result};
use crate::fetch::GitFetcher;
use crate::hooks::ProcessHookRunner;
use crate::initializer::{InitReport, Initializer};
use crate::progress;
use crate::resolver::{Resolution, Resolver};
use crate::workspace;

/// Run init command
pub fn run(workspace_flag: Option<PathBuf>, args: InitArgs, verbose: bool) -> Result<()> {
    let root = workspace::resolve_root_or_cwd(workspace_flag.as_deref())?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| root.join(CONFIG_FILE));
    let project = ProjectConfig::load(&config_path)?;

    if project.modules.is_empty() {
        println!("No modules listed in {}.", config_path.display());
        return Ok(());
    }

    if args.force && !args.yes && !confirm_force()? {
        println!("Aborted.");
        return Ok(());
    }

    workspace::ensure_layout(&root, &project.base_dirs())?;

    let resolution = resolve_modules(&root, &project.modules, args.force);
    report_resolution(&resolution, verbose);

    let report = run_init_hooks(&root, &resolution);
    report_initialization(&report);

    let descriptor = workspace::write_editor_workspace(&root)?;
    if verbose {
        println!("Workspace descriptor written to {}", descriptor.display());
    }

    print_summary(&resolution, &report);

    let failed = resolution.failed.len() + report.failed.len();
    if failed > 0 {
        return Err(error::init_incomplete(failed));
    }
    Ok(())
}

/// Ask before force re-placement removes existing module directories
fn confirm_force() -> Result<bool> {
    Confirm::new("Force re-placement removes existing module directories. Continue?")
        .with_default(false)
        .with_help_message("Local changes inside placed modules will be lost")
        .prompt()
        .map_err(|e| error::io_error(format!("Failed to read confirmation: {}", e)))
}

/// Resolve the configured references and their transitive dependencies
fn resolve_modules(root: &Path, references: &[String], force: bool) -> Resolution {
    let mut fetcher = GitFetcher::new(root);
    let pb = progress::spinner("Resolving modules...");
    let resolution = Resolver::new(&mut fetcher, root, force).resolve(references, Some(&pb));
    pb.finish_and_clear();
    resolution
}

fn report_resolution(resolution: &Resolution, verbose: bool) {
    for (reference, reason) in &resolution.skipped {
        println!(
            "{} {} ({})",
            Style::new().yellow().apply_to("Skipped"),
            reference,
            reason
        );
    }
    for (reference, reason) in &resolution.failed {
        println!(
            "{} {}: {}",
            Style::new().red().bold().apply_to("Failed"),
            reference,
            reason
        );
    }
    if verbose {
        for path in &resolution.placement_order {
            println!("  {}", Style::new().dim().apply_to(path.display()));
        }
    }
}

/// Run init hooks across everything the resolution placed or kept
fn run_init_hooks(root: &Path, resolution: &Resolution) -> InitReport {
    if resolution.placement_order.is_empty() {
        return InitReport::default();
    }

    let runner = ProcessHookRunner::new(root);
    let pb = progress::spinner("Initializing modules...");
    let report = Initializer::new(&runner, &resolution.placements, Some(&pb))
        .initialize(&resolution.placement_order);
    pb.finish_and_clear();
    report
}

fn report_initialization(report: &InitReport) {
    for cycle in &report.cycles {
        println!(
            "{} dependency cycle: {}",
            Style::new().yellow().bold().apply_to("Warning:"),
            cycle
        );
    }
    for note in &report.notes {
        println!("{} {}", Style::new().yellow().apply_to("Note:"), note);
    }
    for (name, diagnostic) in &report.failures {
        println!(
            "{} {}: {}",
            Style::new().red().bold().apply_to("Failed"),
            name,
            diagnostic
        );
    }
}

/// Print final run summary
fn print_summary(resolution: &Resolution, report: &InitReport) {
    println!();
    println!(
        "Discovered {} module(s): {} placed, {} kept, {} initialized, {} failed",
        resolution.discovered,
        resolution.placed,
        resolution.kept,
        report.initialized.len(),
        resolution.failed.len() + report.failed.len()
    );
}
