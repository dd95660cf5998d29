//! List command implementation
//!
//! This command lists placed modules with their versions, types, and
//! available hooks.

use std::path::{Path, PathBuf};

use console::Style;

use crate::commands::helpers;
use crate::error::Result;
use crate::module::ModuleInfo;
use crate::workspace;

/// Run list command
pub fn run(workspace_flag: Option<PathBuf>, verbose: bool) -> Result<()> {
    let root = workspace::resolve_root(workspace_flag.as_deref())?;
    let modules = helpers::scan_modules(&root)?;

    if modules.is_empty() {
        println!("No modules placed yet.");
        return Ok(());
    }

    println!("Placed modules ({}):", modules.len());
    println!();

    for module in &modules {
        display_module(&root, module, verbose);
        println!();
    }

    Ok(())
}

fn display_module(root: &Path, module: &ModuleInfo, verbose: bool) {
    println!(
        "  {} {}",
        Style::new().bold().yellow().apply_to(&module.name),
        Style::new().dim().apply_to(format!("v{}", module.version))
    );

    if let Some(ref module_type) = module.module_type {
        println!("    {} {}", Style::new().bold().apply_to("Type:"), module_type);
    }
    if let Some(hooks) = describe_hooks(module) {
        println!("    {} {}", Style::new().bold().apply_to("Hooks:"), hooks);
    }

    if verbose {
        if let Some(ref description) = module.description {
            println!(
                "    {} {}",
                Style::new().bold().apply_to("Description:"),
                description
            );
        }
        let rel = module.path.strip_prefix(root).unwrap_or(&module.path);
        println!(
            "    {} {}",
            Style::new().bold().apply_to("Path:"),
            rel.display()
        );
        if !module.has_manifest {
            println!("    {}", Style::new().dim().apply_to("(no manifest)"));
        }
    }
}

/// Hook availability for display, e.g. "init, refresh"
fn describe_hooks(module: &ModuleInfo) -> Option<String> {
    let mut hooks = Vec::new();
    if module.init_hook().is_some() {
        hooks.push("init");
    }
    if module.refresh_hook().is_some() {
        hooks.push("refresh");
    }

    if hooks.is_empty() {
        None
    } else {
        Some(hooks.join(", "))
    }
}
