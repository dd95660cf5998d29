//! Show command implementation

use std::path::{Path, PathBuf};

use console::Style;

use crate::cli::ShowArgs;
use crate::commands::helpers;
use crate::error::{self, Result};
use crate::module::ModuleInfo;
use crate::workspace;

/// Run show command
pub fn run(workspace_flag: Option<PathBuf>, args: ShowArgs, verbose: bool) -> Result<()> {
    let root = workspace::resolve_root(workspace_flag.as_deref())?;
    let modules = helpers::scan_modules(&root)?;

    let module = crate::module::find_by_name(&modules, &args.module)
        .ok_or_else(|| error::module_not_found(&args.module))?;

    println!();
    display_module_info(&root, module, verbose);
    Ok(())
}

fn display_module_info(root: &Path, module: &ModuleInfo, verbose: bool) {
    println!("  {}", Style::new().bold().yellow().apply_to(&module.name));

    println!(
        "    {} {}",
        Style::new().bold().apply_to("Version:"),
        module.version
    );
    if let Some(ref module_type) = module.module_type {
        println!("    {} {}", Style::new().bold().apply_to("Type:"), module_type);
    }
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
    if verbose {
        println!(
            "    {} {}",
            Style::new().bold().apply_to("Full path:"),
            module.path.display()
        );
    }

    let mut hooks = Vec::new();
    if module.init_hook().is_some() {
        hooks.push("init");
    }
    if module.refresh_hook().is_some() {
        hooks.push("refresh");
    }
    if hooks.is_empty() {
        println!(
            "    {} {}",
            Style::new().bold().apply_to("Hooks:"),
            Style::new().dim().apply_to("None")
        );
    } else {
        println!(
            "    {} {}",
            Style::new().bold().apply_to("Hooks:"),
            hooks.join(", ")
        );
    }

    if module.dependencies.is_empty() {
        println!(
            "    {} {}",
            Style::new().bold().apply_to("Dependencies:"),
            Style::new().dim().apply_to("None")
        );
    } else {
        println!("    {}", Style::new().bold().apply_to("Dependencies:"));
        for dep in &module.dependencies {
            println!("      - {}", Style::new().cyan().apply_to(dep));
        }
    }

    if !module.has_manifest {
        println!(
            "    {}",
            Style::new().dim().apply_to("(no manifest, defaults shown)")
        );
    }
}
