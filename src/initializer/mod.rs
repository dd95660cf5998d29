//! Module initialization in dependency order
//!
//! This module handles:
//! - Depth-first traversal so dependencies initialize before dependents
//! - Running each module's init hook exactly once
//! - Cycle detection with degraded, non-fatal handling
//! - Failure propagation without retrying failed modules

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;

use crate::hooks::{HookOutcome, HookRunner};
use crate::module::ModuleInfo;
use crate::source;

/// Outcome of an initialization pass.
#[derive(Debug, Clone, Default)]
pub struct InitReport {
    /// Modules initialized successfully, in initialization order
    pub initialized: Vec<PathBuf>,

    /// Modules that failed, in the order failures surfaced
    pub failed: Vec<PathBuf>,

    /// One diagnostic per failure (module name, detail)
    pub failures: Vec<(String, String)>,

    /// Dependency cycles encountered, rendered as reference chains
    pub cycles: Vec<String>,

    /// Non-fatal observations, such as unresolvable dependency references
    pub notes: Vec<String>,
}

impl InitReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs init hooks depth-first across placed modules.
///
/// Each module is visited at most once; the outcome is memoized so repeated
/// dependents neither re-run hooks nor retry failures. A dependency cycle is
/// reported and broken by treating the already-in-progress module as
/// available, which lets the rest of the graph proceed.
pub struct Initializer<'a, H: HookRunner> {
    runner: &'a H,

    /// Original reference -> placement path, from the resolution run
    placements: &'a HashMap<String, PathBuf>,

    progress: Option<&'a ProgressBar>,

    /// Modules whose initialization completed
    initialized: HashSet<PathBuf>,

    /// Modules whose initialization failed; never retried
    failed: HashSet<PathBuf>,

    /// Explicit visit chain for cycle detection
    chain: Vec<PathBuf>,

    order: Vec<PathBuf>,
    failed_order: Vec<PathBuf>,
    failures: Vec<(String, String)>,
    cycles: Vec<String>,
    notes: Vec<String>,
}

impl<'a, H: HookRunner> Initializer<'a, H> {
    pub fn new(
        runner: &'a H,
        placements: &'a HashMap<String, PathBuf>,
        progress: Option<&'a ProgressBar>,
    ) -> Self {
        Self {
            runner,
            placements,
            progress,
            initialized: HashSet::new(),
            failed: HashSet::new(),
            chain: Vec::new(),
            order: Vec::new(),
            failed_order: Vec::new(),
            failures: Vec::new(),
            cycles: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Initialize the given modules and their dependencies, depth-first.
    pub fn initialize(&mut self, roots: &[PathBuf]) -> InitReport {
        for root in roots {
            self.visit(root);
        }

        InitReport {
            initialized: self.order.clone(),
            failed: self.failed_order.clone(),
            failures: self.failures.clone(),
            cycles: self.cycles.clone(),
            notes: self.notes.clone(),
        }
    }

    /// Visit one module, initializing its dependencies first. Returns whether
    /// the module can be treated as available to its dependents.
    fn visit(&mut self, path: &Path) -> bool {
        if self.initialized.contains(path) {
            return true;
        }
        if self.failed.contains(path) {
            return false;
        }

        if let Some(pos) = self.chain.iter().position(|p| p == path) {
            let mut names: Vec<String> = self.chain[pos..].iter().map(|p| display_name(p)).collect();
            names.push(display_name(path));
            self.cycles.push(names.join(" -> "));
            // Break the cycle: the in-progress module counts as available so
            // the dependent can proceed. Its own hook still runs when its
            // original visit resumes.
            return true;
        }

        self.chain.push(path.to_path_buf());
        let ok = self.visit_inner(path);
        self.chain.pop();

        if ok {
            self.initialized.insert(path.to_path_buf());
            self.order.push(path.to_path_buf());
        } else {
            self.failed.insert(path.to_path_buf());
            self.failed_order.push(path.to_path_buf());
        }
        ok
    }

    fn visit_inner(&mut self, path: &Path) -> bool {
        if let Some(pb) = self.progress {
            pb.set_message(format!("Initializing {}...", display_name(path)));
        }

        let Some(module) = ModuleInfo::from_path(path) else {
            self.failures
                .push((display_name(path), "module directory missing".to_string()));
            return false;
        };

        for dep in &module.dependencies {
            let Some(dep_path) = self.resolve_dependency(dep) else {
                self.notes.push(format!(
                    "{}: unresolved dependency reference '{}' (skipped)",
                    module.name, dep
                ));
                continue;
            };

            if !self.visit(&dep_path) {
                self.failures.push((
                    module.name.clone(),
                    format!("dependency '{}' failed to initialize", display_name(&dep_path)),
                ));
                return false;
            }
        }

        self.run_hook(&module)
    }

    /// Look up a dependency reference in the placement map, exact form first
    /// and normalized form second.
    fn resolve_dependency(&self, reference: &str) -> Option<PathBuf> {
        if let Some(path) = self.placements.get(reference) {
            return Some(path.clone());
        }
        let wanted = source::normalize(reference);
        self.placements
            .iter()
            .find(|(candidate, _)| source::normalize(candidate) == wanted)
            .map(|(_, path)| path.clone())
    }

    /// Run the module's init hook. A module without one succeeds immediately.
    fn run_hook(&mut self, module: &ModuleInfo) -> bool {
        let Some(hook) = module.init_hook() else {
            return true;
        };

        match self.runner.run(&hook) {
            Ok(outcome) if outcome.success() => true,
            Ok(outcome) => {
                self.failures
                    .push((module.name.clone(), hook_diagnostic(&hook, &outcome)));
                false
            }
            Err(e) => {
                self.failures.push((
                    module.name.clone(),
                    format!("failed to run {}: {}", hook.display(), e),
                ));
                false
            }
        }
    }
}

/// Directory basename used when naming modules in diagnostics.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Render a failed hook with its exit status and captured output.
fn hook_diagnostic(hook: &Path, outcome: &HookOutcome) -> String {
    let mut diagnostic = format!(
        "{} exited with status {}",
        hook.display(),
        outcome.status_code()
    );
    if !outcome.stdout.is_empty() {
        diagnostic.push_str(&format!("\n--- stdout ---\n{}", outcome.stdout));
    }
    if !outcome.stderr.is_empty() {
        diagnostic.push_str(&format!("\n--- stderr ---\n{}", outcome.stderr));
    }
    diagnostic
}
