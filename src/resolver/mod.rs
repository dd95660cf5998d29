//! Recursive module resolution
//!
//! This module handles:
//! - Breadth-first discovery of module repositories, level by level
//! - Version-gated placement into the workspace tree
//! - Collecting transitive dependencies from placed manifests
//! - Skip and failure accounting without aborting the run

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;

use crate::fetch::ModuleFetcher;
use crate::manifest::Manifest;
use crate::module::ModuleInfo;
use crate::source;
use crate::version;
use crate::workspace;

/// Outcome of a resolution run.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Reference -> absolute placement path, one path per reference. Keys
    /// are the original reference strings as first seen; normalization is
    /// used only for deduplication.
    pub placements: HashMap<String, PathBuf>,

    /// Placement paths in the order references were settled
    pub placement_order: Vec<PathBuf>,

    /// References skipped for recoverable reasons (reference, reason)
    pub skipped: Vec<(String, String)>,

    /// References that failed during placement (reference, reason)
    pub failed: Vec<(String, String)>,

    /// Number of breadth-first levels processed
    pub levels: usize,

    /// Total distinct references discovered
    pub discovered: usize,

    /// Modules freshly placed this run
    pub placed: usize,

    /// Modules already present and left untouched
    pub kept: usize,

    /// Full content fetches performed by the fetcher
    pub fetches: usize,
}

impl Resolution {
    /// True when no reference failed during placement.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Resolves module references into workspace placements, breadth-first.
///
/// Each level fetches manifests for the references queued by the previous
/// level, places (or keeps) the modules, and queues their dependencies for
/// the next level. The run terminates when a level produces no new
/// references.
pub struct Resolver<'a, F: ModuleFetcher> {
    /// Fetch boundary for manifests and repository content
    fetcher: &'a mut F,

    /// Workspace root path
    workspace_root: PathBuf,

    /// Remove existing placements unconditionally before placing
    force_update: bool,

    /// Normalized references ever enqueued
    discovered: HashSet<String>,

    /// Normalized references fully handled
    processed: HashSet<String>,

    /// First-seen original reference -> placement path
    placements: HashMap<String, PathBuf>,

    /// Placement paths in settlement order
    placement_order: Vec<PathBuf>,

    skipped: Vec<(String, String)>,
    failed: Vec<(String, String)>,
    placed: usize,
    kept: usize,
}

impl<'a, F: ModuleFetcher> Resolver<'a, F> {
    pub fn new(fetcher: &'a mut F, workspace_root: impl Into<PathBuf>, force_update: bool) -> Self {
        Self {
            fetcher,
            workspace_root: workspace_root.into(),
            force_update,
            discovered: HashSet::new(),
            processed: HashSet::new(),
            placements: HashMap::new(),
            placement_order: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
            placed: 0,
            kept: 0,
        }
    }

    /// Resolve the seed references and everything they transitively depend on.
    ///
    /// Individual failures are recorded in the returned [`Resolution`] and do
    /// not abort the run. Scratch state is cleaned up before returning.
    pub fn resolve(&mut self, seeds: &[String], progress: Option<&ProgressBar>) -> Resolution {
        let mut queue: Vec<String> = Vec::new();
        for seed in seeds {
            let reference = seed.trim();
            if reference.is_empty() {
                continue;
            }
            if self.discovered.insert(source::normalize(reference)) {
                queue.push(reference.to_string());
            }
        }

        let mut levels = 0;
        while !queue.is_empty() {
            levels += 1;
            if let Some(pb) = progress {
                pb.set_message(format!(
                    "Resolving level {} ({} module(s))...",
                    levels,
                    queue.len()
                ));
            }

            let current = std::mem::take(&mut queue);
            for reference in current {
                let key = source::normalize(&reference);
                if !self.processed.insert(key) {
                    continue;
                }
                self.process_reference(&reference, &mut queue, progress);
            }
        }

        self.fetcher.cleanup();

        Resolution {
            placements: self.placements.clone(),
            placement_order: self.placement_order.clone(),
            skipped: self.skipped.clone(),
            failed: self.failed.clone(),
            levels,
            discovered: self.discovered.len(),
            placed: self.placed,
            kept: self.kept,
            fetches: self.fetcher.fetch_count(),
        }
    }

    /// Handle a single reference: fetch its manifest, place or keep the
    /// module, and queue its dependencies.
    fn process_reference(
        &mut self,
        reference: &str,
        queue: &mut Vec<String>,
        progress: Option<&ProgressBar>,
    ) {
        if let Some(pb) = progress {
            pb.set_message(format!("Resolving {}...", source::display_name(reference)));
        }

        let Some(manifest) = self.fetcher.fetch_manifest(reference) else {
            self.skipped
                .push((reference.to_string(), "manifest not available".to_string()));
            return;
        };

        let Some(rel_path) = manifest.path.as_deref().map(str::trim).filter(|p| !p.is_empty())
        else {
            self.skipped.push((
                reference.to_string(),
                "manifest has no placement path".to_string(),
            ));
            return;
        };

        let target = match workspace::placement_target(&self.workspace_root, rel_path) {
            Ok(target) => target,
            Err(e) => {
                self.failed.push((reference.to_string(), e.to_string()));
                return;
            }
        };

        if target.is_dir() {
            if self.force_update {
                if let Err(e) = fs::remove_dir_all(&target) {
                    self.failed.push((
                        reference.to_string(),
                        format!("failed to remove {}: {}", target.display(), e),
                    ));
                    return;
                }
            } else if !self.supersedes_installed(&manifest, &target) {
                // Keep what is on disk, but still record the placement and
                // follow the installed module's dependencies.
                self.record_placement(reference, &target);
                self.kept += 1;
                let deps = on_disk_dependencies(&target)
                    .unwrap_or_else(|| manifest.dependencies.clone());
                self.enqueue_dependencies(&deps, queue);
                return;
            } else if let Err(e) = fs::remove_dir_all(&target) {
                self.failed.push((
                    reference.to_string(),
                    format!("failed to remove {}: {}", target.display(), e),
                ));
                return;
            }
        }

        if let Err(e) = self.fetcher.place(reference, &target) {
            self.failed.push((reference.to_string(), e.to_string()));
            return;
        }

        self.placed += 1;
        self.record_placement(reference, &target);

        let deps = on_disk_dependencies(&target).unwrap_or_else(|| manifest.dependencies.clone());
        self.enqueue_dependencies(&deps, queue);
    }

    /// Compare the fetched manifest's version against the installed module.
    fn supersedes_installed(&self, manifest: &Manifest, target: &Path) -> bool {
        let installed = ModuleInfo::from_path(target)
            .map(|module| module.version)
            .unwrap_or_else(|| version::DEFAULT_VERSION.to_string());
        version::supersedes(manifest.version(), &installed)
    }

    fn record_placement(&mut self, reference: &str, target: &Path) {
        self.placements
            .insert(reference.to_string(), target.to_path_buf());
        // Aliased references can settle on the same path; record it once.
        if !self.placement_order.iter().any(|p| p == target) {
            self.placement_order.push(target.to_path_buf());
        }
    }

    /// Queue dependency references that have not been discovered yet.
    fn enqueue_dependencies(&mut self, deps: &[String], queue: &mut Vec<String>) {
        for dep in deps {
            let reference = dep.trim();
            if reference.is_empty() {
                continue;
            }
            if self.discovered.insert(source::normalize(reference)) {
                queue.push(reference.to_string());
            }
        }
    }
}

/// Dependencies as declared by the manifest sitting in the placed directory.
fn on_disk_dependencies(target: &Path) -> Option<Vec<String>> {
    Manifest::load_from_dir(target)
        .ok()
        .flatten()
        .map(|manifest| manifest.dependencies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{self, Result};
    use tempfile::TempDir;

    /// In-memory fetcher backed by a manifest table. Placement writes the
    /// manifest into the target directory so on-disk reads behave like a
    /// real clone.
    struct FakeFetcher {
        manifests: HashMap<String, Manifest>,
        fail_placement: HashSet<String>,
        manifest_calls: usize,
        place_calls: usize,
        cleanups: usize,
    }

    impl FakeFetcher {
        fn new() -> Self {
            Self {
                manifests: HashMap::new(),
                fail_placement: HashSet::new(),
                manifest_calls: 0,
                place_calls: 0,
                cleanups: 0,
            }
        }

        fn with_module(mut self, reference: &str, manifest: Manifest) -> Self {
            self.manifests.insert(source::normalize(reference), manifest);
            self
        }

        fn failing_placement(mut self, reference: &str) -> Self {
            self.fail_placement.insert(source::normalize(reference));
            self
        }
    }

    impl ModuleFetcher for FakeFetcher {
        fn fetch_manifest(&mut self, reference: &str) -> Option<Manifest> {
            self.manifest_calls += 1;
            self.manifests.get(&source::normalize(reference)).cloned()
        }

        fn place(&mut self, reference: &str, target: &Path) -> Result<()> {
            self.place_calls += 1;
            let key = source::normalize(reference);
            if self.fail_placement.contains(&key) {
                return Err(error::clone_failed(reference, "simulated network failure"));
            }
            fs::create_dir_all(target).map_err(|e| error::io_error(e.to_string()))?;
            if let Some(manifest) = self.manifests.get(&key) {
                let yaml = serde_yaml::to_string(manifest).expect("Failed to serialize manifest");
                fs::write(target.join(crate::manifest::MANIFEST_FILE), yaml)
                    .map_err(|e| error::io_error(e.to_string()))?;
            }
            Ok(())
        }

        fn fetch_count(&self) -> usize {
            self.place_calls
        }

        fn cleanup(&mut self) {
            self.cleanups += 1;
        }
    }

    fn manifest(path: &str, ver: &str, deps: &[&str]) -> Manifest {
        Manifest {
            path: Some(path.to_string()),
            version: Some(ver.to_string()),
            module_type: None,
            description: None,
            dependencies: deps.iter().map(|d| (*d).to_string()).collect(),
        }
    }

    fn seeds(refs: &[&str]) -> Vec<String> {
        refs.iter().map(|r| (*r).to_string()).collect()
    }

    #[test]
    fn test_resolves_dependencies_level_by_level() {
        let temp = TempDir::new().unwrap();
        let mut fetcher = FakeFetcher::new()
            .with_module(
                "https://github.com/acme/gateway",
                manifest("core/gateway", "1.0.0", &["https://github.com/acme/retry"]),
            )
            .with_module("https://github.com/acme/retry", manifest("utils/retry", "1.0.0", &[]));

        let mut resolver = Resolver::new(&mut fetcher, temp.path(), false);
        let result = resolver.resolve(&seeds(&["https://github.com/acme/gateway"]), None);

        assert_eq!(result.levels, 2);
        assert_eq!(result.placed, 2);
        assert_eq!(result.placements.len(), 2);
        assert!(temp.path().join("core/gateway/module.yaml").exists());
        assert!(temp.path().join("utils/retry/module.yaml").exists());
        assert_eq!(
            result.placement_order,
            vec![temp.path().join("core/gateway"), temp.path().join("utils/retry")]
        );
    }

    #[test]
    fn test_duplicate_references_processed_once() {
        let temp = TempDir::new().unwrap();
        let mut fetcher = FakeFetcher::new().with_module(
            "https://github.com/acme/gateway",
            manifest("core/gateway", "1.0.0", &[]),
        );

        let mut resolver = Resolver::new(&mut fetcher, temp.path(), false);
        let result = resolver.resolve(
            &seeds(&[
                "https://github.com/acme/gateway",
                "  https://github.com/acme/gateway.git  ",
                "HTTPS://GITHUB.COM/ACME/GATEWAY",
            ]),
            None,
        );

        assert_eq!(result.placed, 1);
        assert_eq!(fetcher.manifest_calls, 1);
        assert_eq!(fetcher.place_calls, 1);
    }

    #[test]
    fn test_placements_keyed_by_original_reference() {
        let temp = TempDir::new().unwrap();
        let mut fetcher = FakeFetcher::new().with_module(
            "https://github.com/acme/gateway",
            manifest("core/gateway", "1.0.0", &[]),
        );

        let mut resolver = Resolver::new(&mut fetcher, temp.path(), false);
        let result = resolver.resolve(&seeds(&["https://github.com/Acme/Gateway.git"]), None);

        // The map keeps the reference as written, not its normalized form
        assert_eq!(
            result.placements.get("https://github.com/Acme/Gateway.git"),
            Some(&temp.path().join("core/gateway"))
        );
        assert!(!result.placements.contains_key("https://github.com/acme/gateway"));
    }

    #[test]
    fn test_second_run_places_nothing() {
        let temp = TempDir::new().unwrap();
        let refs = seeds(&["https://github.com/acme/gateway"]);

        let mut first = FakeFetcher::new()
            .with_module(
                "https://github.com/acme/gateway",
                manifest("core/gateway", "1.0.0", &["https://github.com/acme/retry"]),
            )
            .with_module("https://github.com/acme/retry", manifest("utils/retry", "1.0.0", &[]));
        Resolver::new(&mut first, temp.path(), false).resolve(&refs, None);
        assert_eq!(first.place_calls, 2);

        let mut second = FakeFetcher::new()
            .with_module(
                "https://github.com/acme/gateway",
                manifest("core/gateway", "1.0.0", &["https://github.com/acme/retry"]),
            )
            .with_module("https://github.com/acme/retry", manifest("utils/retry", "1.0.0", &[]));
        let result = Resolver::new(&mut second, temp.path(), false).resolve(&refs, None);

        assert_eq!(second.place_calls, 0);
        assert_eq!(result.kept, 2);
        assert_eq!(result.placements.len(), 2);
    }

    #[test]
    fn test_existing_module_kept_when_not_superseded() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("core/gateway");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("module.yaml"), "path: core/gateway\nversion: 2.0.0\n").unwrap();
        fs::write(target.join("local-change.txt"), "keep me").unwrap();

        let mut fetcher = FakeFetcher::new().with_module(
            "https://github.com/acme/gateway",
            manifest("core/gateway", "1.5.0", &[]),
        );
        let mut resolver = Resolver::new(&mut fetcher, temp.path(), false);
        let result = resolver.resolve(&seeds(&["https://github.com/acme/gateway"]), None);

        assert_eq!(result.kept, 1);
        assert_eq!(result.placed, 0);
        assert_eq!(fetcher.place_calls, 0);
        assert!(target.join("local-change.txt").exists());
        // Kept modules are still recorded in the placement map
        assert_eq!(
            result.placements.get("https://github.com/acme/gateway"),
            Some(&target)
        );
    }

    #[test]
    fn test_kept_module_dependencies_come_from_disk() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("core/gateway");
        fs::create_dir_all(&target).unwrap();
        fs::write(
            target.join("module.yaml"),
            "path: core/gateway\nversion: 9.0.0\ndependencies:\n  - https://github.com/acme/retry\n",
        )
        .unwrap();

        // The remote manifest declares no dependencies; the on-disk one does.
        let mut fetcher = FakeFetcher::new()
            .with_module("https://github.com/acme/gateway", manifest("core/gateway", "1.0.0", &[]))
            .with_module("https://github.com/acme/retry", manifest("utils/retry", "1.0.0", &[]));

        let mut resolver = Resolver::new(&mut fetcher, temp.path(), false);
        let result = resolver.resolve(&seeds(&["https://github.com/acme/gateway"]), None);

        assert_eq!(result.kept, 1);
        assert_eq!(result.placed, 1);
        assert!(temp.path().join("utils/retry/module.yaml").exists());
    }

    #[test]
    fn test_force_replaces_existing_module() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("core/gateway");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("module.yaml"), "path: core/gateway\nversion: 9.9.9\n").unwrap();
        fs::write(target.join("local-change.txt"), "gone after force").unwrap();

        let mut fetcher = FakeFetcher::new().with_module(
            "https://github.com/acme/gateway",
            manifest("core/gateway", "1.0.0", &[]),
        );
        let mut resolver = Resolver::new(&mut fetcher, temp.path(), true);
        let result = resolver.resolve(&seeds(&["https://github.com/acme/gateway"]), None);

        assert_eq!(result.placed, 1);
        assert_eq!(result.kept, 0);
        assert!(!target.join("local-change.txt").exists());
        assert!(target.join("module.yaml").exists());
    }

    #[test]
    fn test_newer_version_replaces_existing_module() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("core/gateway");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("module.yaml"), "path: core/gateway\nversion: 1.2.0\n").unwrap();
        fs::write(target.join("stale.txt"), "replaced").unwrap();

        let mut fetcher = FakeFetcher::new().with_module(
            "https://github.com/acme/gateway",
            manifest("core/gateway", "1.10.0", &[]),
        );
        let mut resolver = Resolver::new(&mut fetcher, temp.path(), false);
        let result = resolver.resolve(&seeds(&["https://github.com/acme/gateway"]), None);

        assert_eq!(result.placed, 1);
        assert!(!target.join("stale.txt").exists());
    }

    #[test]
    fn test_unreachable_manifest_is_skipped() {
        let temp = TempDir::new().unwrap();
        let mut fetcher = FakeFetcher::new().with_module(
            "https://github.com/acme/retry",
            manifest("utils/retry", "1.0.0", &[]),
        );

        let mut resolver = Resolver::new(&mut fetcher, temp.path(), false);
        let result = resolver.resolve(
            &seeds(&["https://github.com/acme/ghost", "https://github.com/acme/retry"]),
            None,
        );

        assert_eq!(result.skipped.len(), 1);
        assert!(result.skipped[0].1.contains("manifest not available"));
        assert_eq!(result.placed, 1);
        assert!(result.is_clean());
    }

    #[test]
    fn test_manifest_without_path_is_skipped() {
        let temp = TempDir::new().unwrap();
        let mut no_path = manifest("unused", "1.0.0", &[]);
        no_path.path = None;
        let mut fetcher = FakeFetcher::new().with_module("https://github.com/acme/stub", no_path);

        let mut resolver = Resolver::new(&mut fetcher, temp.path(), false);
        let result = resolver.resolve(&seeds(&["https://github.com/acme/stub"]), None);

        assert_eq!(result.placed, 0);
        assert_eq!(result.skipped.len(), 1);
        assert!(result.skipped[0].1.contains("no placement path"));
    }

    #[test]
    fn test_placement_failure_does_not_abort_run() {
        let temp = TempDir::new().unwrap();
        let mut fetcher = FakeFetcher::new()
            .with_module(
                "https://github.com/acme/gateway",
                manifest("core/gateway", "1.0.0", &[]),
            )
            .with_module("https://github.com/acme/retry", manifest("utils/retry", "1.0.0", &[]))
            .failing_placement("https://github.com/acme/gateway");

        let mut resolver = Resolver::new(&mut fetcher, temp.path(), false);
        let result = resolver.resolve(
            &seeds(&["https://github.com/acme/gateway", "https://github.com/acme/retry"]),
            None,
        );

        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].0, "https://github.com/acme/gateway");
        assert_eq!(result.placed, 1);
        assert!(temp.path().join("utils/retry/module.yaml").exists());
        assert!(!result.placements.contains_key("https://github.com/acme/gateway"));
    }

    #[test]
    fn test_escaping_placement_path_is_rejected() {
        let temp = TempDir::new().unwrap();
        let workspace = temp.path().join("workspace");
        fs::create_dir_all(&workspace).unwrap();
        let mut fetcher = FakeFetcher::new().with_module(
            "https://github.com/acme/evil",
            manifest("../outside", "1.0.0", &[]),
        );

        let mut resolver = Resolver::new(&mut fetcher, &workspace, false);
        let result = resolver.resolve(&seeds(&["https://github.com/acme/evil"]), None);

        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.placed, 0);
        assert!(!temp.path().join("outside").exists());
    }

    #[test]
    fn test_cleanup_runs_once_per_resolution() {
        let temp = TempDir::new().unwrap();
        let mut fetcher = FakeFetcher::new();

        let mut resolver = Resolver::new(&mut fetcher, temp.path(), false);
        resolver.resolve(&seeds(&[]), None);

        assert_eq!(fetcher.cleanups, 1);
    }
}
