//! Placed modules and workspace scanning
//!
//! A module is a directory placed under one of the workspace's base category
//! directories. Its metadata comes from the manifest when present; a module
//! without a manifest still counts, with default metadata. Hook capabilities
//! are determined by file existence inside the module directory, never by
//! manifest fields.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{self, Result};
use crate::manifest::Manifest;
use crate::version::DEFAULT_VERSION;

/// Init hook file name inside a module directory.
pub const INIT_HOOK: &str = "init.sh";

/// Refresh hook file name inside a module directory.
pub const REFRESH_HOOK: &str = "refresh.sh";

/// A placed module as found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Module directory.
    pub path: PathBuf,
    /// Directory name, used as the module's display name.
    pub name: String,
    /// Declared version, defaulted when the manifest has none.
    pub version: String,
    /// Category label from the manifest.
    pub module_type: Option<String>,
    /// Description from the manifest.
    pub description: Option<String>,
    /// Dependency references from the manifest.
    pub dependencies: Vec<String>,
    /// Whether a manifest file exists in the module directory.
    pub has_manifest: bool,
}

impl ModuleInfo {
    /// Build a module record from a directory.
    ///
    /// Returns `None` only when the path is not a directory. A missing or
    /// unparseable manifest degrades to default metadata.
    pub fn from_path(path: &Path) -> Option<Self> {
        if !path.is_dir() {
            return None;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let has_manifest = path.join(crate::manifest::MANIFEST_FILE).exists();
        let manifest = Manifest::load_from_dir(path).ok().flatten().unwrap_or_default();

        Some(Self {
            path: path.to_path_buf(),
            name,
            version: manifest
                .version
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            module_type: manifest.module_type,
            description: manifest.description,
            dependencies: manifest.dependencies,
            has_manifest,
        })
    }

    /// Path to the init hook, when the module has one.
    pub fn init_hook(&self) -> Option<PathBuf> {
        hook_path(&self.path, INIT_HOOK)
    }

    /// Path to the refresh hook, when the module has one.
    pub fn refresh_hook(&self) -> Option<PathBuf> {
        hook_path(&self.path, REFRESH_HOOK)
    }
}

fn hook_path(module_dir: &Path, hook: &str) -> Option<PathBuf> {
    let path = module_dir.join(hook);
    path.is_file().then_some(path)
}

/// Enumerate placed modules under the given base category directories.
///
/// Only immediate subdirectories count; names starting with `.` or `_` are
/// excluded. Order is deterministic: base directories in configured order,
/// modules sorted by name within each. Reads live state on every call.
pub fn scan(root: &Path, base_dirs: &[String]) -> Result<Vec<ModuleInfo>> {
    let mut modules = Vec::new();

    for base in base_dirs {
        let base_path = root.join(base);
        if !base_path.is_dir() {
            continue;
        }

        let entries = fs::read_dir(&base_path).map_err(|e| {
            error::workspace_unreadable(base_path.display().to_string(), e.to_string())
        })?;

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| !n.starts_with('.') && !n.starts_with('_'))
            })
            .collect();
        dirs.sort();

        modules.extend(dirs.iter().filter_map(|dir| ModuleInfo::from_path(dir)));
    }

    Ok(modules)
}

/// Find a scanned module by name.
pub fn find_by_name<'a>(modules: &'a [ModuleInfo], name: &str) -> Option<&'a ModuleInfo> {
    modules.iter().find(|m| m.name == name)
}
