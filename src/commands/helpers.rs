//! Command helper utilities

use std::path::Path;

use crate::config::{CONFIG_FILE, DEFAULT_BASE_DIRS, ProjectConfig};
use crate::error::Result;
use crate::module::{self, ModuleInfo};

/// Base directories to scan, taken from the project config when one is
/// readable and falling back to the defaults otherwise.
pub fn base_dirs(root: &Path) -> Vec<String> {
    ProjectConfig::load(&root.join(CONFIG_FILE))
        .map(|project| project.base_dirs())
        .unwrap_or_else(|_| DEFAULT_BASE_DIRS.iter().map(|d| (*d).to_string()).collect())
}

/// Scan the workspace for placed modules across its base directories.
pub fn scan_modules(root: &Path) -> Result<Vec<ModuleInfo>> {
    module::scan(root, &base_dirs(root))
}
