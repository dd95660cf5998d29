//! Workspace discovery and layout
//!
//! This module handles:
//! - Locating the workspace root by searching upward for sprout.yaml
//! - Creating the base directory layout
//! - Validating manifest placement paths
//! - Writing the editor workspace descriptor
//!
//! ## Workspace Structure
//!
//! ```text
//! my-project/
//! ├── sprout.yaml              # Project config with module references
//! ├── my-project.code-workspace # Editor descriptor, regenerated on init
//! ├── core/                    # Base directories holding placed modules
//! ├── managers/
//! ├── utils/
//! ├── plugins/
//! └── mcps/
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use normpath::PathExt;
use walkdir::WalkDir;

use crate::config::CONFIG_FILE;
use crate::error::{self, Result};

/// Detect if a workspace root sits at the given path
pub fn exists(root: &Path) -> bool {
    root.join(CONFIG_FILE).is_file()
}

/// Find a workspace by searching upward from the given path
pub fn find_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if exists(&current) {
            // Normalize for symlink handling (macOS /var -> /private)
            return Some(
                current
                    .normalize()
                    .map(|np| np.into_path_buf())
                    .unwrap_or(current),
            );
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Resolve the workspace root from an explicit flag or the current directory.
///
/// Errors when no workspace can be found; commands that operate on an
/// existing workspace use this entry point.
pub fn resolve_root(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = flag {
        if !path.is_dir() {
            return Err(error::workspace_not_found(path.display().to_string()));
        }
        return Ok(dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()));
    }

    let cwd = std::env::current_dir().map_err(|e| error::io_error(e.to_string()))?;
    find_from(&cwd).ok_or_else(|| error::workspace_not_found(cwd.display().to_string()))
}

/// Resolve the workspace root, falling back to the current directory.
///
/// Bootstrapping a fresh project has no config to find yet, so `init`
/// treats the current directory as the root when the search comes up empty.
pub fn resolve_root_or_cwd(flag: Option<&Path>) -> Result<PathBuf> {
    if flag.is_some() {
        return resolve_root(flag);
    }

    let cwd = std::env::current_dir().map_err(|e| error::io_error(e.to_string()))?;
    Ok(find_from(&cwd).unwrap_or(cwd))
}

/// Create the base directories under the workspace root.
pub fn ensure_layout(root: &Path, base_dirs: &[String]) -> Result<()> {
    for dir in base_dirs {
        let path = root.join(dir);
        fs::create_dir_all(&path)
            .map_err(|e| error::workspace_unreadable(path.display().to_string(), e.to_string()))?;
    }
    Ok(())
}

/// Resolve a manifest's relative placement path against the workspace root.
///
/// The path is validated lexically: absolute paths, parent traversal, and
/// empty paths are rejected so a manifest cannot place content outside the
/// workspace.
pub fn placement_target(root: &Path, rel_path: &str) -> Result<PathBuf> {
    let rel = Path::new(rel_path);
    if rel.is_absolute() {
        return Err(error::invalid_placement_path(rel_path));
    }

    let mut target = root.to_path_buf();
    let mut depth = 0usize;
    for component in rel.components() {
        match component {
            Component::Normal(part) => {
                target.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            _ => return Err(error::invalid_placement_path(rel_path)),
        }
    }

    if depth == 0 {
        return Err(error::invalid_placement_path(rel_path));
    }
    Ok(target)
}

/// Write the `<dirname>.code-workspace` descriptor at the workspace root.
///
/// The descriptor lists the root folder plus every nested git repository
/// under it, so placed modules show up as their own folders in the editor.
/// Regenerated from scratch on every call.
pub fn write_editor_workspace(root: &Path) -> Result<PathBuf> {
    let mut folders: Vec<String> = vec![".".to_string()];
    let mut nested = nested_repository_folders(root);
    nested.sort();
    nested.dedup();
    folders.extend(nested);

    let descriptor = serde_json::json!({
        "folders": folders
            .iter()
            .map(|path| serde_json::json!({ "path": path }))
            .collect::<Vec<_>>(),
    });

    let name = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("workspace");
    let path = root.join(format!("{}.code-workspace", name));
    let body = serde_json::to_string_pretty(&descriptor)?;
    fs::write(&path, body)
        .map_err(|e| error::file_write_failed(path.display().to_string(), e.to_string()))?;
    Ok(path)
}

/// Workspace-relative paths of directories that contain a nested git
/// repository, with forward slashes on all platforms.
fn nested_repository_folders(root: &Path) -> Vec<String> {
    let mut folders = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| e.file_type().is_dir() && e.file_name() != ".git");

    for entry in walker.filter_map(std::result::Result::ok) {
        if entry.path().join(".git").exists() {
            if let Ok(rel) = entry.path().strip_prefix(root) {
                folders.push(to_forward_slashes(rel));
            }
        }
    }

    folders
}

fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect::<Vec<_>>()
        .join("/")
}
