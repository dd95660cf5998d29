//! Fetch boundary for module repositories
//!
//! The resolver talks to remotes only through [`ModuleFetcher`]: manifest
//! retrieval, content placement, and scratch cleanup. [`GitFetcher`] is the
//! real implementation; resolver tests substitute an in-memory fake.
//!
//! Manifest retrieval is two-stage: a raw-content HTTP request when the host
//! offers one, falling back to a shallow clone into a per-run scratch area on
//! any failure. A scratch clone is kept and moved into place if the same
//! reference is later placed, so no repository is cloned twice in one run.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::common::fs::move_dir;
use crate::error::{self, Result};
use crate::git;
use crate::manifest::Manifest;
use crate::source;

/// Remote access boundary used by the resolver.
pub trait ModuleFetcher {
    /// Retrieve the manifest for a reference. `None` covers every recoverable
    /// absence: unreachable repository, missing manifest, unparseable body.
    fn fetch_manifest(&mut self, reference: &str) -> Option<Manifest>;

    /// Make the reference's repository content available at `target`.
    fn place(&mut self, reference: &str, target: &Path) -> Result<()>;

    /// Full content fetches (clones) performed so far. Lightweight manifest
    /// probes are not counted.
    fn fetch_count(&self) -> usize;

    /// Remove scratch state left behind by manifest fallbacks. Best-effort;
    /// called once at the end of a resolution run.
    fn cleanup(&mut self);
}

/// Fetches module repositories with git, probing manifests over HTTP first.
pub struct GitFetcher {
    workspace_root: PathBuf,
    http: Option<reqwest::blocking::Client>,
    scratch: Option<TempDir>,
    prepared: HashMap<String, PathBuf>,
    clones: usize,
}

impl GitFetcher {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            http: reqwest::blocking::Client::builder().build().ok(),
            scratch: None,
            prepared: HashMap::new(),
            clones: 0,
        }
    }

    /// Fetch the manifest from the reference's raw-content location.
    fn fetch_manifest_raw(&self, reference: &str) -> Option<Manifest> {
        let url = source::raw_manifest_url(reference)?;
        let client = self.http.as_ref()?;

        let response = client.get(&url).send().ok()?;
        if !response.status().is_success() {
            return None;
        }
        let body = response.text().ok()?;
        Manifest::from_yaml(&body).ok()
    }

    /// Shallow-clone the reference into the scratch area and read the
    /// manifest there. The clone is kept for a later [`Self::place`].
    fn fetch_manifest_via_clone(&mut self, reference: &str) -> Option<Manifest> {
        let key = source::normalize(reference);
        if let Some(existing) = self.prepared.get(&key) {
            return Manifest::load_from_dir(existing).ok().flatten();
        }

        let dir_name = format!("{}-{}", source::display_name(reference), self.prepared.len());
        let clone_dir = self.scratch_dir().ok()?.join(dir_name);

        self.clones += 1;
        git::clone(reference, &clone_dir, true).ok()?;
        self.prepared.insert(key, clone_dir.clone());

        Manifest::load_from_dir(&clone_dir).ok().flatten()
    }

    /// Per-run scratch directory, created lazily under the workspace root so
    /// scratch-to-target moves stay on one filesystem.
    fn scratch_dir(&mut self) -> Result<&Path> {
        if self.scratch.is_none() {
            let scratch = tempfile::Builder::new()
                .prefix(".sprout-scratch-")
                .tempdir_in(&self.workspace_root)
                .or_else(|_| tempfile::tempdir())
                .map_err(|e| {
                    error::io_error(format!("Failed to create scratch directory: {}", e))
                })?;
            self.scratch = Some(scratch);
        }

        // The Option is always Some here
        self.scratch
            .as_ref()
            .map(|t| t.path())
            .ok_or_else(|| error::io_error("scratch directory unavailable".to_string()))
    }
}

impl ModuleFetcher for GitFetcher {
    fn fetch_manifest(&mut self, reference: &str) -> Option<Manifest> {
        if let Some(manifest) = self.fetch_manifest_raw(reference) {
            return Some(manifest);
        }
        self.fetch_manifest_via_clone(reference)
    }

    fn place(&mut self, reference: &str, target: &Path) -> Result<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                error::file_write_failed(parent.display().to_string(), e.to_string())
            })?;
        }

        let key = source::normalize(reference);
        if let Some(staged) = self.prepared.remove(&key) {
            return move_dir(&staged, target).map_err(|e| {
                error::io_error(format!(
                    "Failed to move staged clone into {}: {}",
                    target.display(),
                    e
                ))
            });
        }

        self.clones += 1;
        git::clone(reference, target, true)?;
        Ok(())
    }

    fn fetch_count(&self) -> usize {
        self.clones
    }

    fn cleanup(&mut self) {
        self.prepared.clear();
        if let Some(scratch) = self.scratch.take() {
            let path = scratch.path().display().to_string();
            if let Err(e) = scratch.close() {
                eprintln!("Warning: failed to remove scratch directory {}: {}", path, e);
            }
        }
    }
}
