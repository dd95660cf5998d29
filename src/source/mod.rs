//! Repository reference handling
//!
//! A reference is an opaque URL-like string naming a remote module repository:
//! - HTTPS: `https://github.com/user/repo.git`
//! - SSH / scp-style: `git@github.com:user/repo.git`
//! - Anything else a git client can clone (`ssh://`, `file://`, local paths)
//!
//! References are deduplicated by their normalized form; the original string
//! is kept for display and as the placement map key.

use crate::manifest::MANIFEST_FILE;

/// Canonical identity key for a repository reference.
///
/// Lower-cases the reference and strips one trailing `.git` suffix. Two
/// references with the same key are treated as the same repository:
///
/// ```text
/// normalize("https://host/Org/Repo.git") == normalize("https://host/org/repo")
/// ```
pub fn normalize(reference: &str) -> String {
    let lowered = reference.trim().to_lowercase();
    match lowered.strip_suffix(".git") {
        Some(stripped) => stripped.to_string(),
        None => lowered,
    }
}

/// Short human-readable name for a reference, used in logs and summaries.
///
/// Takes the last path segment, dropping a `.git` suffix. Handles both URL
/// (`/`) and scp-style (`:`) separators.
pub fn display_name(reference: &str) -> String {
    let trimmed = reference.trim().trim_end_matches('/');
    let stripped = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    stripped
        .rsplit(['/', ':'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(stripped)
        .to_string()
}

/// Raw-content URL for a reference's manifest, when the host offers one.
///
/// Only GitHub HTTP(S) references have a raw fast path; `HEAD` tracks the
/// repository's default branch. SSH and non-GitHub references return `None`
/// and are fetched via a shallow clone instead.
pub fn raw_manifest_url(reference: &str) -> Option<String> {
    let trimmed = reference.trim();
    let rest = trimmed
        .strip_prefix("https://github.com/")
        .or_else(|| trimmed.strip_prefix("http://github.com/"))?;
    let rest = rest.trim_end_matches('/');
    let rest = rest.strip_suffix(".git").unwrap_or(rest);

    let (owner, repo) = rest.split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }

    Some(format!(
        "https://raw.githubusercontent.com/{owner}/{repo}/HEAD/{MANIFEST_FILE}"
    ))
}
