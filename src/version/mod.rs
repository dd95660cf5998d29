//! Version comparison for module replacement decisions
//!
//! Module versions are loosely-formatted dotted strings (`1.2.0`, `v2.1`).
//! Parsing never fails: anything unparseable degrades to `(0, 0, 0)`, so a
//! malformed version can never abort a resolution run. This is deliberately
//! not semver (no pre-release or build metadata semantics).

/// Version assumed when a manifest declares none.
pub const DEFAULT_VERSION: &str = "0.0.1";

/// Parse a version string into a comparable 3-tuple.
///
/// Strips one leading `v`, splits on `.`, and parses up to the first three
/// components as unsigned integers, padding missing components with zero.
/// Any parse failure yields `(0, 0, 0)`: `"1.10.0"` is `(1, 10, 0)`,
/// `"v2.1"` is `(2, 1, 0)`, `"abc"` is `(0, 0, 0)`.
pub fn parse_version(version: &str) -> (u32, u32, u32) {
    let lowered = version.trim().to_lowercase();
    let cleaned = lowered.strip_prefix('v').unwrap_or(&lowered);
    if cleaned.is_empty() {
        return (0, 0, 0);
    }

    let mut components = [0u32; 3];
    for (slot, part) in components.iter_mut().zip(cleaned.split('.').take(3)) {
        match part.parse::<u32>() {
            Ok(value) => *slot = value,
            Err(_) => return (0, 0, 0),
        }
    }
    (components[0], components[1], components[2])
}

/// True when `candidate` strictly supersedes `installed`.
///
/// Comparison is lexicographic on the parsed 3-tuples, so `1.10.0` beats
/// `1.2.0` numerically. Ties are never superseding: a replacement happens
/// only on a clear version increase.
pub fn supersedes(candidate: &str, installed: &str) -> bool {
    parse_version(candidate) > parse_version(installed)
}
