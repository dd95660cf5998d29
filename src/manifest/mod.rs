//! Module manifest (`module.yaml`)
//!
//! Every module repository declares a manifest at its root:
//!
//! ```yaml
//! path: managers/telemetry
//! version: 1.2.0
//! type: manager
//! description: Telemetry hub
//! dependencies:
//!   - https://github.com/example/retry-util
//! ```
//!
//! `path` is required for placement; everything else is optional. The
//! `dependencies` key accepts a single string or a list. Unknown keys are
//! ignored so manifests can carry extra metadata for other tools.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{self, Result};
use crate::version::DEFAULT_VERSION;

/// Manifest file name at a module repository's root.
pub const MANIFEST_FILE: &str = "module.yaml";

/// Per-module manifest declaring placement, version, and dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Placement path relative to the workspace root. A manifest without it
    /// causes the repository to be skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Module version, compared when the placement target already exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Free-form category label (e.g. `manager`, `util`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub module_type: Option<String>,

    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Repository references this module depends on.
    #[serde(
        default,
        deserialize_with = "string_or_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub dependencies: Vec<String>,
}

impl Manifest {
    /// Parse a manifest from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load the manifest inside a module directory, if present.
    ///
    /// Returns `Ok(None)` when the directory has no manifest file. A present
    /// but unreadable or unparseable manifest is an error; scanning callers
    /// degrade that to default metadata.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&manifest_path).map_err(|e| {
            error::file_read_failed(manifest_path.display().to_string(), e.to_string())
        })?;
        let manifest = serde_yaml::from_str(&content).map_err(|e| {
            error::config_parse_failed(manifest_path.display().to_string(), e.to_string())
        })?;
        Ok(Some(manifest))
    }

    /// Declared version, or the default when the manifest has none.
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_VERSION)
    }
}

/// Accept `dependencies: single-ref` as well as a proper YAML list.
fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<String>),
        One(String),
        Null,
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(list) => list,
        OneOrMany::One(single) => vec![single],
        OneOrMany::Null => Vec::new(),
    })
}
