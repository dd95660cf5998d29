//! Workspace configuration (`sprout.yaml`)
//!
//! The config file at the workspace root declares which module repositories
//! to resolve and, optionally, which base category directories the workspace
//! uses:
//!
//! ```yaml
//! modules:
//!   - https://github.com/example/telemetry-manager
//! directories:
//!   - core
//!   - managers
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

/// Config file name at the workspace root.
pub const CONFIG_FILE: &str = "sprout.yaml";

/// Base category directories created at init and scanned afterwards, used
/// when the config declares no `directories` list.
pub const DEFAULT_BASE_DIRS: [&str; 5] = ["core", "managers", "utils", "plugins", "mcps"];

/// Workspace configuration declaring the seed module set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Module repository references resolved by `sprout init`.
    pub modules: Vec<String>,

    /// Optional override of the base category directory list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directories: Option<Vec<String>>,
}

impl ProjectConfig {
    /// Load the configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(error::config_not_found(path.display().to_string()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| error::config_read_failed(path.display().to_string(), e.to_string()))?;
        let config = serde_yaml::from_str(&content)
            .map_err(|e| error::config_parse_failed(path.display().to_string(), e.to_string()))?;
        Ok(config)
    }

    /// Effective base category directories for this workspace.
    pub fn base_dirs(&self) -> Vec<String> {
        match &self.directories {
            Some(dirs) if !dirs.is_empty() => dirs.clone(),
            _ => DEFAULT_BASE_DIRS.iter().map(|d| (*d).to_string()).collect(),
        }
    }
}
