//! Module manifest errors

use super::SproutError;

/// Creates an invalid placement path error
pub fn invalid_placement_path(path: impl Into<String>) -> SproutError {
    SproutError::InvalidPlacementPath { path: path.into() }
}
