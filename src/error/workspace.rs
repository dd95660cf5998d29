//! Workspace errors

use super::SproutError;

/// Creates a workspace not found error
pub fn not_found(path: impl Into<String>) -> SproutError {
    SproutError::WorkspaceNotFound { path: path.into() }
}

/// Creates a workspace unreadable error
pub fn unreadable(path: impl Into<String>, reason: impl Into<String>) -> SproutError {
    SproutError::WorkspaceUnreadable {
        path: path.into(),
        reason: reason.into(),
    }
}
