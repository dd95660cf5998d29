//! Git operation errors

use super::SproutError;

/// Creates a git operation failed error
pub fn operation_failed(message: impl Into<String>) -> SproutError {
    SproutError::GitOperationFailed {
        message: message.into(),
    }
}

/// Creates a clone failed error
pub fn clone_failed(url: impl Into<String>, reason: impl Into<String>) -> SproutError {
    SproutError::GitCloneFailed {
        url: url.into(),
        reason: reason.into(),
    }
}
