//! Module lifecycle errors

use super::SproutError;

/// Creates a module not found error
pub fn not_found(name: impl Into<String>) -> SproutError {
    SproutError::ModuleNotFound { name: name.into() }
}

/// Creates a no refresh hook error
pub fn no_refresh_hook(name: impl Into<String>) -> SproutError {
    SproutError::NoRefreshHook { name: name.into() }
}

/// Creates a hook failed error
pub fn hook_failed(name: impl Into<String>, status: i32) -> SproutError {
    SproutError::HookFailed {
        name: name.into(),
        status,
    }
}

/// Creates an init incomplete error
pub fn init_incomplete(failed: usize) -> SproutError {
    SproutError::InitIncomplete { failed }
}

/// Creates a refresh incomplete error
pub fn refresh_incomplete(failed: usize) -> SproutError {
    SproutError::RefreshIncomplete { failed }
}
