//! Command implementations for the sprout CLI

pub mod completions;
pub mod helpers;
pub mod init;
pub mod list;
pub mod refresh;
pub mod show;
pub mod version;
