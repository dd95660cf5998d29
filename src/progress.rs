//! Progress display for long-running commands

use indicatif::{ProgressBar, ProgressStyle};

/// Create a steadily ticking spinner with an initial message.
///
/// Callers clear it with `finish_and_clear` before printing results.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
