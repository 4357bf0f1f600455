//! # Spinners
//!
//! File: cli/src/common/ui/progress.rs
//! Repository: https://github.com/hostathome/cli
//!
//! Docker pulls and container operations can take a while without printing
//! anything. A spinner shows that work is happening. It ticks on its own
//! thread, so it keeps moving while the async task waits on the daemon.
//!
//! When stdout is not a terminal `indicatif` draws nothing.
//!
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

/// Starts a spinner showing `msg`.
pub fn spinner(msg: impl Into<String>) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "]),
    );
    bar.set_message(msg.into());
    bar.enable_steady_tick(TICK);
    bar
}

/// Shortens Docker pull progress lines for display next to the spinner.
pub fn pull_message(image: &str, status: &str) -> String {
    let status = status.trim();
    if status.is_empty() {
        format!("Pulling {}", image)
    } else {
        format!("Pulling {} ({})", image, status)
    }
}
