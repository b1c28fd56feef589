//! Progress reporting for long file operations.
//!
//! Wraps `indicatif` so call sites never branch on whether progress output
//! is wanted: when `APPUP_NO_PROGRESS` is set (automation, dumb terminals)
//! the bar is hidden and every call becomes a no-op.

use crate::constants::NO_PROGRESS_ENV;
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

fn is_progress_disabled() -> bool {
    std::env::var(NO_PROGRESS_ENV).is_ok_and(|v| !v.is_empty() && v != "0")
}

fn default_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:.cyan} [{bar:30}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

/// A progress bar with a fixed number of steps.
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Create a bar for `len` steps, hidden when progress output is
    /// disabled.
    pub fn new(len: u64) -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new(len);
            bar.set_style(default_style());
            bar
        };
        Self { inner: bar }
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner.set_prefix(prefix.into());
    }

    pub fn inc(&self, delta: u64) {
        self.inner.inc(delta);
    }

    pub fn finish_with_message(&self, msg: impl Into<String>) {
        self.inner.finish_with_message(msg.into());
    }

    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}
