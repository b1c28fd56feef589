//! Cross-cutting utilities.
//!
//! - [`fs`] - small, tolerant file system helpers used by every service
//! - [`progress`] - progress bars that disappear under `APPUP_NO_PROGRESS`

pub mod fs;
pub mod progress;
