//! Dependency manager invocation.
//!
//! After the file swap the application may need its PHP dependencies
//! reinstalled. [`ComposerService`] locates the `composer` executable, runs
//! it non-interactively, and classifies failures: a "Failed to open stream"
//! in the output means the vendor tree is missing files (the most common
//! post-extraction condition), everything else is a generic command
//! failure.

use crate::core::UpdaterError;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};

/// Output substring marking the missing-vendor-files failure mode.
const MISSING_FILES_MARKER: &str = "Failed to open stream";

/// Runs composer in the application root.
pub struct ComposerService {
    working_dir: PathBuf,
}

impl ComposerService {
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// `composer install --no-interaction`.
    pub async fn run_install(&self) -> Result<(), UpdaterError> {
        self.run("install").await
    }

    /// `composer update --no-interaction`.
    pub async fn run_update(&self) -> Result<(), UpdaterError> {
        self.run("update").await
    }

    /// `composer clear-cache`. Callers treat this as best-effort.
    pub async fn clear_cache(&self) -> Result<(), UpdaterError> {
        self.run("clear-cache").await
    }

    async fn run(&self, operation: &str) -> Result<(), UpdaterError> {
        let composer = locate_composer()?;
        info!(composer = %composer.display(), operation, "Running composer");

        let output = Command::new(&composer)
            .arg(operation)
            .arg("--no-interaction")
            .current_dir(&self.working_dir)
            .output()
            .await?;

        if output.status.success() {
            debug!(operation, "Composer finished");
            return Ok(());
        }

        let combined = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        Err(classify_failure(operation, combined))
    }
}

fn locate_composer() -> Result<PathBuf, UpdaterError> {
    which::which("composer").map_err(|_| UpdaterError::ComposerNotFound)
}

/// Split composer failures into "vendor files are missing" and everything
/// else.
fn classify_failure(operation: &str, output: String) -> UpdaterError {
    if output.contains(MISSING_FILES_MARKER) {
        UpdaterError::ComposerMissingFiles {
            operation: operation.to_string(),
            output,
        }
    } else {
        UpdaterError::ComposerCommandFailed {
            operation: operation.to_string(),
            output,
        }
    }
}
