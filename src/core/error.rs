//! Error handling for appup.
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** - every failure mode in the update pipeline
//!    has its own [`UpdaterError`] variant so callers can match on it.
//! 2. **One policy point** - low-level services only raise; the orchestrator
//!    alone decides abort-vs-rollback, and the CLI alone decides the exit
//!    status and styling.
//!
//! Two whole categories of upstream trouble are deliberately NOT errors:
//! an HTTP failure from a release API is reported as an absent release
//! (`Option::None` at the provider layer), and "no update available" is an
//! informational outcome at the CLI. Errors here are reserved for malformed
//! configuration and for operational failures mid-pipeline.

use colored::Colorize;
use thiserror::Error;

/// The error type for every fallible updater operation.
#[derive(Error, Debug)]
pub enum UpdaterError {
    /// Repository URL is empty, not a URL, or its path does not contain
    /// exactly `{owner}/{repo}`.
    #[error("Invalid repository URL: {url}")]
    InvalidRepositoryUrl {
        /// The offending URL as configured.
        url: String,
    },

    /// License key configured for the custom provider has an invalid format.
    #[error("Invalid license key format")]
    InvalidLicenseKey,

    /// A provider domain was registered twice.
    #[error("Provider already registered for domain: {domain}")]
    ProviderAlreadyRegistered {
        /// Domain substring that already has an entry.
        domain: String,
    },

    /// Release data exists but carries no download URL, so there is nothing
    /// to install. Informational at the CLI, never a process failure.
    #[error("No update available")]
    NoUpdateAvailable,

    /// The release archive could not be fetched.
    #[error("Failed to download update: {status}")]
    DownloadFailed {
        /// HTTP status returned by the upstream server.
        status: u16,
        /// URL that was requested.
        url: String,
    },

    /// The downloaded archive could not be opened or produced no top-level
    /// directory.
    #[error("Extraction failed: {reason}")]
    ExtractionFailed {
        /// Why the archive was rejected.
        reason: String,
    },

    /// The snapshot archive could not be created.
    #[error("Backup failed: {reason}")]
    BackupFailed {
        /// Why the snapshot could not be written.
        reason: String,
    },

    /// Rollback was requested but the snapshot archive is gone. Fatal:
    /// there is no further recovery to attempt.
    #[error("Backup not found: {path}")]
    BackupNotFound {
        /// Expected location of the snapshot archive.
        path: String,
    },

    /// The dependency manager executable is not on PATH.
    #[error("Composer is not installed or not found in PATH")]
    ComposerNotFound,

    /// Dependency install failed because vendor files are missing after the
    /// file swap. Distinct from a generic failure because operators hit this
    /// condition often and need to recognize it quickly.
    #[error("Composer {operation} failed due to missing files")]
    ComposerMissingFiles {
        /// The composer subcommand that failed ("install" or "update").
        operation: String,
        /// Combined stdout/stderr of the failed run.
        output: String,
    },

    /// Dependency install/update failed for any other reason.
    #[error("Composer {operation} failed")]
    ComposerCommandFailed {
        /// The composer subcommand that failed.
        operation: String,
        /// Combined stdout/stderr of the failed run.
        output: String,
    },

    /// A lifecycle hook command exited non-zero.
    #[error("Hook '{hook}' failed: {reason}")]
    HookFailed {
        /// Which hook failed (maintenance_on, migrate, ...).
        hook: String,
        /// Captured failure detail.
        reason: String,
    },

    /// File system operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport failure (connection refused, timeout, TLS, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A manifest or API payload could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Print a fatal error to stderr in the CLI's house style.
///
/// Walks the anyhow context chain so the operator sees both the summary and
/// the underlying cause.
pub fn render_fatal(err: &anyhow::Error) {
    eprintln!("{} {}", "error:".red().bold(), err);
    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", "caused by:".red(), cause);
    }
}
