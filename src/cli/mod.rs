//! Command-line interface for appup.
//!
//! Two commands cover the whole operator surface:
//!
//! - `appup check` - compare the installed version against the newest
//!   release and show the changelog; `--format json` emits the report shape
//!   the status endpoint of a hosting application serves to its polling
//!   front-end
//! - `appup update [VERSION]` - run the full update pipeline, to the latest
//!   release or a pinned version
//!
//! Outcome mapping follows one rule: only operational failures exit
//! non-zero. "No update available", "already up to date", and "could not
//! fetch release data" are answers, not errors, and exit 0 with a styled
//! message.

mod check;
mod update;

pub use check::CheckReport;

use crate::constants::CONFIG_PATH_ENV;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for the appup self-updater.
#[derive(Parser)]
#[command(
    name = "appup",
    about = "Self-updater for deployed applications",
    version,
    author,
    long_about = "appup checks a VCS-hosted repository (GitHub, GitLab, Bitbucket, or a \
                  custom JSON endpoint) for newer releases and, on command, downloads the \
                  release, backs up the installation, swaps the files, and rolls back on failure."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (same as RUST_LOG=debug).
    #[arg(long, global = true)]
    verbose: bool,

    /// Only log errors.
    #[arg(long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the configuration file (overrides APPUP_CONFIG).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Available appup commands.
#[derive(Subcommand)]
enum Commands {
    /// Check for available updates without installing anything
    Check(check::CheckArgs),
    /// Update the application to the latest or a specific version
    Update(update::UpdateArgs),
}

impl Cli {
    /// Apply global flags to the environment. Must run before the tracing
    /// subscriber is installed so `--verbose`/`--quiet` take effect.
    pub fn apply_env(&self) {
        if self.verbose && std::env::var("RUST_LOG").is_err() {
            unsafe { std::env::set_var("RUST_LOG", "debug") };
        }
        if self.quiet {
            unsafe { std::env::set_var("RUST_LOG", "error") };
        }
        if let Some(path) = &self.config {
            unsafe { std::env::set_var(CONFIG_PATH_ENV, path) };
        }
    }

    /// Execute the selected command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Check(args) => check::execute(args).await,
            Commands::Update(args) => update::execute(args).await,
        }
    }
}
