//! appup CLI entry point
//!
//! This is the main executable for the application self-updater. It handles
//! command-line argument parsing, logging setup, error display, and command
//! execution.
//!
//! Commands:
//! - `check` - compare the installed version against the latest release
//! - `update` - run the full backup/download/replace/rollback pipeline

use anyhow::Result;
use appup_cli::cli;
use appup_cli::core::error::render_fatal;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    // --verbose/--quiet/--config act through the environment
    cli.apply_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Execute the command
    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            render_fatal(&e);
            std::process::exit(1);
        }
    }
}
