use crate::config::UpdaterConfig;
use crate::hooks::CommandHooks;
use crate::orchestrator::UpdateOrchestrator;
use crate::release::{ProviderRegistry, ReleaseService};
use crate::version;
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;

/// Arguments for `appup update`.
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Target version to update to (e.g. "1.2.0" or "v1.2.0"). Latest when
    /// omitted.
    #[arg(value_name = "VERSION")]
    pub version: Option<String>,
}

/// Execute the update command.
///
/// Informational endings ("no update available", "already using the latest
/// version") exit 0; only pipeline failures propagate as errors.
pub async fn execute(args: UpdateArgs) -> Result<()> {
    let config = UpdaterConfig::load().await?;
    let registry = ProviderRegistry::new();
    let provider = registry.create(&config)?;
    let service = ReleaseService::new(provider, config.app_root());

    match &args.version {
        Some(version) => println!("Initiating update for version: {version}"),
        None => println!("Initiating update for the latest version."),
    }

    let release = service
        .collect_release_data(args.version.as_deref())
        .await
        .context("Failed to collect release data")?;

    let Some(release) = release.filter(|r| r.is_installable()) else {
        println!("{}", "No update available.".red());
        return Ok(());
    };

    let current_version = service.current_version();
    let latest_version = version::normalize(&release.version);

    if !version::is_newer(latest_version, &current_version) {
        println!("{}", "You are already using the latest version.".red());
        return Ok(());
    }

    println!(
        "{}",
        format!("Update process has been started ({current_version} -> {latest_version}).").cyan()
    );

    let hooks = Arc::new(CommandHooks::new(config.hooks.clone(), config.app_root()));
    let orchestrator = UpdateOrchestrator::new(&config, hooks);
    orchestrator.process_update(&release).await?;

    println!("{}", "Update process has been completed successfully.".green());
    Ok(())
}
