use crate::config::UpdaterConfig;
use crate::release::{ProviderRegistry, ReleaseData, ReleaseService};
use crate::version;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use serde::Serialize;

/// Arguments for `appup check`.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// The update-check report.
///
/// The JSON rendering of this struct is the contract the hosting
/// application's status endpoint serves to its polling front-end, so the
/// field names are fixed.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub success: bool,
    pub current_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
    pub has_update: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckReport {
    /// Derive the report from the installed version and whatever the
    /// provider returned.
    pub fn build(current_version: &str, release: Option<ReleaseData>) -> Self {
        match release {
            None => Self {
                success: false,
                current_version: current_version.to_string(),
                latest_version: None,
                has_update: false,
                changelog: None,
                release_date: None,
                error: Some("Failed to fetch the latest release data.".to_string()),
            },
            Some(release) => {
                let latest = version::normalize(&release.version).to_string();
                let has_update = version::is_newer(&latest, current_version);
                Self {
                    success: true,
                    current_version: current_version.to_string(),
                    latest_version: Some(latest),
                    has_update,
                    changelog: Some(release.changelog),
                    release_date: release.release_date,
                    error: None,
                }
            }
        }
    }
}

/// Execute the check command.
///
/// Every outcome here is informational: an unreachable release feed prints
/// an error-styled line but still exits 0, because "I could not find out"
/// is an answer, not a failure of this process.
pub async fn execute(args: CheckArgs) -> Result<()> {
    let config = UpdaterConfig::load().await?;
    let registry = ProviderRegistry::new();
    let provider = registry.create(&config)?;
    let service = ReleaseService::new(provider, config.app_root());

    let current_version = service.current_version();
    let release = service.collect_release_data(None).await?;
    let report = CheckReport::build(&current_version, release);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&report),
    }
    Ok(())
}

fn print_text(report: &CheckReport) {
    if let Some(error) = &report.error {
        eprintln!("{}", error.red());
        return;
    }

    if report.has_update {
        println!("{}", "Update Available!".yellow().bold());
        println!("Current Version: {}", report.current_version);
        println!(
            "Latest Version: {}",
            report.latest_version.as_deref().unwrap_or("unknown")
        );
        if let Some(changelog) = &report.changelog {
            println!("Changelog:\n{changelog}");
        }
        if let Some(date) = &report.release_date {
            println!("Released: {date}");
        }
        println!("Run `appup update` to install the latest version");
    } else {
        println!("{}", "Your project is up to date!".green());
    }
}
