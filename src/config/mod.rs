//! Updater configuration.
//!
//! Settings live in a TOML file, by default `~/.appup/config.toml`, and can
//! be relocated with the `APPUP_CONFIG` environment variable (useful for
//! tests and for machines hosting more than one managed application). Two
//! values can additionally be overridden per-invocation from the
//! environment: `APPUP_RELEASE_URL` and `APPUP_LICENSE_KEY`.
//!
//! # File Format
//!
//! ```toml
//! release_url = "https://github.com/acme/storefront"
//! license_key = "sk-1234"                 # custom provider only
//! request_timeout = 120                   # seconds
//! exclude_items = ["node_modules", ".htaccess", "public/.htaccess"]
//! require_dependency_install = false
//! require_dependency_update = false
//! app_root = "/var/www/storefront"        # defaults to the working dir
//!
//! [hooks]
//! maintenance_on = ["php", "artisan", "down"]
//! maintenance_off = ["php", "artisan", "up"]
//! migrate = ["php", "artisan", "migrate", "--force"]
//! clear_caches = ["php", "artisan", "optimize:clear"]
//! ```
//!
//! Every field has a default, so an empty file (or none at all) yields a
//! usable configuration pointed at nothing; the CLI rejects an empty
//! `release_url` when a command actually needs one.

use crate::constants::{CONFIG_PATH_ENV, DEFAULT_REQUEST_TIMEOUT_SECS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Lifecycle hook commands, each an argv vector executed as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HookCommands {
    /// Puts the application into maintenance mode.
    pub maintenance_on: Vec<String>,
    /// Brings the application back up.
    pub maintenance_off: Vec<String>,
    /// Runs database migrations non-interactively.
    pub migrate: Vec<String>,
    /// Clears the application's caches.
    pub clear_caches: Vec<String>,
}

impl Default for HookCommands {
    fn default() -> Self {
        let argv = |parts: &[&str]| parts.iter().map(ToString::to_string).collect();
        Self {
            maintenance_on: argv(&["php", "artisan", "down"]),
            maintenance_off: argv(&["php", "artisan", "up"]),
            migrate: argv(&["php", "artisan", "migrate", "--force"]),
            clear_caches: argv(&["php", "artisan", "optimize:clear"]),
        }
    }
}

/// Top-level updater configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UpdaterConfig {
    /// Human-facing repository URL (or custom JSON endpoint) releases are
    /// fetched from.
    pub release_url: String,

    /// License or purchase key appended to custom-endpoint requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_key: Option<String>,

    /// HTTP timeout in seconds for API calls and downloads.
    pub request_timeout: u64,

    /// Path prefixes excluded from backup, replacement, and pruning, merged
    /// with the built-in set.
    pub exclude_items: Vec<String>,

    /// Run `composer install` after the file swap.
    pub require_dependency_install: bool,

    /// Run `composer update` after the file swap.
    pub require_dependency_update: bool,

    /// Root of the managed installation. Defaults to the working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_root: Option<PathBuf>,

    /// Lifecycle hook commands.
    pub hooks: HookCommands,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            release_url: String::new(),
            license_key: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            exclude_items: Vec::new(),
            require_dependency_install: false,
            require_dependency_update: false,
            app_root: None,
            hooks: HookCommands::default(),
        }
    }
}

impl UpdaterConfig {
    /// Load the configuration from the default location (or `APPUP_CONFIG`),
    /// then apply environment overrides.
    ///
    /// A missing file is not an error; defaults are returned instead.
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        let mut config = if path.exists() {
            Self::load_from(&path).await?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load the configuration from an explicit path. The file must exist.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file syntax in {}", path.display()))
    }

    /// Write the configuration to an explicit path, creating parent
    /// directories as needed.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        tokio::fs::write(path, contents)
            .await
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Resolve the configuration file location: `APPUP_CONFIG` when set,
    /// `~/.appup/config.toml` otherwise.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".appup").join("config.toml"))
    }

    /// Root of the managed installation.
    pub fn app_root(&self) -> PathBuf {
        self.app_root
            .clone()
            .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Request timeout as a [`std::time::Duration`].
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("APPUP_RELEASE_URL")
            && !url.is_empty()
        {
            self.release_url = url;
        }
        if let Ok(key) = env::var("APPUP_LICENSE_KEY")
            && !key.is_empty()
        {
            self.license_key = Some(key);
        }
    }
}
