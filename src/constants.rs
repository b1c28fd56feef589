//! Shared constants for the update pipeline.

/// User agent sent with every upstream API and download request.
pub const USER_AGENT: &str = concat!("appup/", env!("CARGO_PKG_VERSION"));

/// Sentinel used whenever a provider response carries no release notes.
pub const NO_CHANGELOG: &str = "No changelog available";

/// Default HTTP timeout in seconds for API calls and downloads.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Version reported when the application manifest is missing or has no
/// `version` field.
pub const FALLBACK_VERSION: &str = "0.0.0";

/// Application manifest read for the installed version.
pub const VERSION_MANIFEST: &str = "composer.json";

/// Staging locations under the application root. Fixed names: only one
/// update may be in flight at a time.
pub const UPDATE_ARCHIVE_PATH: &str = "storage/app/update.zip";
pub const UPDATE_STAGING_DIR: &str = "storage/app/update_temp";
pub const ROLLBACK_STAGING_DIR: &str = "storage/app/rollback_temp";
pub const BACKUP_ROOT: &str = "storage/app/backup";

/// File name of the snapshot archive inside a backup directory.
pub const BACKUP_ARCHIVE_NAME: &str = "backup.zip";

/// Paths always excluded from backup, replacement, and pruning, on top of
/// whatever the configuration adds.
pub const BUILTIN_EXCLUDES: &[&str] =
    &[".env", ".git", "vendor", "storage", "database/database.sqlite"];

/// Directories never removed by the empty-directory sweep, even when empty.
pub const CRITICAL_DIRECTORIES: &[&str] = &[
    "bootstrap/cache",
    "storage/app",
    "storage/framework/cache",
    "storage/framework/sessions",
    "storage/framework/views",
    "storage/logs",
];

/// Environment variable that disables progress bars.
pub const NO_PROGRESS_ENV: &str = "APPUP_NO_PROGRESS";

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "APPUP_CONFIG";
