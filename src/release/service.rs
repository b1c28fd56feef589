//! Installed-version lookup and release queries.

use super::provider::ReleaseProvider;
use super::ReleaseData;
use crate::constants::{FALLBACK_VERSION, VERSION_MANIFEST};
use crate::core::UpdaterError;
use crate::utils::fs::read_json_file;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Reads the installed version from the application manifest and delegates
/// release queries to the bound provider.
pub struct ReleaseService {
    provider: ReleaseProvider,
    app_root: PathBuf,
}

impl ReleaseService {
    pub fn new(provider: ReleaseProvider, app_root: PathBuf) -> Self {
        Self { provider, app_root }
    }

    /// The version recorded in the application manifest.
    ///
    /// Never fails: a missing manifest, unreadable JSON, or an absent
    /// `version` field all report `"0.0.0"`.
    pub fn current_version(&self) -> String {
        let manifest = self.app_root.join(VERSION_MANIFEST);
        let version = read_json_file::<Value>(&manifest)
            .ok()
            .and_then(|doc| doc.get("version").and_then(Value::as_str).map(ToString::to_string))
            .unwrap_or_else(|| FALLBACK_VERSION.to_string());
        debug!(manifest = %manifest.display(), %version, "Read installed version");
        version
    }

    /// Fetch release data for a specific version, or the latest release
    /// when `version` is `None`.
    pub async fn collect_release_data(
        &self,
        version: Option<&str>,
    ) -> Result<Option<ReleaseData>, UpdaterError> {
        match version {
            Some(v) => self.provider.release_by_version(v).await,
            None => self.provider.latest_release().await,
        }
    }
}
