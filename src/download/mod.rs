//! Release archive download.
//!
//! One bounded-timeout GET, no retries. The body is written through a
//! temporary file and a rename so a failed download never leaves a partial
//! archive at the destination for a later step to trip over.

use crate::constants::USER_AGENT;
use crate::core::UpdaterError;
use crate::utils::fs::atomic_write;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Fetches a remote archive to a local path.
pub struct DownloadService {
    client: reqwest::Client,
}

impl DownloadService {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Download `url` to `destination`.
    ///
    /// # Errors
    ///
    /// [`UpdaterError::DownloadFailed`] carrying the HTTP status on a
    /// non-2xx response; [`UpdaterError::Http`] on transport failure.
    pub async fn download(&self, url: &str, destination: &Path) -> Result<(), UpdaterError> {
        info!(%url, "Downloading update");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdaterError::DownloadFailed {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        atomic_write(destination, &body)
            .map_err(|e| UpdaterError::Io(std::io::Error::other(e.to_string())))?;

        debug!(destination = %destination.display(), bytes = body.len(), "Download completed");
        Ok(())
    }
}
