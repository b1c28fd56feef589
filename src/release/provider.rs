//! The release provider: one struct, a closed set of upstream kinds.
//!
//! Each kind differs only in how it builds its API endpoint URL and how it
//! reads the response body; the request cycle itself is shared. Keeping the
//! kinds in one `enum` (instead of one type per upstream) makes the match
//! arms exhaustive: a new kind does not compile until it has an endpoint
//! builder and a body parser.

use super::{ReleaseData, bitbucket, custom, github, gitlab};
use crate::constants::USER_AGENT;
use crate::core::UpdaterError;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// The supported upstream release sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    GitHub,
    GitLab,
    Bitbucket,
    /// A configured JSON endpoint that already speaks the normalized shape.
    Custom,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Bitbucket => "bitbucket",
            Self::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Fetches and normalizes release metadata from one upstream.
pub struct ReleaseProvider {
    kind: ProviderKind,
    release_url: String,
    license_key: Option<String>,
    client: reqwest::Client,
}

impl ReleaseProvider {
    /// Bind a provider to a repository URL.
    ///
    /// # Errors
    ///
    /// [`UpdaterError::InvalidLicenseKey`] when a license key is configured
    /// for the custom endpoint but is not a plain printable token. URL
    /// problems surface later, from [`Self::latest_release`] and friends,
    /// because only the VCS kinds parse the URL path at all.
    pub fn new(
        kind: ProviderKind,
        release_url: impl Into<String>,
        license_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, UpdaterError> {
        if kind == ProviderKind::Custom
            && let Some(key) = &license_key
            && !custom::is_valid_license_key(key)
        {
            return Err(UpdaterError::InvalidLicenseKey);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Ok(Self {
            kind,
            release_url: release_url.into(),
            license_key,
            client,
        })
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Fetch the newest release the upstream reports.
    pub async fn latest_release(&self) -> Result<Option<ReleaseData>, UpdaterError> {
        self.fetch_release_data(None).await
    }

    /// Fetch one specific release by version.
    pub async fn release_by_version(
        &self,
        version: &str,
    ) -> Result<Option<ReleaseData>, UpdaterError> {
        self.fetch_release_data(Some(version)).await
    }

    async fn fetch_release_data(
        &self,
        version: Option<&str>,
    ) -> Result<Option<ReleaseData>, UpdaterError> {
        let url = self.build_api_url(version)?;
        debug!(kind = %self.kind, %url, "Fetching release data");

        let Some(body) = self.get_json(&url).await else {
            return Ok(None);
        };
        Ok(self.parse_release_data(&body))
    }

    /// Build the endpoint URL for a specific version, or for
    /// latest/all-tags when `version` is `None`.
    pub(super) fn build_api_url(&self, version: Option<&str>) -> Result<String, UpdaterError> {
        match self.kind {
            ProviderKind::GitHub => {
                let (owner, repo) = self.owner_repo()?;
                Ok(github::build_api_url(&owner, &repo, version))
            }
            ProviderKind::GitLab => {
                let (owner, repo) = self.owner_repo()?;
                Ok(gitlab::build_api_url(&owner, &repo, version))
            }
            ProviderKind::Bitbucket => {
                let (owner, repo) = self.owner_repo()?;
                Ok(bitbucket::build_api_url(&owner, &repo, version))
            }
            ProviderKind::Custom => {
                Ok(custom::build_api_url(&self.release_url, self.license_key.as_deref()))
            }
        }
    }

    /// Read the response body per upstream shape. `None` means the body
    /// carried no usable release.
    pub(super) fn parse_release_data(&self, body: &Value) -> Option<ReleaseData> {
        match self.kind {
            ProviderKind::GitHub => github::parse_release(body),
            ProviderKind::GitLab => {
                let (owner, repo) = self.owner_repo().ok()?;
                gitlab::parse_release(body, &owner, &repo)
            }
            ProviderKind::Bitbucket => {
                let (owner, repo) = self.owner_repo().ok()?;
                bitbucket::parse_release(body, &owner, &repo)
            }
            ProviderKind::Custom => custom::parse_release(body),
        }
    }

    /// Extract `{owner, repo}` from the repository URL path.
    ///
    /// # Errors
    ///
    /// [`UpdaterError::InvalidRepositoryUrl`] unless the path has exactly
    /// two non-empty segments.
    pub(super) fn owner_repo(&self) -> Result<(String, String), UpdaterError> {
        let invalid = || UpdaterError::InvalidRepositoryUrl {
            url: self.release_url.clone(),
        };

        let parsed = reqwest::Url::parse(&self.release_url).map_err(|_| invalid())?;
        let segments: Vec<&str> = parsed
            .path()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [owner, repo] => {
                let repo = repo.strip_suffix(".git").unwrap_or(repo);
                Ok(((*owner).to_string(), repo.to_string()))
            }
            _ => Err(invalid()),
        }
    }

    /// One GET with the tool's User-Agent. Any upstream trouble (transport
    /// failure, non-2xx, non-JSON body) reports `None`: absent release
    /// data, not an error.
    async fn get_json(&self, url: &str) -> Option<Value> {
        let response = match self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(%url, error = %e, "Release API request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(%url, status = %response.status(), "Release API returned non-success status");
            return None;
        }

        match response.json::<Value>().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(%url, error = %e, "Release API body was not valid JSON");
                None
            }
        }
    }
}
