//! Release metadata: fetching, normalization, and the installed version.
//!
//! Every supported upstream (GitHub, GitLab, Bitbucket, custom JSON
//! endpoint) answers "what is the latest release" in a different shape.
//! This module flattens all of them into one [`ReleaseData`] value:
//!
//! - [`ReleaseProvider`] issues the API request and parses the response for
//!   one upstream kind
//! - [`ProviderRegistry`] picks the kind from the repository URL
//! - [`ReleaseService`] reads the installed version and delegates release
//!   queries to the bound provider
//!
//! Upstream failures are not errors here. A provider that gets a non-2xx
//! response, a transport failure, or an unparseable body reports `None`,
//! which callers surface as "no release data". Errors are reserved for
//! configuration problems (a malformed repository URL, a bad license key).

mod bitbucket;
mod custom;
mod github;
mod gitlab;
mod provider;
mod registry;
mod service;

pub use provider::{ProviderKind, ReleaseProvider};
pub use registry::ProviderRegistry;
pub use service::ReleaseService;

use serde::{Deserialize, Serialize};

/// Normalized release metadata, the common denominator of every provider.
///
/// Invariant: a record only exists when `version` is present; a release
/// without a `download_url` can be reported to the operator but cannot be
/// installed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseData {
    /// Release version with any leading `v` stripped.
    pub version: String,
    /// Absolute URL of the release zip archive, when the upstream offers
    /// one.
    pub download_url: Option<String>,
    /// Release notes, or the shared sentinel when the upstream has none.
    pub changelog: String,
    /// Publication timestamp, normalized to a display string. Only the
    /// custom endpoint supplies one.
    pub release_date: Option<String>,
}

impl ReleaseData {
    /// Whether this release carries everything an update needs.
    pub fn is_installable(&self) -> bool {
        self.download_url.is_some() && !self.version.is_empty()
    }
}
