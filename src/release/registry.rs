//! Provider selection from the repository URL.
//!
//! An ordered table of domain substrings, consulted first-match-wins. Hosts
//! the table as an owned value rather than process-global state: callers
//! (and tests) construct their own registries, mutate them freely, and pass
//! them where needed. No synchronization: registry mutation is an
//! administrative operation, not part of the update path.

use super::provider::{ProviderKind, ReleaseProvider};
use crate::config::UpdaterConfig;
use crate::core::UpdaterError;
use tracing::debug;

/// Ordered domain-to-provider table with a custom-endpoint fallback.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    entries: Vec<(String, ProviderKind)>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self {
            entries: vec![
                ("github.com".to_string(), ProviderKind::GitHub),
                ("gitlab.com".to_string(), ProviderKind::GitLab),
                ("bitbucket.org".to_string(), ProviderKind::Bitbucket),
            ],
        }
    }
}

impl ProviderRegistry {
    /// The registry with the three built-in VCS domains.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider for the configured release URL.
    ///
    /// The URL must be non-empty and syntactically valid; it is then matched
    /// against the domain table in insertion order, falling back to the
    /// custom-endpoint provider when nothing matches.
    ///
    /// # Errors
    ///
    /// [`UpdaterError::InvalidRepositoryUrl`] for an empty or unparseable
    /// URL, [`UpdaterError::InvalidLicenseKey`] for a malformed key on the
    /// custom provider.
    pub fn create(&self, config: &UpdaterConfig) -> Result<ReleaseProvider, UpdaterError> {
        let url = config.release_url.trim();
        if url.is_empty() || reqwest::Url::parse(url).is_err() {
            return Err(UpdaterError::InvalidRepositoryUrl {
                url: url.to_string(),
            });
        }

        let kind = self
            .entries
            .iter()
            .find(|(domain, _)| url.contains(domain.as_str()))
            .map_or(ProviderKind::Custom, |(_, kind)| *kind);
        debug!(%url, %kind, "Selected release provider");

        ReleaseProvider::new(kind, url, config.license_key.clone(), config.timeout())
    }

    /// Register a new domain. Registering a domain twice is an error.
    pub fn register(
        &mut self,
        domain: impl Into<String>,
        kind: ProviderKind,
    ) -> Result<(), UpdaterError> {
        let domain = domain.into();
        if self.contains(&domain) {
            return Err(UpdaterError::ProviderAlreadyRegistered { domain });
        }
        self.entries.push((domain, kind));
        Ok(())
    }

    /// Remove a domain. Returns whether it was present.
    pub fn remove(&mut self, domain: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(d, _)| d != domain);
        self.entries.len() != before
    }

    /// Whether a domain has an entry.
    pub fn contains(&self, domain: &str) -> bool {
        self.entries.iter().any(|(d, _)| d == domain)
    }

    /// Registered domains, in match order.
    pub fn domains(&self) -> Vec<&str> {
        self.entries.iter().map(|(d, _)| d.as_str()).collect()
    }
}
