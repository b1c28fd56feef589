//! Provider selection and release fetching against the in-process endpoint.
//!
//! The VCS providers hard-code their API hosts, so the network round trip is
//! exercised through the custom JSON endpoint; the VCS-specific parsing and
//! tie-breaks are covered by the fixed-input tests beside each parser.

use crate::support::{self, CannedResponse};
use appup_cli::cli::CheckReport;
use appup_cli::config::UpdaterConfig;
use appup_cli::core::UpdaterError;
use appup_cli::release::{ProviderKind, ProviderRegistry, ReleaseService};
use serde_json::json;

fn config_for(url: &str) -> UpdaterConfig {
    UpdaterConfig {
        release_url: url.to_string(),
        request_timeout: 5,
        ..Default::default()
    }
}

#[test]
fn registry_maps_each_vcs_domain_and_falls_back_to_custom() {
    let registry = ProviderRegistry::new();
    let cases = [
        ("https://github.com/acme/storefront", ProviderKind::GitHub),
        ("https://gitlab.com/acme/storefront", ProviderKind::GitLab),
        ("https://bitbucket.org/acme/storefront", ProviderKind::Bitbucket),
        ("https://updates.acme.example/feed.json", ProviderKind::Custom),
    ];
    for (url, expected) in cases {
        let provider = registry.create(&config_for(url)).unwrap();
        assert_eq!(provider.kind(), expected, "{url}");
    }
}

#[tokio::test]
async fn custom_endpoint_release_is_normalized() {
    let base_url = support::serve(vec![CannedResponse::json(json!({
        "version": "v1.1.0",
        "download_url": "https://updates.acme.example/1.1.0.zip",
        "changelog": "Fixes and features"
    }))]);

    let config = config_for(&format!("{base_url}/feed.json"));
    let provider = ProviderRegistry::new().create(&config).unwrap();
    assert_eq!(provider.kind(), ProviderKind::Custom);

    let release = provider.latest_release().await.unwrap().unwrap();
    assert_eq!(release.version, "1.1.0", "leading v must be stripped");
    assert_eq!(
        release.download_url.as_deref(),
        Some("https://updates.acme.example/1.1.0.zip")
    );
    assert_eq!(release.changelog, "Fixes and features");
}

#[tokio::test]
async fn upstream_404_reports_absent_release_not_an_error() {
    let base_url = support::serve(vec![CannedResponse::status(404)]);

    let config = config_for(&format!("{base_url}/feed.json"));
    let provider = ProviderRegistry::new().create(&config).unwrap();

    let release = provider.latest_release().await.unwrap();
    assert!(release.is_none());

    // The check report turns the absence into the operator-facing message
    let report = CheckReport::build("1.0.0", release);
    assert!(!report.success);
    assert!(!report.has_update);
    assert_eq!(report.error.as_deref(), Some("Failed to fetch the latest release data."));
}

#[tokio::test]
async fn newer_release_reports_update_available_through_the_service() {
    let temp = tempfile::TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("composer.json"),
        r#"{"name": "acme/storefront", "version": "1.0.0"}"#,
    )
    .unwrap();

    let base_url = support::serve(vec![CannedResponse::json(json!({
        "version": "v1.1.0",
        "download_url": "https://updates.acme.example/1.1.0.zip"
    }))]);

    let config = config_for(&format!("{base_url}/feed.json"));
    let provider = ProviderRegistry::new().create(&config).unwrap();
    let service = ReleaseService::new(provider, temp.path().to_path_buf());

    let current = service.current_version();
    let release = service.collect_release_data(None).await.unwrap();
    let report = CheckReport::build(&current, release);

    assert!(report.success);
    assert!(report.has_update);
    assert_eq!(report.current_version, "1.0.0");
    assert_eq!(report.latest_version.as_deref(), Some("1.1.0"));
}

#[tokio::test]
async fn equal_versions_report_up_to_date_through_the_service() {
    let temp = tempfile::TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("composer.json"),
        r#"{"name": "acme/storefront", "version": "1.1.0"}"#,
    )
    .unwrap();

    let base_url = support::serve(vec![CannedResponse::json(json!({
        "version": "v1.1.0",
        "download_url": "https://updates.acme.example/1.1.0.zip"
    }))]);

    let config = config_for(&format!("{base_url}/feed.json"));
    let provider = ProviderRegistry::new().create(&config).unwrap();
    let service = ReleaseService::new(provider, temp.path().to_path_buf());

    let report = CheckReport::build(
        &service.current_version(),
        service.collect_release_data(None).await.unwrap(),
    );
    assert!(report.success);
    assert!(!report.has_update);
}

#[tokio::test]
async fn non_json_body_reports_absent_release() {
    let base_url = support::serve(vec![CannedResponse {
        status: 200,
        content_type: "text/html",
        body: b"<html>maintenance page</html>".to_vec(),
    }]);

    let config = config_for(&format!("{base_url}/feed.json"));
    let provider = ProviderRegistry::new().create(&config).unwrap();
    assert!(provider.latest_release().await.unwrap().is_none());
}

#[test]
fn malformed_repository_url_is_fatal() {
    let registry = ProviderRegistry::new();
    let result = registry.create(&config_for("definitely not a url"));
    assert!(matches!(result, Err(UpdaterError::InvalidRepositoryUrl { .. })));
}
