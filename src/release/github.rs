//! GitHub releases API.
//!
//! Endpoint: `/repos/{owner}/{repo}/releases/latest` or
//! `/releases/tags/v{version}`. GitHub hands back a ready-made
//! `zipball_url`, so no download URL is synthesized. Tag names carry a `v`
//! prefix that is stripped from the reported version; the tag endpoint is
//! built with the prefix because that is what the tags are actually named.

use super::ReleaseData;
use crate::constants::NO_CHANGELOG;
use crate::version;
use serde_json::Value;

pub(super) fn build_api_url(owner: &str, repo: &str, target: Option<&str>) -> String {
    let base = format!("https://api.github.com/repos/{owner}/{repo}/releases");
    match target {
        Some(v) => format!("{base}/tags/v{}", version::normalize(v)),
        None => format!("{base}/latest"),
    }
}

pub(super) fn parse_release(body: &Value) -> Option<ReleaseData> {
    let tag = body.get("tag_name")?.as_str()?;
    if tag.is_empty() {
        return None;
    }

    Some(ReleaseData {
        version: version::normalize(tag).to_string(),
        download_url: body
            .get("zipball_url")
            .and_then(Value::as_str)
            .map(ToString::to_string),
        changelog: body
            .get("body")
            .and_then(Value::as_str)
            .unwrap_or(NO_CHANGELOG)
            .to_string(),
        release_date: None,
    })
}
