//! GitLab repository tags API.
//!
//! Endpoint: `/api/v4/projects/{owner}%2F{repo}/repository/tags`, optionally
//! suffixed with `/{version}` for one tag. The all-tags response is a list
//! already ordered newest-first by the API, so the first element is taken as
//! latest without re-sorting. Release notes live under `release.description`
//! on a tag; the archive URL is synthesized from the raw tag name because
//! the tags API carries no download link.

use super::ReleaseData;
use crate::constants::NO_CHANGELOG;
use crate::version;
use serde_json::Value;

pub(super) fn build_api_url(owner: &str, repo: &str, target: Option<&str>) -> String {
    let base = format!("https://gitlab.com/api/v4/projects/{owner}%2F{repo}/repository/tags");
    match target {
        Some(v) => format!("{base}/{v}"),
        None => base,
    }
}

fn archive_url(owner: &str, repo: &str, tag: &str) -> String {
    format!("https://gitlab.com/{owner}/{repo}/-/archive/{tag}/{tag}.zip")
}

pub(super) fn parse_release(body: &Value, owner: &str, repo: &str) -> Option<ReleaseData> {
    // All-tags queries return a list; single-tag queries return one object.
    let tag_obj = match body {
        Value::Array(tags) => tags.first()?,
        other => other,
    };

    let tag = tag_obj.get("name")?.as_str()?;
    if tag.is_empty() {
        return None;
    }

    Some(ReleaseData {
        version: version::normalize(tag).to_string(),
        download_url: Some(archive_url(owner, repo, tag)),
        changelog: tag_obj
            .pointer("/release/description")
            .and_then(Value::as_str)
            .unwrap_or(NO_CHANGELOG)
            .to_string(),
        release_date: None,
    })
}
