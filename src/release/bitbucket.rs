//! Bitbucket refs/tags API.
//!
//! Endpoint: `/2.0/repositories/{owner}/{repo}/refs/tags`, optionally
//! suffixed with `/{version}` for one tag. The list form pages in ASCENDING
//! order, so the LAST element of the page is taken as latest. That is a
//! deliberate tie-break matching the API's ordering, not an oversight.
//! Release notes come from the tagged commit's message; the archive URL is
//! synthesized from the raw tag name.

use super::ReleaseData;
use crate::constants::NO_CHANGELOG;
use crate::version;
use serde_json::Value;

pub(super) fn build_api_url(owner: &str, repo: &str, target: Option<&str>) -> String {
    let base = format!("https://api.bitbucket.org/2.0/repositories/{owner}/{repo}/refs/tags");
    match target {
        Some(v) => format!("{base}/{v}"),
        None => base,
    }
}

fn archive_url(owner: &str, repo: &str, tag: &str) -> String {
    format!("https://bitbucket.org/{owner}/{repo}/get/{tag}.zip")
}

pub(super) fn parse_release(body: &Value, owner: &str, repo: &str) -> Option<ReleaseData> {
    // List queries wrap the page in "values"; single-tag queries return the
    // tag object bare.
    let tag_obj = match body.get("values") {
        Some(Value::Array(values)) => values.last()?,
        _ => body,
    };

    let tag = tag_obj.get("name")?.as_str()?;
    if tag.is_empty() {
        return None;
    }

    Some(ReleaseData {
        version: version::normalize(tag).to_string(),
        download_url: Some(archive_url(owner, repo, tag)),
        changelog: tag_obj
            .pointer("/target/message")
            .and_then(Value::as_str)
            .unwrap_or(NO_CHANGELOG)
            .to_string(),
        release_date: None,
    })
}
