//! Custom JSON release endpoint.
//!
//! The configured URL already IS the endpoint: no owner/repo parsing, no URL
//! synthesis. The endpoint must answer with the normalized shape
//! `{version, download_url, changelog, release_date}`. A configured license
//! key is appended as a query parameter so commercial feeds can authorize
//! the request.

use super::ReleaseData;
use crate::constants::NO_CHANGELOG;
use crate::version;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Display format for normalized release dates, e.g. `04 Aug, 2026 09:15:00 am`.
const RELEASE_DATE_FORMAT: &str = "%d %b, %Y %I:%M:%S %P";

pub(super) fn build_api_url(release_url: &str, license_key: Option<&str>) -> String {
    match license_key {
        Some(key) => {
            let sep = if release_url.contains('?') { '&' } else { '?' };
            format!("{release_url}{sep}license_key={key}")
        }
        None => release_url.to_string(),
    }
}

/// A license key is a single printable token: non-empty, no whitespace or
/// control characters.
pub(super) fn is_valid_license_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| !c.is_whitespace() && !c.is_control())
}

pub(super) fn parse_release(body: &Value) -> Option<ReleaseData> {
    let raw_version = body.get("version")?.as_str()?;
    if raw_version.is_empty() {
        return None;
    }

    Some(ReleaseData {
        version: version::normalize(raw_version).to_string(),
        download_url: body
            .get("download_url")
            .and_then(Value::as_str)
            .map(ToString::to_string),
        changelog: body
            .get("changelog")
            .and_then(Value::as_str)
            .unwrap_or(NO_CHANGELOG)
            .to_string(),
        release_date: body
            .get("release_date")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(format_release_date),
    })
}

/// Re-format a timestamp for display when it parses as RFC 3339, a bare
/// datetime, or a bare date; pass anything else through unchanged.
fn format_release_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(RELEASE_DATE_FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format(RELEASE_DATE_FORMAT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.format(RELEASE_DATE_FORMAT).to_string())
            .unwrap_or_else(|| raw.to_string());
    }
    raw.to_string()
}
