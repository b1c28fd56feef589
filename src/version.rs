//! Tag normalization and version comparison.
//!
//! Upstream tags arrive in whatever style the repository uses: `v1.2.0`,
//! `1.2`, `2.0.0-beta.1`. Comparison is semver's, but parsing is lenient
//! about missing components so two-part tags (`v1.1`) still order correctly.

use semver::Version;

/// Strip a single leading `v` from a tag. Idempotent: a stripped version
/// passes through unchanged.
pub fn normalize(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Parse a version string, padding missing numeric components so that
/// `"1.1"` becomes `1.1.0`. Returns `None` for strings that are not
/// versions at all.
pub fn parse_lenient(version: &str) -> Option<Version> {
    let version = normalize(version.trim());
    if version.is_empty() {
        return None;
    }
    if let Ok(parsed) = Version::parse(version) {
        return Some(parsed);
    }

    // Pad the core (before any prerelease/build suffix) to three components.
    let suffix_at = version.find(['-', '+']).unwrap_or(version.len());
    let (core, suffix) = version.split_at(suffix_at);
    let mut parts: Vec<&str> = core.split('.').collect();
    while parts.len() < 3 {
        parts.push("0");
    }
    let padded = format!("{}{}", parts.join("."), suffix);
    Version::parse(&padded).ok()
}

/// Whether `latest` is strictly newer than `current`. Unparseable input on
/// either side reports no update rather than guessing.
pub fn is_newer(latest: &str, current: &str) -> bool {
    match (parse_lenient(latest), parse_lenient(current)) {
        (Some(latest), Some(current)) => latest > current,
        _ => false,
    }
}
