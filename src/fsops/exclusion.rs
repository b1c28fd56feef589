//! Path exclusion rules.
//!
//! One predicate, three consumers: backup enumeration, tree replacement,
//! and pruning all ask the same [`ExclusionSet`] whether a path is off
//! limits. Whatever is not captured into a backup must also never be
//! overwritten or deleted, so the three call sites share a single set
//! instead of each keeping their own list.

use crate::constants::BUILTIN_EXCLUDES;
use std::path::{Path, PathBuf};

/// Built-in protected prefixes merged with the configured `exclude_items`.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    prefixes: Vec<PathBuf>,
}

impl ExclusionSet {
    /// Merge the built-in set with configured entries. Duplicates collapse.
    pub fn new(configured: &[String]) -> Self {
        let mut prefixes: Vec<PathBuf> = BUILTIN_EXCLUDES.iter().map(PathBuf::from).collect();
        for item in configured {
            let item = item.trim_matches('/');
            if item.is_empty() {
                continue;
            }
            let path = PathBuf::from(item);
            if !prefixes.contains(&path) {
                prefixes.push(path);
            }
        }
        Self { prefixes }
    }

    /// Whether a root-relative path is protected.
    ///
    /// Matching is component-wise: `storage` protects `storage/logs/app.log`
    /// but not `storage-old/file`.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.prefixes.iter().any(|prefix| relative.starts_with(prefix))
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(&[])
    }
}
