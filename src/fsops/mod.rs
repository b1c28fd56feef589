//! Filesystem primitives for the update pipeline.
//!
//! [`FileService`] owns every tree operation the updater performs:
//! enumerating files for backup, extracting a release archive, mirroring the
//! extracted tree onto the installation root, pruning files the new release
//! no longer ships, and best-effort cleanup of staging paths.
//!
//! All of it funnels through one [`ExclusionSet`]: a path protected from
//! backup capture is equally protected from overwrite during replacement and
//! from deletion during pruning. Breaking that symmetry is the most
//! dangerous bug this subsystem can have (imagine pruning a live database
//! file because it never appeared in the release archive).

mod exclusion;

pub use exclusion::ExclusionSet;

use crate::config::UpdaterConfig;
use crate::constants::CRITICAL_DIRECTORIES;
use crate::core::UpdaterError;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Filesystem operations with shared exclusion rules.
pub struct FileService {
    exclusions: ExclusionSet,
    critical_dirs: Vec<PathBuf>,
}

impl FileService {
    pub fn new(config: &UpdaterConfig) -> Self {
        Self::with_exclusions(ExclusionSet::new(&config.exclude_items))
    }

    pub fn with_exclusions(exclusions: ExclusionSet) -> Self {
        Self {
            exclusions,
            critical_dirs: CRITICAL_DIRECTORIES.iter().map(PathBuf::from).collect(),
        }
    }

    /// The predicate shared by backup, replace, and prune.
    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Enumerate the files a backup must capture: every regular file under
    /// `root` whose root-relative path is not excluded. Directories are not
    /// listed; they are implied by their files.
    pub fn files_to_backup(
        &self,
        root: &Path,
    ) -> Result<Vec<(PathBuf, PathBuf)>, UpdaterError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).min_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_path_buf();
            if self.exclusions.is_excluded(&relative) {
                continue;
            }
            files.push((entry.path().to_path_buf(), relative));
        }
        Ok(files)
    }

    /// Extract a zip archive under `dest` and return the single top-level
    /// directory it produced.
    ///
    /// Release archives from every supported upstream wrap their contents in
    /// one `{repo}-{ref}` directory; an archive that yields none is
    /// rejected.
    pub fn extract_archive(&self, archive: &Path, dest: &Path) -> Result<PathBuf, UpdaterError> {
        let file = fs::File::open(archive).map_err(|e| UpdaterError::ExtractionFailed {
            reason: format!("cannot open {}: {e}", archive.display()),
        })?;
        let mut zip = zip::ZipArchive::new(file).map_err(|e| UpdaterError::ExtractionFailed {
            reason: format!("cannot read {}: {e}", archive.display()),
        })?;

        fs::create_dir_all(dest)?;
        zip.extract(dest).map_err(|e| UpdaterError::ExtractionFailed {
            reason: format!("cannot extract {}: {e}", archive.display()),
        })?;

        let extracted = fs::read_dir(dest)?
            .filter_map(Result::ok)
            .find(|entry| entry.path().is_dir())
            .map(|entry| entry.path())
            .ok_or_else(|| UpdaterError::ExtractionFailed {
                reason: "archive produced no top-level directory".to_string(),
            })?;

        debug!(dir = %extracted.display(), "Archive extracted");
        Ok(extracted)
    }

    /// Mirror `source` onto `dest`: create directories, copy files with
    /// overwrite, include dotfiles, and leave excluded destination paths
    /// untouched.
    pub fn replace_tree(&self, source: &Path, dest: &Path) -> Result<(), UpdaterError> {
        for entry in WalkDir::new(source).min_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
            if self.exclusions.is_excluded(relative) {
                continue;
            }

            let target = dest.join(relative);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
            } else if entry.file_type().is_file() {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(entry.path(), &target)?;
            }
            // Symlinks in release archives are not mirrored
        }
        Ok(())
    }

    /// Delete destination files that no longer exist in `source`, then sweep
    /// out directories the deletions left empty.
    ///
    /// Excluded paths are never deleted, and the configured critical
    /// directories survive the empty-directory sweep no matter what.
    pub fn prune_removed(&self, source: &Path, dest: &Path) -> Result<(), UpdaterError> {
        let source_files = self.relative_files(source)?;
        let dest_files = self.relative_files(dest)?;

        for relative in dest_files.difference(&source_files) {
            if self.exclusions.is_excluded(relative) {
                continue;
            }
            let path = dest.join(relative);
            if path.exists() {
                fs::remove_file(&path)?;
                debug!(path = %path.display(), "Pruned removed file");
            }
        }

        self.remove_empty_directories(dest);
        Ok(())
    }

    /// Remove a file or a whole directory. No-op when the path is absent.
    pub fn remove_path(&self, path: &Path) -> Result<(), UpdaterError> {
        if path.is_dir() {
            fs::remove_dir_all(path)?;
        } else if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Best-effort delete over a list of paths. Individual failures are
    /// logged and do not stop the batch.
    pub fn cleanup(&self, paths: &[PathBuf]) {
        for path in paths {
            if let Err(e) = self.remove_path(path) {
                warn!(path = %path.display(), error = %e, "Failed to delete during cleanup");
            }
        }
    }

    /// Every regular file under `root`, as root-relative paths. No
    /// exclusion filtering; callers filter at the decision point.
    fn relative_files(&self, root: &Path) -> Result<BTreeSet<PathBuf>, UpdaterError> {
        let mut files = BTreeSet::new();
        for entry in WalkDir::new(root).min_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() {
                files.insert(
                    entry
                        .path()
                        .strip_prefix(root)
                        .unwrap_or(entry.path())
                        .to_path_buf(),
                );
            }
        }
        Ok(files)
    }

    /// Child-first sweep deleting directories left empty by pruning.
    /// Critical directories and excluded paths are skipped. Failures are
    /// warnings, not errors: a directory that refuses to go is not worth
    /// failing the update over.
    fn remove_empty_directories(&self, root: &Path) {
        for entry in WalkDir::new(root)
            .min_depth(1)
            .contents_first(true)
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_dir() {
                continue;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if self.exclusions.is_excluded(relative)
                || self.critical_dirs.iter().any(|c| relative == c)
            {
                continue;
            }

            match fs::read_dir(entry.path()) {
                Ok(mut contents) => {
                    if contents.next().is_none() {
                        if let Err(e) = fs::remove_dir(entry.path()) {
                            warn!(dir = %entry.path().display(), error = %e, "Failed to remove empty directory");
                        } else {
                            debug!(dir = %entry.path().display(), "Removed empty directory");
                        }
                    }
                }
                Err(e) => {
                    warn!(dir = %entry.path().display(), error = %e, "Could not inspect directory");
                }
            }
        }
    }
}
