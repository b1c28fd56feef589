//! Snapshot and rollback.
//!
//! Before any destructive step the updater zips every non-excluded file
//! into a timestamped directory under `storage/app/backup/`. The resulting
//! [`BackupHandle`] is the only way to roll back: on failure the archive is
//! extracted to a staging directory and mirrored over the installation root
//! with the same tree-replace operation the update itself uses, so the
//! exclusion rules hold in both directions.
//!
//! The snapshot lives exactly as long as the update attempt: consumed by
//! rollback on failure, deleted on success.

use crate::constants::{BACKUP_ARCHIVE_NAME, BACKUP_ROOT, ROLLBACK_STAGING_DIR};
use crate::core::UpdaterError;
use crate::fsops::FileService;
use crate::utils::fs::format_bytes;
use crate::utils::progress::ProgressBar;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;

/// Opaque reference to one point-in-time snapshot, consumable by rollback.
#[derive(Debug, Clone)]
pub struct BackupHandle {
    dir: PathBuf,
}

impl BackupHandle {
    /// The timestamped directory holding this snapshot.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The snapshot archive inside the backup directory.
    pub fn archive_path(&self) -> PathBuf {
        self.dir.join(BACKUP_ARCHIVE_NAME)
    }

    /// Whether the snapshot archive is still on disk.
    pub fn exists(&self) -> bool {
        self.archive_path().exists()
    }
}

/// Creates snapshots of the installation and restores them on failure.
pub struct BackupService {
    files: Arc<FileService>,
    app_root: PathBuf,
}

impl BackupService {
    pub fn new(files: Arc<FileService>, app_root: PathBuf) -> Self {
        Self { files, app_root }
    }

    /// Snapshot every backup-eligible file into a timestamped zip archive.
    ///
    /// # Errors
    ///
    /// [`UpdaterError::BackupFailed`] when the archive cannot be created or
    /// a file cannot be read into it.
    pub fn backup(&self) -> Result<BackupHandle, UpdaterError> {
        let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
        let handle = BackupHandle {
            dir: self.app_root.join(BACKUP_ROOT).join(timestamp.to_string()),
        };

        fs::create_dir_all(handle.dir()).map_err(|e| UpdaterError::BackupFailed {
            reason: format!("cannot create {}: {e}", handle.dir().display()),
        })?;

        info!("Starting backup process");
        let files = self.files.files_to_backup(&self.app_root)?;
        let archive_path = handle.archive_path();

        self.write_archive(&archive_path, &files)
            .map_err(|reason| UpdaterError::BackupFailed { reason })?;

        let archive_size = fs::metadata(&archive_path).map(|m| m.len()).unwrap_or(0);
        info!(
            archive = %archive_path.display(),
            size = %format_bytes(archive_size),
            files = files.len(),
            "Backup completed"
        );

        Ok(handle)
    }

    /// Restore the installation root from a snapshot.
    ///
    /// # Errors
    ///
    /// [`UpdaterError::BackupNotFound`] when the snapshot archive is gone;
    /// [`UpdaterError::ExtractionFailed`] when it cannot be read back.
    pub fn rollback(&self, handle: &BackupHandle) -> Result<(), UpdaterError> {
        let archive_path = handle.archive_path();
        if !archive_path.exists() {
            return Err(UpdaterError::BackupNotFound {
                path: archive_path.display().to_string(),
            });
        }

        info!(archive = %archive_path.display(), "Rolling back to backup");

        let file = fs::File::open(&archive_path).map_err(|e| UpdaterError::ExtractionFailed {
            reason: format!("cannot open {}: {e}", archive_path.display()),
        })?;
        let mut zip =
            zip::ZipArchive::new(file).map_err(|e| UpdaterError::ExtractionFailed {
                reason: format!("cannot read {}: {e}", archive_path.display()),
            })?;

        // The snapshot archive is flat (no wrapper directory), so extract to
        // staging and mirror it back with the usual exclusion rules.
        let staging = self.app_root.join(ROLLBACK_STAGING_DIR);
        fs::create_dir_all(&staging)?;
        zip.extract(&staging).map_err(|e| UpdaterError::ExtractionFailed {
            reason: format!("cannot extract {}: {e}", archive_path.display()),
        })?;

        // Restore captured files, then drop whatever the failed update
        // added, so the tree round-trips to its pre-update state. Excluded
        // paths are protected on both sides.
        let result = self
            .files
            .replace_tree(&staging, &self.app_root)
            .and_then(|()| self.files.prune_removed(&staging, &self.app_root));
        if let Err(e) = self.files.remove_path(&staging) {
            warn!(staging = %staging.display(), error = %e, "Failed to remove rollback staging dir");
        }
        result?;

        info!("Rollback completed");
        Ok(())
    }

    fn write_archive(
        &self,
        archive_path: &Path,
        files: &[(PathBuf, PathBuf)],
    ) -> Result<(), String> {
        let file = fs::File::create(archive_path)
            .map_err(|e| format!("cannot create zip file {}: {e}", archive_path.display()))?;
        let mut zip = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_prefix("Backing up");

        for (absolute, relative) in files {
            let entry_name = zip_entry_name(relative);
            zip.start_file(&entry_name, options)
                .map_err(|e| format!("cannot add {entry_name}: {e}"))?;
            let mut source = fs::File::open(absolute)
                .map_err(|e| format!("cannot read {}: {e}", absolute.display()))?;
            std::io::copy(&mut source, &mut zip)
                .map_err(|e| format!("cannot write {entry_name}: {e}"))?;
            progress.inc(1);
        }

        zip.finish().map_err(|e| format!("cannot finalize archive: {e}"))?;
        progress.finish_and_clear();
        debug!(archive = %archive_path.display(), "Snapshot archive written");
        Ok(())
    }
}

/// Zip entry names always use forward slashes, whatever the host separator.
fn zip_entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
