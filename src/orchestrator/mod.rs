//! The update state machine.
//!
//! [`UpdateOrchestrator::process_update`] sequences every service in this
//! crate into one attempt:
//!
//! ```text
//! Idle -> MaintenanceOn -> BackedUp -> FilesReplaced -> MigrationsRun
//!      -> CacheCleared -> DependenciesInstalled -> CleanedUp
//!      -> MaintenanceOff (success)
//! ```
//!
//! with a rollback path reachable from every state after `BackedUp`. Three
//! ordering rules are load-bearing and must survive any refactor:
//!
//! 1. The backup exists before any destructive file operation. A backup
//!    failure aborts with nothing to undo.
//! 2. On failure, rollback runs before the original error is re-raised, so
//!    a failed update never leaves the installation half-replaced. A
//!    rollback failure propagates instead of being swallowed.
//! 3. Maintenance mode is lifted exactly once per attempt, on every path,
//!    even when rollback itself failed.
//!
//! There is no update-in-flight lock: the staging archive and directory
//! names are fixed, so overlapping invocations collide. One operator, one
//! update at a time.

use crate::backup::BackupService;
use crate::composer::ComposerService;
use crate::config::UpdaterConfig;
use crate::constants::{UPDATE_ARCHIVE_PATH, UPDATE_STAGING_DIR};
use crate::core::UpdaterError;
use crate::download::DownloadService;
use crate::fsops::FileService;
use crate::hooks::LifecycleHooks;
use crate::release::ReleaseData;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Sequences backup, download, file replacement, hooks, and rollback.
pub struct UpdateOrchestrator {
    files: Arc<FileService>,
    backup: BackupService,
    download: DownloadService,
    composer: ComposerService,
    hooks: Arc<dyn LifecycleHooks>,
    app_root: PathBuf,
    require_dependency_install: bool,
    require_dependency_update: bool,
}

impl UpdateOrchestrator {
    pub fn new(config: &UpdaterConfig, hooks: Arc<dyn LifecycleHooks>) -> Self {
        let app_root = config.app_root();
        let files = Arc::new(FileService::new(config));
        Self {
            backup: BackupService::new(Arc::clone(&files), app_root.clone()),
            download: DownloadService::new(config.timeout()),
            composer: ComposerService::new(app_root.clone()),
            files,
            hooks,
            app_root,
            require_dependency_install: config.require_dependency_install,
            require_dependency_update: config.require_dependency_update,
        }
    }

    /// Run the full update attempt for an already-selected release.
    ///
    /// # Errors
    ///
    /// The original pipeline error after a completed rollback, the rollback
    /// error when rolling back itself failed, or the backup error when the
    /// attempt never got far enough to need recovery.
    pub async fn process_update(&self, release: &ReleaseData) -> Result<(), UpdaterError> {
        self.enable_maintenance().await;
        let outcome = self.run_update(release).await;
        self.disable_maintenance().await;
        outcome
    }

    async fn run_update(&self, release: &ReleaseData) -> Result<(), UpdaterError> {
        // Backup failure aborts immediately: nothing destructive has
        // happened yet, so there is nothing to roll back.
        let handle = self.backup.backup()?;
        println!("{}", "Backup completed successfully.".green());

        match self.apply_update(release).await {
            Ok(()) => {
                self.files.cleanup(&[handle.dir().to_path_buf()]);
                info!("Update completed successfully");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Update failed");
                eprintln!("{}", format!("Update failed: {e}").red());

                println!("{}", "Rolling back to previous version...".yellow());
                self.backup.rollback(&handle)?;
                println!("{}", "Rollback completed.".green());

                // Re-raise the original failure after recovery
                Err(e)
            }
        }
    }

    async fn apply_update(&self, release: &ReleaseData) -> Result<(), UpdaterError> {
        self.update_project_files(release).await?;

        println!("{}", "Running migrations...".cyan());
        self.hooks.run_migrations().await?;
        println!("Migrations completed.");

        println!("{}", "Clearing cache...".cyan());
        self.hooks.clear_caches().await?;
        println!("Cache cleared.");

        self.install_dependencies().await?;
        Ok(())
    }

    async fn update_project_files(&self, release: &ReleaseData) -> Result<(), UpdaterError> {
        let url = release
            .download_url
            .as_deref()
            .ok_or(UpdaterError::NoUpdateAvailable)?;

        let archive = self.app_root.join(UPDATE_ARCHIVE_PATH);
        let staging = self.app_root.join(UPDATE_STAGING_DIR);

        self.download.download(url, &archive).await?;
        let extracted = self.files.extract_archive(&archive, &staging)?;
        self.files.replace_tree(&extracted, &self.app_root)?;
        self.files.prune_removed(&extracted, &self.app_root)?;
        self.files.cleanup(&[archive, staging]);

        println!("{}", "Files updated successfully.".green());
        Ok(())
    }

    async fn install_dependencies(&self) -> Result<(), UpdaterError> {
        if !self.require_dependency_install && !self.require_dependency_update {
            info!("Dependency install and update disabled by configuration");
            println!("Skipping composer install/update.");
            return Ok(());
        }

        // Composer keeps its own cache; clearing it is worth trying but
        // never worth failing the update over.
        if let Err(e) = self.composer.clear_cache().await {
            warn!(error = %e, "Composer cache clear failed");
        }

        if self.require_dependency_install {
            println!("{}", "Running composer install...".cyan());
            self.composer.run_install().await?;
            println!("Composer install completed.");
        }

        if self.require_dependency_update {
            println!("{}", "Running composer update...".cyan());
            self.composer.run_update().await?;
            println!("Composer update completed.");
        }

        Ok(())
    }

    async fn enable_maintenance(&self) {
        match self.hooks.enable_maintenance().await {
            Ok(()) => println!("Maintenance mode enabled."),
            Err(e) => {
                // Best effort: a missing maintenance toggle must not block
                // the update itself.
                warn!(error = %e, "Could not enable maintenance mode");
                println!("{}", format!("Could not enable maintenance mode: {e}").yellow());
            }
        }
    }

    async fn disable_maintenance(&self) {
        match self.hooks.disable_maintenance().await {
            Ok(()) => println!("Maintenance mode disabled."),
            Err(e) => {
                warn!(error = %e, "Could not disable maintenance mode");
                eprintln!("{}", format!("Could not disable maintenance mode: {e}").red());
            }
        }
    }
}
