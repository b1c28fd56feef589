//! appup - application self-updater
//!
//! appup keeps a deployed application current by polling a VCS-hosted release
//! feed (GitHub, GitLab, Bitbucket, or a custom JSON endpoint), and on demand
//! downloading the latest release archive, backing up the current
//! installation, swapping the application files in place, running the
//! configured lifecycle hooks, and rolling the whole thing back if any step
//! fails.
//!
//! # Architecture Overview
//!
//! The update pipeline is a fixed sequence of fallible steps owned by
//! [`orchestrator::UpdateOrchestrator`]:
//!
//! ```text
//! 1. Maintenance on        (best effort, external hook)
//! 2. Backup                (zip snapshot of the non-excluded tree)
//! 3. Download + extract    (release archive into a staging dir)
//! 4. Replace + prune       (mirror staging onto the install root)
//! 5. Migrations            (external hook)
//! 6. Cache clear           (external hook)
//! 7. Dependency install    (optional, config-gated)
//! 8. Delete backup         (success path only)
//!    -- on any failure after 2: roll back from the snapshot, re-raise
//! 9. Maintenance off       (always, success or failure)
//! ```
//!
//! Release metadata from the heterogeneous upstream APIs is normalized into a
//! single [`release::ReleaseData`] shape by [`release::ReleaseProvider`], a
//! closed set of provider kinds selected from the repository URL by
//! [`release::ProviderRegistry`].
//!
//! # Core Modules
//!
//! - [`cli`] - command-line interface (`check`, `update`)
//! - [`config`] - TOML configuration (`~/.appup/config.toml`)
//! - [`core`] - error taxonomy shared by every service
//! - [`release`] - providers, registry, release metadata, version manifest
//! - [`fsops`] - tree walking, extraction, replace/prune with exclusions
//! - [`backup`] - snapshot creation and rollback
//! - [`download`] - bounded-timeout archive download
//! - [`composer`] - dependency manager invocation and failure classification
//! - [`hooks`] - injected maintenance/migration/cache lifecycle commands
//! - [`orchestrator`] - the update state machine
//! - [`version`] - tag normalization and lenient semver comparison
//!
//! # Safety Model
//!
//! A backup snapshot is created before any destructive file operation, the
//! same exclusion rules protect a path from capture, overwrite, and deletion
//! alike, and maintenance mode is lifted exactly once per update attempt no
//! matter how the attempt ends. One update at a time: staging and backup
//! paths are fixed, so overlapping invocations are not supported.

pub mod backup;
pub mod cli;
pub mod composer;
pub mod config;
pub mod constants;
pub mod core;
pub mod download;
pub mod fsops;
pub mod hooks;
pub mod orchestrator;
pub mod release;
pub mod utils;
pub mod version;
