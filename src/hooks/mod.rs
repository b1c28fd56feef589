//! Application lifecycle hooks.
//!
//! The orchestrator never calls the hosted application's tooling directly;
//! it talks to a [`LifecycleHooks`] implementation. Production wires in
//! [`CommandHooks`], which shells out to the argv vectors from the
//! configuration (maintenance toggle, migrations, cache clear). Tests
//! substitute [`NoopHooks`] or their own counting/failing doubles.

use crate::config::HookCommands;
use crate::core::UpdaterError;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};

/// The three external touch points of an update, plus the maintenance
/// bracket around them.
#[async_trait]
pub trait LifecycleHooks: Send + Sync {
    /// Put the application into maintenance mode.
    async fn enable_maintenance(&self) -> Result<(), UpdaterError>;
    /// Bring the application back up.
    async fn disable_maintenance(&self) -> Result<(), UpdaterError>;
    /// Run database migrations non-interactively.
    async fn run_migrations(&self) -> Result<(), UpdaterError>;
    /// Clear the application's caches.
    async fn clear_caches(&self) -> Result<(), UpdaterError>;
}

/// Runs the configured hook commands in the application root.
pub struct CommandHooks {
    commands: HookCommands,
    working_dir: PathBuf,
}

impl CommandHooks {
    pub fn new(commands: HookCommands, working_dir: PathBuf) -> Self {
        Self {
            commands,
            working_dir,
        }
    }

    /// Execute one argv vector. An empty vector means the hook is
    /// deliberately unconfigured and succeeds as a no-op.
    async fn run(&self, hook: &str, argv: &[String]) -> Result<(), UpdaterError> {
        let Some((program, args)) = argv.split_first() else {
            debug!(hook, "Hook not configured, skipping");
            return Ok(());
        };

        info!(hook, command = ?argv, "Running lifecycle hook");
        let output = Command::new(program)
            .args(args)
            .current_dir(&self.working_dir)
            .output()
            .await
            .map_err(|e| UpdaterError::HookFailed {
                hook: hook.to_string(),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(UpdaterError::HookFailed {
            hook: hook.to_string(),
            reason: format!("exit status {}: {}", output.status, stderr.trim()),
        })
    }
}

#[async_trait]
impl LifecycleHooks for CommandHooks {
    async fn enable_maintenance(&self) -> Result<(), UpdaterError> {
        self.run("maintenance_on", &self.commands.maintenance_on).await
    }

    async fn disable_maintenance(&self) -> Result<(), UpdaterError> {
        self.run("maintenance_off", &self.commands.maintenance_off).await
    }

    async fn run_migrations(&self) -> Result<(), UpdaterError> {
        self.run("migrate", &self.commands.migrate).await
    }

    async fn clear_caches(&self) -> Result<(), UpdaterError> {
        self.run("clear_caches", &self.commands.clear_caches).await
    }
}

/// Hooks that do nothing, for tests and for installations with no
/// surrounding tooling.
pub struct NoopHooks;

#[async_trait]
impl LifecycleHooks for NoopHooks {
    async fn enable_maintenance(&self) -> Result<(), UpdaterError> {
        Ok(())
    }

    async fn disable_maintenance(&self) -> Result<(), UpdaterError> {
        Ok(())
    }

    async fn run_migrations(&self) -> Result<(), UpdaterError> {
        Ok(())
    }

    async fn clear_caches(&self) -> Result<(), UpdaterError> {
        Ok(())
    }
}
