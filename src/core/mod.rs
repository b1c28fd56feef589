//! Core types shared across the updater.
//!
//! Currently this is the error taxonomy. Every service raises the typed
//! [`UpdaterError`]; only the orchestrator and the CLI decide what is fatal,
//! what is informational, and what triggers a rollback.

pub mod error;

pub use error::UpdaterError;
