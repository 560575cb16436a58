//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Preflight errors ──────────────────────────────────────────────────────────

/// Host checks that must pass before anything on disk is touched.
#[derive(Debug, Error)]
pub enum PreflightError {
    #[error("You need to run stagehand as root (the container runtime requires it).")]
    NotPrivileged,

    #[error(
        "Container runtime '{runtime}' is not available. Install it first (on Debian/Ubuntu: sudo apt-get install docker.io -y)."
    )]
    RuntimeMissing { runtime: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to the persisted agent configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file {path} is malformed: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("No usable config file and prompts are disabled. Create {0} or drop --yes.")]
    NonInteractive(PathBuf),
}

// ── Template errors ───────────────────────────────────────────────────────────

/// Errors raised while backing up, patching, or restoring a template file.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template {0} does not exist.")]
    SourceMissing(PathBuf),

    #[error(
        "Backup {0} already exists. A previous run may have been killed mid-build: inspect it and move it back over the original before retrying."
    )]
    BackupExists(PathBuf),

    #[error("Template {0} must be backed up before it is patched.")]
    NotBackedUp(PathBuf),

    #[error("No backup found at {0}; cannot restore.")]
    NoBackup(PathBuf),
}

// ── Build errors ──────────────────────────────────────────────────────────────

/// Failures of the containerized build stage.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{step} failed (exit {code}){detail}")]
    StepFailed {
        step: &'static str,
        code: String,
        detail: String,
    },

    #[error("Build output was not found at {0} after copying it out of the container.")]
    ArtifactMissing(PathBuf),

    #[error("Build interrupted.")]
    Interrupted,
}
