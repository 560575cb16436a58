//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{AgentConfig, Substitution, TemplateState};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Host Identity Port ────────────────────────────────────────────────────────

/// Identity of the user running the process.
pub trait Privileges {
    /// Whether the effective user is root.
    fn is_root(&self) -> bool;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Synchronous.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit a failure diagnostic. Never suppressed.
    fn error(&self, message: &str);
    /// Emit an indented key/value line.
    fn detail(&self, key: &str, value: &str);
}

// ── Config Ports ──────────────────────────────────────────────────────────────

/// Persistence of the agent configuration.
pub trait ConfigStore {
    /// Whether a config file is present.
    fn exists(&self) -> bool;
    /// Read and parse the config file.
    fn load(&self) -> Result<AgentConfig>;
    /// Overwrite the config file with `config`.
    fn save(&self, config: &AgentConfig) -> Result<()>;
    /// Location of the config file.
    fn path(&self) -> PathBuf;
}

/// Line-oriented operator input.
pub trait Prompter {
    /// Ask a question and return the raw answer. `default` is shown as a
    /// hint and returned when the operator submits a blank line.
    fn ask(&self, prompt: &str, default: Option<&str>) -> Result<String>;
    /// Ask for a secret without echoing it.
    fn ask_secret(&self, prompt: &str) -> Result<String>;
}

// ── Remote Check Port ─────────────────────────────────────────────────────────

/// Live check of the credentials against the remote service.
#[allow(async_fn_in_trait)]
pub trait RemoteChecker {
    /// Create a throwaway page under `parent_page_id` using `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error describing any transport, status, or auth failure.
    async fn create_test_page(&self, api_key: &str, parent_page_id: &str) -> Result<()>;
}

// ── Template and Filesystem Ports ─────────────────────────────────────────────

/// One template file under backup/patch/restore control.
pub trait ArtifactTemplate {
    /// Path of the live template file.
    fn path(&self) -> &Path;
    /// Current lifecycle state.
    fn state(&self) -> TemplateState;
    /// Copy the original to its sibling backup.
    fn backup(&mut self) -> Result<()>;
    /// Apply substitutions in place.
    fn patch(&mut self, substitutions: &[Substitution]) -> Result<()>;
    /// Move the backup back over the live file.
    fn restore(&mut self) -> Result<()>;
}

/// Minimal host filesystem access needed by the build driver.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
}
