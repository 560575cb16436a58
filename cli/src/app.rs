//! Application context: unified state passed to every command handler.
//!
//! Everything that used to be ambient process state (working directory,
//! fixed file paths, runtime name) is resolved once here at startup.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::build::BuildSettings;
use crate::domain::layout::ProjectLayout;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::JsonConfigStore;
use crate::output::{OutputContext, TerminalReporter};

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Skip interactive confirmation (also set by `CI` / `STAGEHAND_YES`).
    pub yes: bool,
    /// Project root holding `config.json`, `agent/`, and `Dockerfile`.
    pub project_root: PathBuf,
    /// Timeout for the image build step.
    pub build_timeout: Duration,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Project file locations.
    pub layout: ProjectLayout,
    /// Container runtime settings.
    pub settings: BuildSettings,
    /// Subprocess runner used for every external command.
    pub runner: TokioCommandRunner,
    /// When `true`, accept the default at every confirmation.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: AppFlags) -> Self {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("STAGEHAND_YES").is_ok();
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            layout: ProjectLayout::new(flags.project_root),
            settings: BuildSettings {
                build_timeout: flags.build_timeout,
                ..BuildSettings::default()
            },
            runner: TokioCommandRunner::default(),
            non_interactive: flags.yes || ci_env,
        }
    }

    /// Reporter writing to this context's terminal output.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Config store for this project.
    #[must_use]
    pub fn config_store(&self) -> JsonConfigStore {
        JsonConfigStore::new(self.layout.config_file())
    }
}
