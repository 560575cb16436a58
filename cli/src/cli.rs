//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use crate::app::{AppContext, AppFlags};
use crate::commands;
use crate::domain::build::{BuildParams, BuildProfile, TargetOs};
use crate::domain::error::PreflightError;
use crate::output::OutputContext;

/// Builds the agent inside a throwaway container. Must be run as root.
#[derive(Parser)]
#[command(name = "stagehand", version, arg_required_else_help = true)]
pub struct Cli {
    /// Target OS
    #[arg(short, long, value_enum, required_unless_present = "lint", requires = "build")]
    pub os: Option<TargetOs>,

    /// Binary build profile
    #[arg(short, long, value_enum, requires = "os")]
    pub build: Option<BuildProfile>,

    /// Check the config by creating a test page on the listener. Without
    /// --os/--build, only the check runs
    #[arg(short = 'c', long)]
    pub lint: bool,

    /// Project directory holding config.json, agent/ and Dockerfile
    #[arg(long, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Image build timeout in seconds
    #[arg(
        long,
        value_name = "SECS",
        env = "STAGEHAND_BUILD_TIMEOUT",
        default_value_t = 1800
    )]
    pub build_timeout: u64,

    /// Accept the shown configuration without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,
}

impl Cli {
    /// Execute the selected mode.
    ///
    /// # Errors
    ///
    /// Returns an error for failures that abort before the build stage.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            os,
            build,
            lint,
            project_dir,
            build_timeout,
            yes,
            quiet,
            no_color,
        } = self;

        let project_root = match project_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("cannot determine current directory")?,
        };
        let app = AppContext::new(AppFlags {
            no_color,
            quiet,
            yes,
            project_root,
            build_timeout: Duration::from_secs(build_timeout),
        });

        let result = match (os, build) {
            (Some(os), Some(profile)) => {
                commands::build::run(&app, BuildParams { os, profile }, lint).await
            }
            _ => commands::lint::run(&app).await,
        };

        report_unprivileged(result, &app.output)
    }
}

/// Map a non-root run to usage help and exit code 1; pass everything else
/// through.
///
/// # Errors
///
/// Returns `result`'s error unless it is [`PreflightError::NotPrivileged`].
pub fn report_unprivileged(result: Result<ExitCode>, output: &OutputContext) -> Result<ExitCode> {
    match result {
        Err(e) if matches!(
            e.downcast_ref::<PreflightError>(),
            Some(PreflightError::NotPrivileged)
        ) =>
        {
            output.error(&e.to_string());
            Cli::command().print_help()?;
            Ok(ExitCode::FAILURE)
        }
        other => other,
    }
}
