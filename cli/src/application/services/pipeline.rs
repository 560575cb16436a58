//! Application service: the end-to-end build pipeline.
//!
//! preflight → configuration → backup → patch → containerized build →
//! restore → report. Once the templates are backed up they are restored on
//! every path out of this module.

use std::future::Future;
use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::{
    ArtifactTemplate, CommandRunner, ConfigStore, LocalFs, Privileges, ProgressReporter,
    Prompter, RemoteChecker,
};
use crate::application::services::build_driver::BuildDriver;
use crate::application::services::config_service::ConfigSession;
use crate::application::services::templating::{TemplateJob, TemplateLease};
use crate::application::services::{preflight, remote_check};
use crate::domain::build::{BuildParams, BuildSettings};
use crate::domain::layout::ProjectLayout;

/// The two template files a build rewrites.
pub struct Templates<'a> {
    pub agent_source: &'a mut dyn ArtifactTemplate,
    pub build_descriptor: &'a mut dyn ArtifactTemplate,
}

/// Per-invocation inputs of a build.
pub struct BuildRequest<'a> {
    pub layout: &'a ProjectLayout,
    pub settings: &'a BuildSettings,
    pub params: BuildParams,
    /// Run the remote check before confirmation.
    pub lint: bool,
}

/// What a finished pipeline run achieved.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Extracted build output, if the build stage succeeded.
    pub artifact: Option<PathBuf>,
    /// Whether both templates were put back.
    pub restored: bool,
}

impl PipelineOutcome {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.artifact.is_some() && self.restored
    }
}

/// Host collaborators of the pipeline.
pub struct Host<'a, U, C, F, K> {
    pub privileges: &'a U,
    pub runner: &'a C,
    pub fs: &'a F,
    pub checker: &'a K,
}

/// Run the whole build pipeline.
///
/// Build-stage failures (including `interrupt` firing) are reported and end
/// up in the returned outcome rather than as an error.
///
/// # Errors
///
/// Returns an error for preflight failures, configuration I/O failures, and
/// templating failures. Templating failures are returned only after any
/// file already backed up has been restored, and before any container
/// command runs.
pub async fn run_build<S, P, R>(
    host: &Host<'_, impl Privileges, impl CommandRunner, impl LocalFs, impl RemoteChecker>,
    session: &ConfigSession<'_, S, P, R>,
    templates: Templates<'_>,
    request: BuildRequest<'_>,
    interrupt: impl Future<Output = ()>,
) -> Result<PipelineOutcome>
where
    S: ConfigStore,
    P: Prompter,
    R: ProgressReporter,
{
    let reporter = session.reporter;
    let BuildRequest {
        layout,
        settings,
        params,
        lint,
    } = request;

    // 1. Preflight.
    preflight::check_privileges(host.privileges)?;
    reporter.step(&format!("Checking {}...", settings.runtime));
    let version = preflight::check_runtime(host.runner, &settings.runtime).await?;
    reporter.success(&format!("{} is installed ({version})", settings.runtime));

    // 2. Configuration.
    let config = session.load_or_collect()?;
    if lint {
        remote_check::check(host.checker, &config, reporter).await;
    }
    let config = session.confirm_loop(config)?;

    // 3–4. Take ownership of the templates and patch them.
    let Templates {
        agent_source,
        build_descriptor,
    } = templates;
    let mut lease = TemplateLease::acquire(
        vec![
            TemplateJob::new(agent_source, config.substitutions()),
            TemplateJob::new(build_descriptor, params.descriptor_substitutions()),
        ],
        reporter,
    )?;
    if let Err(e) = lease.apply(reporter) {
        reporter.error(&format!("Templating failed: {e:#}"));
        let _ = lease.release(reporter);
        return Err(e);
    }

    // 5. Build.
    let driver = BuildDriver {
        runner: host.runner,
        fs: host.fs,
        settings,
        layout,
    };
    let artifact = match driver.run(reporter, interrupt).await {
        Ok(path) => {
            reporter.success(&format!("Build output copied to {}", path.display()));
            Some(path)
        }
        Err(e) => {
            reporter.error(&format!("Build failed: {e:#}"));
            None
        }
    };

    // 6. Restore, whatever happened above.
    let restored = lease.release(reporter).is_ok();

    // 7. Report.
    let outcome = PipelineOutcome { artifact, restored };
    if outcome.succeeded() {
        reporter.success("Done! Happy hacking!");
    } else if !outcome.restored {
        reporter.error("Templates could not be restored; check the .bak files before the next run.");
    } else {
        reporter.error("Build did not complete. Templates were restored.");
    }
    Ok(outcome)
}

/// Lint-only mode: obtain a configuration and check it remotely.
///
/// Returns whether the remote check passed.
///
/// # Errors
///
/// Returns [`PreflightError::NotPrivileged`](crate::domain::error::PreflightError)
/// before touching the configuration when not running as root, or an error
/// if the configuration cannot be loaded or collected.
pub async fn run_lint<S, P, R>(
    privileges: &impl Privileges,
    checker: &impl RemoteChecker,
    session: &ConfigSession<'_, S, P, R>,
) -> Result<bool>
where
    S: ConfigStore,
    P: Prompter,
    R: ProgressReporter,
{
    preflight::check_privileges(privileges)?;
    let config = session.load_or_collect()?;
    Ok(remote_check::check(checker, &config, session.reporter).await)
}
