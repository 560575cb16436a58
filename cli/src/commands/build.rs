//! Build mode: run the full pipeline.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::config_service::ConfigSession;
use crate::application::services::pipeline::{self, BuildRequest, Host, Templates};
use crate::domain::build::BuildParams;
use crate::infra::fs::HostFs;
use crate::infra::privileges::HostPrivileges;
use crate::infra::prompt::DialoguerPrompter;
use crate::infra::remote::NotionChecker;
use crate::infra::signal::shutdown_signal;
use crate::infra::template::TemplateFile;

/// Run the build pipeline and map its outcome to an exit code.
///
/// # Errors
///
/// Returns an error for preflight, configuration, or templating failures.
pub async fn run(app: &AppContext, params: BuildParams, lint: bool) -> Result<ExitCode> {
    let reporter = app.reporter();
    let store = app.config_store();
    let session = ConfigSession {
        store: &store,
        prompter: &DialoguerPrompter,
        reporter: &reporter,
        non_interactive: app.non_interactive,
    };
    let checker = NotionChecker::default();
    let host = Host {
        privileges: &HostPrivileges,
        runner: &app.runner,
        fs: &HostFs,
        checker: &checker,
    };

    let mut agent_source = TemplateFile::new(app.layout.agent_source());
    let mut build_descriptor = TemplateFile::new(app.layout.build_descriptor());
    let templates = Templates {
        agent_source: &mut agent_source,
        build_descriptor: &mut build_descriptor,
    };
    let request = BuildRequest {
        layout: &app.layout,
        settings: &app.settings,
        params,
        lint,
    };

    let outcome =
        pipeline::run_build(&host, &session, templates, request, shutdown_signal()).await?;
    Ok(if outcome.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
