//! Lint-only mode: check the configuration remotely, build nothing.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::config_service::ConfigSession;
use crate::application::services::pipeline;
use crate::infra::privileges::HostPrivileges;
use crate::infra::prompt::DialoguerPrompter;
use crate::infra::remote::NotionChecker;

/// Run the remote check; exit code reflects whether it passed.
///
/// # Errors
///
/// Returns an error if no configuration can be loaded or collected.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    app.output
        .info("Lint-only mode: checking the config, nothing will be built.");
    let reporter = app.reporter();
    let store = app.config_store();
    let session = ConfigSession {
        store: &store,
        prompter: &DialoguerPrompter,
        reporter: &reporter,
        non_interactive: app.non_interactive,
    };

    let passed =
        pipeline::run_lint(&HostPrivileges, &NotionChecker::default(), &session).await?;
    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
