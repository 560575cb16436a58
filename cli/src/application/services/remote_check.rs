//! Application service: live credential check.
//!
//! Purely diagnostic: every failure is reported and collapsed to `false`.

use crate::application::ports::{ProgressReporter, RemoteChecker};
use crate::domain::config::AgentConfig;

/// Create a test page with `config`'s credentials.
///
/// Returns `true` if the remote service accepted the request.
pub async fn check(
    checker: &impl RemoteChecker,
    config: &AgentConfig,
    reporter: &impl ProgressReporter,
) -> bool {
    reporter.step("Checking your C2 config against the remote service...");
    match checker
        .create_test_page(&config.api_key, &config.parent_page_id)
        .await
    {
        Ok(()) => {
            reporter.success("C2 check passed! Look for a C2_LINT_TEST page under your listener.");
            true
        }
        Err(e) => {
            reporter.error(&format!("C2 check failed: {e:#}. Check your config file."));
            false
        }
    }
}
