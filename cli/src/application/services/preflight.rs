//! Application service: host checks run before anything is modified.

use anyhow::Result;

use crate::application::ports::{CommandRunner, Privileges};
use crate::domain::error::PreflightError;

/// Require an effective uid of 0.
///
/// # Errors
///
/// Returns [`PreflightError::NotPrivileged`] if the process is not running
/// as root.
pub fn check_privileges(privileges: &impl Privileges) -> Result<()> {
    if privileges.is_root() {
        Ok(())
    } else {
        Err(PreflightError::NotPrivileged.into())
    }
}

/// Require the container runtime to answer `--version`.
///
/// Returns the reported version line.
///
/// # Errors
///
/// Returns [`PreflightError::RuntimeMissing`] if the runtime cannot be
/// spawned or exits non-zero.
pub async fn check_runtime(runner: &impl CommandRunner, runtime: &str) -> Result<String> {
    match runner.run(runtime, &["--version"]).await {
        Ok(output) if output.status.success() => {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        _ => Err(PreflightError::RuntimeMissing {
            runtime: runtime.to_string(),
        }
        .into()),
    }
}
