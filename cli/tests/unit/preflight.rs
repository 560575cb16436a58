//! Privilege and runtime checks.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use stagehand_cli::application::services::preflight::{check_privileges, check_runtime};
use stagehand_cli::domain::error::PreflightError;

use crate::mocks::{Reply, ScriptedRunner, StubPrivileges, err_output, ok_output};

#[test]
fn test_root_passes() {
    check_privileges(&StubPrivileges::root()).expect("root");
}

#[test]
fn test_non_root_fails() {
    let err = check_privileges(&StubPrivileges::unprivileged()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PreflightError>(),
        Some(PreflightError::NotPrivileged)
    ));
}

#[tokio::test]
async fn test_runtime_present_returns_version() {
    let runner = ScriptedRunner::new(|_| {
        Reply::Output(ok_output(b"Docker version 27.1.1, build 6312585\n"))
    });
    let version = check_runtime(&runner, "docker").await.expect("runtime");
    assert_eq!(version, "Docker version 27.1.1, build 6312585");
    assert_eq!(runner.calls(), vec!["docker --version".to_string()]);
}

#[tokio::test]
async fn test_runtime_not_installed() {
    let runner = ScriptedRunner::new(|_| Reply::SpawnError);
    let err = check_runtime(&runner, "docker").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PreflightError>(),
        Some(PreflightError::RuntimeMissing { runtime }) if runtime == "docker"
    ));
}

#[tokio::test]
async fn test_runtime_nonzero_exit() {
    let runner = ScriptedRunner::new(|_| Reply::Output(err_output(127, b"not found")));
    assert!(check_runtime(&runner, "docker").await.is_err());
}
