//! Termination signals during the image build still restore both templates.
//!
//! A fake `docker` on `PATH` blocks in `build` so the signal lands while the
//! templates are patched. The root check is real, so these tests only run
//! as root.

#![allow(clippy::expect_used)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

const AGENT_SOURCE: &str = "pub const SLEEP: u64 = <<SLEEP>>;\n\
pub const KEY: &str = \"<<API_KEY>>\";\n\
pub const PAGE: &str = \"<<PARENT_PAGE_ID>>\";\n";

const DOCKERFILE: &str = "FROM rust:latest\nRUN cargo build {OS} {RELEASE}\n";

const CONFIG: &str = r#"{ "SLEEP": 30, "API_KEY": "secret-xyz", "PARENT_PAGE_ID": "page" }"#;

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let root = dir.path();
        std::fs::create_dir_all(root.join("agent/src")).expect("mkdir");
        std::fs::write(root.join("agent/src/config.rs"), AGENT_SOURCE).expect("source");
        std::fs::write(root.join("Dockerfile"), DOCKERFILE).expect("Dockerfile");
        std::fs::write(root.join("config.json"), CONFIG).expect("config");

        let bin = root.join("fake-bin");
        std::fs::create_dir_all(&bin).expect("mkdir fake-bin");
        let script = format!(
            "#!/bin/sh\n\
             case \"$1\" in\n\
             --version) echo 'Docker version 0.0.0' ;;\n\
             build) touch '{}'; exec sleep 30 ;;\n\
             esac\n\
             exit 0\n",
            root.join("build-started").display()
        );
        let docker = bin.join("docker");
        std::fs::write(&docker, script).expect("fake docker");
        std::fs::set_permissions(&docker, std::fs::Permissions::from_mode(0o755))
            .expect("chmod");
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    fn spawn(&self) -> Child {
        let path = format!(
            "{}:{}",
            self.path("fake-bin").display(),
            std::env::var("PATH").unwrap_or_default()
        );
        Command::new(assert_cmd::cargo::cargo_bin!("stagehand"))
            .args(["-o", "linux", "-b", "debug", "-y", "--project-dir"])
            .arg(self.root())
            .env("PATH", path)
            .env("NO_COLOR", "1")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn stagehand")
    }
}

fn wait_for(what: &str, timeout: Duration, mut ready: impl FnMut() -> bool) {
    let deadline = Instant::now() + timeout;
    while !ready() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        std::thread::sleep(Duration::from_millis(50));
    }
}

fn wait_exit(child: &mut Child) -> ExitStatus {
    let mut status = None;
    wait_for("stagehand to exit", Duration::from_secs(20), || {
        status = child.try_wait().expect("try_wait");
        status.is_some()
    });
    status.expect("exit status")
}

fn interrupt_build_with(signal: &str) {
    if !rustix::process::geteuid().is_root() {
        eprintln!("skipping: the build pipeline requires root");
        return;
    }
    let fixture = Fixture::new();
    let mut child = fixture.spawn();

    wait_for("the image build", Duration::from_secs(20), || {
        fixture.path("build-started").exists()
    });
    assert!(
        std::fs::read_to_string(fixture.path("agent/src/config.rs"))
            .expect("read source")
            .contains("secret-xyz")
    );

    let sent = Command::new("kill")
        .args([signal, &child.id().to_string()])
        .status()
        .expect("spawn kill");
    assert!(sent.success());

    let status = wait_exit(&mut child);
    assert_eq!(status.code(), Some(1), "stagehand died from the signal");
    assert_eq!(
        std::fs::read_to_string(fixture.path("agent/src/config.rs")).expect("read source"),
        AGENT_SOURCE
    );
    assert_eq!(
        std::fs::read_to_string(fixture.path("Dockerfile")).expect("read Dockerfile"),
        DOCKERFILE
    );
    assert!(!fixture.path("agent/src/config.rs.bak").exists());
    assert!(!fixture.path("Dockerfile.bak").exists());
}

#[test]
fn test_sigterm_during_build_restores_templates() {
    interrupt_build_with("-TERM");
}

#[test]
fn test_sighup_during_build_restores_templates() {
    interrupt_build_with("-HUP");
}

#[test]
fn test_sigint_during_build_restores_templates() {
    interrupt_build_with("-INT");
}
