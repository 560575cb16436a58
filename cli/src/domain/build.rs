//! Build parameters and container settings.

use std::time::Duration;

use crate::domain::template::Substitution;

/// Cross-compilation flag passed to cargo for Windows targets.
pub const WINDOWS_TARGET_FLAG: &str = "--target x86_64-pc-windows-gnu";
/// Cargo flag selecting the release profile.
pub const RELEASE_FLAG: &str = "--release";

/// Target operating system of the agent binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TargetOs {
    Linux,
    Windows,
}

/// Cargo build profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BuildProfile {
    Debug,
    Release,
}

/// Per-invocation build parameters. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildParams {
    pub os: TargetOs,
    pub profile: BuildProfile,
}

impl BuildParams {
    /// Substitutions for the `{OS}` and `{RELEASE}` descriptor tokens.
    #[must_use]
    pub fn descriptor_substitutions(&self) -> Vec<Substitution> {
        let os = match self.os {
            TargetOs::Linux => "",
            TargetOs::Windows => WINDOWS_TARGET_FLAG,
        };
        let release = match self.profile {
            BuildProfile::Debug => "",
            BuildProfile::Release => RELEASE_FLAG,
        };
        vec![
            Substitution::descriptor("OS", os),
            Substitution::descriptor("RELEASE", release),
        ]
    }
}

/// Default image build timeout (30 minutes).
pub const DEFAULT_BUILD_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Container runtime settings for a run.
#[derive(Debug, Clone)]
pub struct BuildSettings {
    /// Runtime executable, e.g. `docker`.
    pub runtime: String,
    /// Tag given to the built image.
    pub image: String,
    /// Name of the throwaway container.
    pub container: String,
    /// Directory inside the container holding the compiled output.
    pub container_output: String,
    /// Timeout for `build`.
    pub build_timeout: Duration,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            runtime: "docker".to_string(),
            image: "stagehand-agent".to_string(),
            container: "stagehand-agent".to_string(),
            container_output: "/opt/agent/target".to_string(),
            build_timeout: DEFAULT_BUILD_TIMEOUT,
        }
    }
}
