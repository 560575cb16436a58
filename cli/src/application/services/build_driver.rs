//! Application service: containerized build.
//!
//! Drives the container runtime through five steps: remove any stale
//! container, build the image from the patched descriptor, start a container,
//! copy the compiled output to the host, and remove the container. The last
//! step always runs.

use std::future::Future;
use std::path::PathBuf;
use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::domain::build::BuildSettings;
use crate::domain::error::BuildError;
use crate::domain::layout::ProjectLayout;

/// Lines of stderr quoted when a step fails.
const STDERR_TAIL_LINES: usize = 15;

pub struct BuildDriver<'a, R, F> {
    pub runner: &'a R,
    pub fs: &'a F,
    pub settings: &'a BuildSettings,
    pub layout: &'a ProjectLayout,
}

impl<R: CommandRunner, F: LocalFs> BuildDriver<'_, R, F> {
    /// Run steps 1–4, racing them against `interrupt`, then tear down.
    ///
    /// Returns the host path of the extracted build output.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error, or [`BuildError::Interrupted`].
    /// Teardown failures are only reported.
    pub async fn run(
        &self,
        reporter: &impl ProgressReporter,
        interrupt: impl Future<Output = ()>,
    ) -> Result<PathBuf> {
        let outcome = tokio::select! {
            result = self.produce(reporter) => result,
            () = interrupt => Err(BuildError::Interrupted.into()),
        };

        reporter.step("Removing temporary container...");
        if let Err(e) = self.teardown().await {
            reporter.warn(&format!("Could not remove container: {e:#}"));
        }
        outcome
    }

    async fn produce(&self, reporter: &impl ProgressReporter) -> Result<PathBuf> {
        self.remove_stale().await?;
        reporter.step("Building the agent image (this can take a while)...");
        self.build_image().await?;
        reporter.step("Starting build container...");
        self.run_container().await?;
        reporter.step("Copying build output to host...");
        self.extract_artifact().await
    }

    /// Force-remove a container left over from an earlier run.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime fails for any reason other than the
    /// container not existing.
    pub async fn remove_stale(&self) -> Result<()> {
        self.remove_container("remove stale container").await
    }

    /// Build the image from the patched descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error on spawn failure, timeout, or non-zero exit.
    pub async fn build_image(&self) -> Result<()> {
        let descriptor = self.layout.build_descriptor();
        let descriptor = descriptor.to_string_lossy();
        let context = self.layout.root().to_string_lossy();
        let args = [
            "build",
            "-t",
            self.settings.image.as_str(),
            "-f",
            &*descriptor,
            &*context,
        ];
        let output = self
            .runner
            .run_with_timeout(&self.settings.runtime, &args, self.settings.build_timeout)
            .await?;
        check("image build", &output)
    }

    /// Start a detached container from the built image.
    ///
    /// # Errors
    ///
    /// Returns an error on spawn failure, timeout, or non-zero exit.
    pub async fn run_container(&self) -> Result<()> {
        let args = [
            "run",
            "--name",
            self.settings.container.as_str(),
            "-dt",
            self.settings.image.as_str(),
        ];
        let output = self.runner.run(&self.settings.runtime, &args).await?;
        check("container start", &output)
    }

    /// Copy the container's output directory into the host output directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy fails or the output is not on the host
    /// afterwards.
    pub async fn extract_artifact(&self) -> Result<PathBuf> {
        let output_dir = self.layout.output_dir();
        self.fs.create_dir_all(&output_dir)?;

        let source = format!(
            "{}:{}",
            self.settings.container, self.settings.container_output
        );
        let dest = output_dir.to_string_lossy();
        let output = self
            .runner
            .run(&self.settings.runtime, &["cp", source.as_str(), &*dest])
            .await?;
        check("artifact copy", &output)?;

        let artifact = self.layout.artifact_dir();
        if !self.fs.exists(&artifact) {
            return Err(BuildError::ArtifactMissing(artifact).into());
        }
        Ok(artifact)
    }

    /// Force-remove the build container.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime fails for any reason other than the
    /// container not existing.
    pub async fn teardown(&self) -> Result<()> {
        self.remove_container("container teardown").await
    }

    async fn remove_container(&self, step: &'static str) -> Result<()> {
        let output = self
            .runner
            .run(
                &self.settings.runtime,
                &["rm", "-f", self.settings.container.as_str()],
            )
            .await
            .with_context(|| format!("{step}: runtime unavailable"))?;
        if output.status.success() || is_not_found(&output) {
            return Ok(());
        }
        check(step, &output)
    }
}

fn is_not_found(output: &Output) -> bool {
    String::from_utf8_lossy(&output.stderr)
        .to_ascii_lowercase()
        .contains("no such container")
}

fn check(step: &'static str, output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    let code = output
        .status
        .code()
        .map_or_else(|| "signal".to_string(), |c| c.to_string());
    Err(BuildError::StepFailed {
        step,
        code,
        detail: stderr_tail(&output.stderr),
    }
    .into())
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return String::new();
    }
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    format!(":\n    {}", lines[start..].join("\n    "))
}
