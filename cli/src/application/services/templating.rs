//! Application service: scoped ownership of the template files.
//!
//! A `TemplateLease` backs up every file it is given, patches them, and puts
//! the originals back on `release`. If the lease is dropped without being
//! released (early return, panic), `Drop` restores whatever it still holds.

use anyhow::Result;

use crate::application::ports::{ArtifactTemplate, ProgressReporter};
use crate::domain::template::Substitution;

/// One template file and the substitutions destined for it.
pub struct TemplateJob<'a> {
    pub file: &'a mut dyn ArtifactTemplate,
    pub substitutions: Vec<Substitution>,
}

impl<'a> TemplateJob<'a> {
    pub fn new(file: &'a mut dyn ArtifactTemplate, substitutions: Vec<Substitution>) -> Self {
        Self {
            file,
            substitutions,
        }
    }
}

/// Exclusive hold on a set of template files for one pipeline run.
pub struct TemplateLease<'a> {
    jobs: Vec<TemplateJob<'a>>,
    released: bool,
}

impl<'a> TemplateLease<'a> {
    /// Back up every file, in order.
    ///
    /// If any backup fails, the files already backed up are restored before
    /// the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the first backup error.
    pub fn acquire(jobs: Vec<TemplateJob<'a>>, reporter: &impl ProgressReporter) -> Result<Self> {
        let mut lease = Self {
            jobs: Vec::with_capacity(jobs.len()),
            released: false,
        };
        for job in jobs {
            reporter.step(&format!("Backing up {}", job.file.path().display()));
            if let Err(e) = job.file.backup() {
                // Rollback failures are reported by release itself.
                let _ = lease.release(reporter);
                return Err(e);
            }
            lease.jobs.push(job);
        }
        Ok(lease)
    }

    /// Patch every held file with its substitutions.
    ///
    /// # Errors
    ///
    /// Returns the first patch error; files stay held so the caller can
    /// release them.
    pub fn apply(&mut self, reporter: &impl ProgressReporter) -> Result<()> {
        for job in &mut self.jobs {
            reporter.step(&format!("Setting variables in {}", job.file.path().display()));
            job.file.patch(&job.substitutions)?;
        }
        Ok(())
    }

    /// Restore every held file, reporting each failure.
    ///
    /// All files are attempted even if one fails.
    ///
    /// # Errors
    ///
    /// Returns an error naming the files that could not be restored.
    pub fn release(mut self, reporter: &impl ProgressReporter) -> Result<()> {
        self.released = true;
        let mut failed = Vec::new();
        for job in &mut self.jobs {
            if !job.file.state().holds_backup() {
                continue;
            }
            reporter.step(&format!("Recovering original {}", job.file.path().display()));
            if let Err(e) = job.file.restore() {
                reporter.error(&format!("{e:#}"));
                failed.push(job.file.path().display().to_string());
            }
        }
        if failed.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("could not restore: {}", failed.join(", "))
        }
    }
}

impl Drop for TemplateLease<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        for job in &mut self.jobs {
            if !job.file.state().holds_backup() {
                continue;
            }
            if let Err(e) = job.file.restore() {
                eprintln!("  ✗ {e:#}");
            }
        }
    }
}
