//! Filesystem implementation of the `ArtifactTemplate` port.
//!
//! A `TemplateFile` owns one file for the duration of a run: it copies the
//! original to `<file>.bak`, rewrites the original in place, and finally moves
//! the backup back over it.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ArtifactTemplate;
use crate::domain::error::TemplateError;
use crate::domain::layout::backup_path;
use crate::domain::template::{Substitution, TemplateState, substitute};

pub struct TemplateFile {
    path: PathBuf,
    backup: PathBuf,
    state: TemplateState,
}

impl TemplateFile {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        let backup = backup_path(&path);
        Self {
            path,
            backup,
            state: TemplateState::Pristine,
        }
    }

    /// Sibling path the original is copied to.
    #[must_use]
    pub fn backup_path(&self) -> &Path {
        &self.backup
    }
}

impl ArtifactTemplate for TemplateFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn state(&self) -> TemplateState {
        self.state
    }

    fn backup(&mut self) -> Result<()> {
        if !self.path.is_file() {
            return Err(TemplateError::SourceMissing(self.path.clone()).into());
        }
        // Claim the backup path first so an existing backup is never overwritten.
        match OpenOptions::new().write(true).create_new(true).open(&self.backup) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(TemplateError::BackupExists(self.backup.clone()).into());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("creating backup {}", self.backup.display()));
            }
        }
        if let Err(e) = std::fs::copy(&self.path, &self.backup) {
            let _ = std::fs::remove_file(&self.backup);
            return Err(e).with_context(|| {
                format!(
                    "copying {} to {}",
                    self.path.display(),
                    self.backup.display()
                )
            });
        }
        self.state = TemplateState::BackedUp;
        Ok(())
    }

    fn patch(&mut self, substitutions: &[Substitution]) -> Result<()> {
        if !self.state.holds_backup() {
            return Err(TemplateError::NotBackedUp(self.path.clone()).into());
        }
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading template {}", self.path.display()))?;
        std::fs::write(&self.path, substitute(&text, substitutions))
            .with_context(|| format!("writing template {}", self.path.display()))?;
        self.state = TemplateState::Patched;
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        if !self.backup.is_file() {
            return Err(TemplateError::NoBackup(self.backup.clone()).into());
        }
        // rename replaces the patched copy in one step.
        std::fs::rename(&self.backup, &self.path).with_context(|| {
            format!(
                "moving {} back to {}",
                self.backup.display(),
                self.path.display()
            )
        })?;
        self.state = TemplateState::Restored;
        Ok(())
    }
}
