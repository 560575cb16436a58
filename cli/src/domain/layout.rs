//! Fixed file locations of a project, resolved once from its root.

use std::path::{Path, PathBuf};

/// Every path the pipeline touches, derived from a single project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persisted agent configuration.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    /// Agent source file carrying `<<NAME>>` placeholders.
    #[must_use]
    pub fn agent_source(&self) -> PathBuf {
        self.root.join("agent").join("src").join("config.rs")
    }

    /// Build descriptor carrying `{TOKEN}` placeholders.
    #[must_use]
    pub fn build_descriptor(&self) -> PathBuf {
        self.root.join("Dockerfile")
    }

    /// Host directory receiving the container's build output.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// Where the extracted build output lands; its presence means success.
    #[must_use]
    pub fn artifact_dir(&self) -> PathBuf {
        self.output_dir().join("target")
    }
}

/// Sibling backup path for a template file: `<file>.bak`.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}
