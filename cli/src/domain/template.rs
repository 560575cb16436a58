//! Placeholder substitution and template lifecycle states.
//!
//! Substitution is plain string replacement. Values are inserted verbatim and
//! are not escaped for the syntax of the target file, so a value that itself
//! contains a later token will be rewritten by that later substitution.

/// A single `token -> value` replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub token: String,
    pub value: String,
}

impl Substitution {
    #[must_use]
    pub fn new(token: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            value: value.into(),
        }
    }

    /// Agent-source token: `<<NAME>>`.
    #[must_use]
    pub fn placeholder(name: &str, value: impl Into<String>) -> Self {
        Self::new(format!("<<{name}>>"), value)
    }

    /// Build-descriptor token: `{NAME}`.
    #[must_use]
    pub fn descriptor(name: &str, value: impl Into<String>) -> Self {
        Self::new(format!("{{{name}}}"), value)
    }
}

/// Applies each substitution, in order, to every literal occurrence of its token.
#[must_use]
pub fn substitute(text: &str, substitutions: &[Substitution]) -> String {
    substitutions
        .iter()
        .filter(|s| !s.token.is_empty())
        .fold(text.to_string(), |acc, s| acc.replace(&s.token, &s.value))
}

/// Lifecycle of one template file during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateState {
    /// Untouched; no backup taken by this run.
    Pristine,
    /// Backup written, original still unmodified.
    BackedUp,
    /// Original rewritten with substitutions.
    Patched,
    /// Backup moved back over the original.
    Restored,
}

impl TemplateState {
    /// Whether a backup owned by this run is still on disk.
    #[must_use]
    pub fn holds_backup(self) -> bool {
        matches!(self, Self::BackedUp | Self::Patched)
    }
}
