//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod build;
pub mod config;
pub mod error;
pub mod layout;
pub mod template;

pub use build::{BuildParams, BuildProfile, BuildSettings, TargetOs};
pub use config::{AgentConfig, REDACTED, parse_sleep_interval, parse_yes_no};
pub use error::{BuildError, ConfigError, PreflightError, TemplateError};
pub use layout::ProjectLayout;
pub use template::{Substitution, TemplateState, substitute};
