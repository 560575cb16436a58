//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, config
//! persistence, template files, terminal prompts, host identity, termination
//! signals, and the remote API call.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod command_runner;
pub mod config;
pub mod fs;
pub mod privileges;
pub mod prompt;
pub mod remote;
pub mod signal;
pub mod template;
