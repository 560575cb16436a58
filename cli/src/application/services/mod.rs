//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`, never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod build_driver;
pub mod config_service;
pub mod pipeline;
pub mod preflight;
pub mod remote_check;
pub mod templating;
