//! Integration tests for the stagehand CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! They never reach a real container runtime or the network.

#[cfg(unix)]
mod signal_restore;
