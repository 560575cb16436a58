//! Domain types and validators for the agent configuration.
//!
//! Pure functions only. No I/O or async.

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::template::Substitution;

// ── Constants ────────────────────────────────────────────────────────────────

/// Sleep interval offered when the operator leaves the prompt blank.
pub const DEFAULT_SLEEP_INTERVAL: u64 = 30;

/// Shown in place of the API key whenever configuration is displayed.
pub const REDACTED: &str = "[REDACTED]";

pub const SLEEP_KEY: &str = "SLEEP";
pub const API_KEY_KEY: &str = "API_KEY";
pub const PARENT_PAGE_ID_KEY: &str = "PARENT_PAGE_ID";

// ── Config schema ────────────────────────────────────────────────────────────

/// Agent configuration stored in `<project>/config.json`.
///
/// Keys on disk are the placeholder names used in the agent source, so the
/// file reads `{"SLEEP": 30, "API_KEY": "...", "PARENT_PAGE_ID": "..."}`.
/// The API key is stored in cleartext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Seconds the agent sleeps between check-ins.
    #[serde(
        rename = "SLEEP",
        alias = "sleep_interval",
        deserialize_with = "number_or_numeric_string"
    )]
    pub sleep_interval: u64,

    /// Integration token for the remote API.
    #[serde(rename = "API_KEY", alias = "api_key")]
    pub api_key: String,

    /// Identifier of the listener's parent page.
    #[serde(rename = "PARENT_PAGE_ID", alias = "parent_page_id")]
    pub parent_page_id: String,
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("SLEEP must be a number, got {s:?}"))),
    }
}

impl AgentConfig {
    /// Checks that every field is usable for templating.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        validate_sleep_interval(self.sleep_interval)?;
        validate_required(API_KEY_KEY, &self.api_key)?;
        validate_required(PARENT_PAGE_ID_KEY, &self.parent_page_id)?;
        Ok(())
    }

    /// Placeholder substitutions for the agent source, one per field.
    #[must_use]
    pub fn substitutions(&self) -> Vec<Substitution> {
        vec![
            Substitution::placeholder(SLEEP_KEY, self.sleep_interval.to_string()),
            Substitution::placeholder(API_KEY_KEY, self.api_key.clone()),
            Substitution::placeholder(PARENT_PAGE_ID_KEY, self.parent_page_id.clone()),
        ]
    }

    /// Key/value rows for display, with the API key redacted.
    #[must_use]
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            (SLEEP_KEY, self.sleep_interval.to_string()),
            (API_KEY_KEY, REDACTED.to_string()),
            (PARENT_PAGE_ID_KEY, self.parent_page_id.clone()),
        ]
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates the sleep interval.
///
/// # Errors
///
/// Returns an error if the interval is zero.
pub fn validate_sleep_interval(seconds: u64) -> Result<()> {
    if seconds == 0 {
        return Err(ConfigError::Invalid {
            field: SLEEP_KEY,
            reason: "must be a positive number of seconds".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Validates that a required text field is not blank.
///
/// # Errors
///
/// Returns an error if `value` is empty or whitespace.
pub fn validate_required(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid {
            field,
            reason: "is required".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Parses the operator's answer to the sleep-interval prompt.
///
/// A blank answer selects [`DEFAULT_SLEEP_INTERVAL`].
///
/// # Errors
///
/// Returns an error if the answer is not a positive integer.
pub fn parse_sleep_interval(answer: &str) -> Result<u64> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(DEFAULT_SLEEP_INTERVAL);
    }
    let seconds: u64 = answer.parse().map_err(|_| ConfigError::Invalid {
        field: SLEEP_KEY,
        reason: format!("'{answer}' is not a whole number of seconds"),
    })?;
    validate_sleep_interval(seconds)?;
    Ok(seconds)
}

/// Parses a yes/no answer against the fixed vocabulary `{yes, y, no, n}`.
///
/// Matching is case-insensitive and a blank answer selects `default`.
/// Returns `None` for anything else so the caller can ask again.
#[must_use]
pub fn parse_yes_no(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" => Some(default),
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
