//! Terminal implementation of the `Prompter` port using `dialoguer`.

use anyhow::{Context, Result};
use dialoguer::{Input, Password};

use crate::application::ports::Prompter;

/// Reads answers from the controlling terminal.
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn ask(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string()).show_default(true);
        }
        input.interact_text().context("reading answer from terminal")
    }

    fn ask_secret(&self, prompt: &str) -> Result<String> {
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .context("reading secret from terminal")
    }
}
