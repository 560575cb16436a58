//! Application service: agent configuration use-cases.
//!
//! Loading, interactive collection, display, and the confirm-or-recollect
//! loop. Every prompt answer is validated here; a bad answer is reported and
//! asked again.

use anyhow::Result;

use crate::application::ports::{ConfigStore, ProgressReporter, Prompter};
use crate::domain::config::{
    API_KEY_KEY, AgentConfig, DEFAULT_SLEEP_INTERVAL, PARENT_PAGE_ID_KEY, parse_sleep_interval,
    parse_yes_no, validate_required,
};
use crate::domain::error::ConfigError;

const SLEEP_PROMPT: &str = "Enter the sleep interval for the agent in seconds";
const API_KEY_PROMPT: &str = "Enter your Notion developer API key";
const PARENT_PAGE_PROMPT: &str = "Enter your listener's parent page ID";
const CONFIRM_PROMPT: &str = "Do these look good? [yes/no]";

/// Everything needed to obtain a confirmed configuration.
pub struct ConfigSession<'a, S, P, R> {
    pub store: &'a S,
    pub prompter: &'a P,
    pub reporter: &'a R,
    /// Accept the default at confirmation and never prompt.
    pub non_interactive: bool,
}

/// Where the confirm loop currently stands.
enum Phase {
    Collect,
    Confirm(AgentConfig),
}

impl<S: ConfigStore, P: Prompter, R: ProgressReporter> ConfigSession<'_, S, P, R> {
    /// Load the persisted configuration, or collect and save a new one when
    /// the file is absent or unusable.
    ///
    /// # Errors
    ///
    /// Returns an error if prompting or saving fails, or if a new
    /// configuration is needed in non-interactive mode.
    pub fn load_or_collect(&self) -> Result<AgentConfig> {
        let path = self.store.path();
        if self.store.exists() {
            match self.store.load() {
                Ok(config) => {
                    self.reporter
                        .success(&format!("Config file located: {}", path.display()));
                    return Ok(config);
                }
                Err(e) => {
                    self.reporter.error(&format!("{e:#}"));
                    self.reporter.warn("Let's set up a new config file");
                }
            }
        } else {
            self.reporter.step("No config file located. Let's set one up");
        }

        if self.non_interactive {
            return Err(ConfigError::NonInteractive(path).into());
        }
        self.collect_and_save()
    }

    /// Show `config` and ask for confirmation until the operator accepts one,
    /// re-collecting the full configuration after every rejection.
    ///
    /// # Errors
    ///
    /// Returns an error if prompting or saving fails.
    pub fn confirm_loop(&self, initial: AgentConfig) -> Result<AgentConfig> {
        let mut phase = Phase::Confirm(initial);
        loop {
            phase = match phase {
                Phase::Collect => Phase::Confirm(self.collect_and_save()?),
                Phase::Confirm(config) => {
                    self.display(&config);
                    if self.confirm()? {
                        self.reporter.success("Config looks good!");
                        return Ok(config);
                    }
                    Phase::Collect
                }
            };
        }
    }

    /// Prompt for every field in turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    pub fn collect(&self) -> Result<AgentConfig> {
        let default = DEFAULT_SLEEP_INTERVAL.to_string();
        let sleep_interval = loop {
            let answer = self.prompter.ask(SLEEP_PROMPT, Some(&default))?;
            match parse_sleep_interval(&answer) {
                Ok(seconds) => break seconds,
                Err(e) => self.reporter.error(&e.to_string()),
            }
        };
        self.reporter
            .success(&format!("Sleep interval: {sleep_interval}"));

        let api_key = loop {
            let answer = self.prompter.ask_secret(API_KEY_PROMPT)?;
            match validate_required(API_KEY_KEY, &answer) {
                Ok(()) => break answer.trim().to_string(),
                Err(e) => self.reporter.error(&e.to_string()),
            }
        };
        self.reporter.success("Got your API key!");

        self.reporter.step(
            "Your page's parent ID is the long number at the end of its URL, e.g. \
             'notion.so/LISTENER-11223344556677889900112233445566' -> 11223344556677889900112233445566",
        );
        let parent_page_id = loop {
            let answer = self.prompter.ask(PARENT_PAGE_PROMPT, None)?;
            match validate_required(PARENT_PAGE_ID_KEY, &answer) {
                Ok(()) => break answer.trim().to_string(),
                Err(e) => self.reporter.error(&e.to_string()),
            }
        };
        self.reporter
            .success(&format!("Parent page ID: {parent_page_id}"));

        Ok(AgentConfig {
            sleep_interval,
            api_key,
            parent_page_id,
        })
    }

    /// Print every field, with the API key redacted.
    pub fn display(&self, config: &AgentConfig) {
        self.reporter.step("Your configs are:");
        for (key, value) in config.display_rows() {
            self.reporter.detail(key, &value);
        }
    }

    /// Ask the yes/no confirmation question; blank means yes.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    pub fn confirm(&self) -> Result<bool> {
        if self.non_interactive {
            return Ok(true);
        }
        loop {
            let answer = self.prompter.ask(CONFIRM_PROMPT, Some("yes"))?;
            match parse_yes_no(&answer, true) {
                Some(accepted) => return Ok(accepted),
                None => self
                    .reporter
                    .error(&format!("'{}' is not an answer. Type yes or no.", answer.trim())),
            }
        }
    }

    fn collect_and_save(&self) -> Result<AgentConfig> {
        let config = self.collect()?;
        self.store.save(&config)?;
        self.reporter
            .success(&format!("Config saved to {}", self.store.path().display()));
        Ok(config)
    }
}
