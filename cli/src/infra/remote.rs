//! Notion API implementation of the `RemoteChecker` port.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::RemoteChecker;

/// Endpoint that creates a page.
pub const NOTION_PAGES_URL: &str = "https://api.notion.com/v1/pages";
/// API version header sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";
/// Title of the page created by the check.
pub const TEST_PAGE_TITLE: &str = "C2_LINT_TEST";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Checks credentials by creating a test page through the Notion API.
pub struct NotionChecker {
    url: String,
}

impl NotionChecker {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for NotionChecker {
    fn default() -> Self {
        Self::new(NOTION_PAGES_URL)
    }
}

/// Request body creating a titled page under `parent_page_id`.
#[must_use]
pub fn test_page_body(parent_page_id: &str) -> serde_json::Value {
    serde_json::json!({
        "parent": { "page_id": parent_page_id },
        "properties": {
            "title": {
                "title": [ { "text": { "content": TEST_PAGE_TITLE } } ]
            }
        }
    })
}

impl RemoteChecker for NotionChecker {
    async fn create_test_page(&self, api_key: &str, parent_page_id: &str) -> Result<()> {
        let url = self.url.clone();
        let auth = format!("Bearer {api_key}");
        let body = test_page_body(parent_page_id);
        tokio::task::spawn_blocking(move || {
            let response = ureq::post(&url)
                .timeout(REQUEST_TIMEOUT)
                .set("Authorization", &auth)
                .set("Notion-Version", NOTION_VERSION)
                .send_json(body);
            match response {
                Ok(_) => Ok(()),
                Err(ureq::Error::Status(401, _)) => {
                    anyhow::bail!("HTTP 401: the API key was rejected")
                }
                Err(ureq::Error::Status(404, _)) => anyhow::bail!(
                    "HTTP 404: parent page not found or not shared with the integration"
                ),
                Err(ureq::Error::Status(code, resp)) => {
                    let detail = resp.into_string().unwrap_or_default();
                    anyhow::bail!("HTTP {code}: {}", detail.trim())
                }
                Err(ureq::Error::Transport(t)) => {
                    anyhow::bail!("cannot reach {url}: {t}")
                }
            }
        })
        .await
        .context("remote check task panicked")?
    }
}
