// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Create a configured asynchronous HTTP client.
///
/// Timeouts are set per request, not on the client; listing and detail
/// fetches use very different budgets.
pub fn create_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .build()?;
    Ok(client)
}

/// Fetch a URL with a per-request timeout and return the body text.
///
/// A non-success status is an error; callers decide whether it is fatal.
pub async fn fetch_text(
    client: &reqwest::Client,
    url: &str,
    timeout_secs: u64,
) -> Result<String> {
    let response = client
        .get(url)
        .timeout(Duration::from_secs(timeout_secs))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::status(url, status.as_u16()));
    }

    Ok(response.text().await?)
}
