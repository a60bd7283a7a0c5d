//! Shared upstream HTTP access.

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::ToolError;

/// Thin wrapper around the `reqwest` client shared by all tools.
///
/// Every failure is reported as [`ToolError::Fetch`] tagged with the data
/// domain of the calling tool. Request URLs carry API keys in their query
/// string, so they are stripped from error messages and logged without
/// the query.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
}

impl UpstreamClient {
    /// Wrap an already configured client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET `url` and parse the body as JSON.
    ///
    /// Exactly one request is made; there is no retry.
    pub async fn get_json(&self, url: Url, domain: &'static str) -> Result<Value, ToolError> {
        debug!(
            host = url.host_str().unwrap_or(""),
            path = url.path(),
            "Fetching {} data",
            domain
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| fetch_error(domain, e))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| fetch_error(domain, e))
    }
}

fn fetch_error(domain: &'static str, error: reqwest::Error) -> ToolError {
    let error = error.without_url();

    // reqwest keeps the useful part (refused, timed out, bad JSON) in the
    // source chain.
    let mut message = error.to_string();
    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    warn!("Upstream {} request failed: {}", domain, message);
    ToolError::fetch(domain, message)
}

/// Append path segments to a base URL, percent-encoding each one.
///
/// An empty trailing segment keeps a trailing slash.
pub(crate) fn join_segments(
    base: &Url,
    segments: &[&str],
    domain: &'static str,
) -> Result<Url, ToolError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ToolError::fetch(domain, format!("invalid base URL {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
