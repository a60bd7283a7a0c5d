//! Alpha Vantage query endpoint shared by the stock tools.

use serde_json::Value;
use tracing::warn;
use url::Url;

use crate::error::ToolError;
use crate::http::{join_segments, UpstreamClient};

/// Keys Alpha Vantage uses for throttling notices and request errors.
/// These come back with a 200 status in place of the data.
const NOTICE_KEYS: &[&str] = &["Note", "Information", "Error Message"];

/// `GET {base}/query?function=..&apikey=..` with the key attached.
#[derive(Clone)]
pub(crate) struct AlphaVantage {
    http: UpstreamClient,
    base_url: Url,
    api_key: String,
}

impl AlphaVantage {
    pub(crate) fn new(http: UpstreamClient, base_url: Url, api_key: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    /// Build the query URL; every value is percent-encoded.
    pub(crate) fn query_url(
        &self,
        function: &str,
        params: &[(&str, &str)],
        domain: &'static str,
    ) -> Result<Url, ToolError> {
        let mut url = join_segments(&self.base_url, &["query"], domain)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("function", function);
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("apikey", &self.api_key);
        }
        Ok(url)
    }

    /// Run one query and return the JSON body.
    pub(crate) async fn query(
        &self,
        function: &str,
        params: &[(&str, &str)],
        domain: &'static str,
    ) -> Result<Value, ToolError> {
        let url = self.query_url(function, params, domain)?;
        let body = self.http.get_json(url, domain).await?;

        if let Some(notice) = notice(&body) {
            warn!("Alpha Vantage {} notice: {}", domain, notice);
        }

        Ok(body)
    }
}

fn notice(body: &Value) -> Option<&str> {
    NOTICE_KEYS
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
}
