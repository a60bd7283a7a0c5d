//! Cryptocurrency ticker tool using the Coinlore API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{decode, Scalar};
use crate::error::ToolError;
use crate::http::{join_segments, UpstreamClient};
use crate::tool::{Tool, ToolArgs, ToolInput, ToolOutput};

const DOMAIN: &str = "cryptocurrency";

const INPUTS: &[ToolInput] = &[ToolInput::string(
    "id",
    "The ID of the cryptocurrency to fetch information for. Ex '90' for Bitcoin, '80' for Ethereum, etc.",
)];

/// One entry of the `/api/ticker/` response list.
#[derive(Debug, Deserialize)]
struct CoinTicker {
    name: Option<Scalar>,
    symbol: Option<Scalar>,
    price_usd: Option<Scalar>,
    percent_change_24h: Option<Scalar>,
    volume24: Option<Scalar>,
}

impl CoinTicker {
    fn summary(&self) -> Option<String> {
        Some(format!(
            "{} ({}): ${}, Change in 24h: ${}, Volume: ${}",
            self.name.as_ref()?,
            self.symbol.as_ref()?,
            self.price_usd.as_ref()?,
            self.percent_change_24h.as_ref()?,
            self.volume24.as_ref()?,
        ))
    }
}

/// Real-time cryptocurrency information from Coinlore.
///
/// Free, no API key required.
///
/// # Parameters
///
/// - `id` (required): Coinlore numeric coin id, as a string ("90" = Bitcoin,
///   "80" = Ethereum).
///
/// # Example
///
/// ```json
/// {"id": "90"}
/// ```
///
/// Returns: `Bitcoin (BTC): $50000, Change in 24h: $2.5, Volume: $1000000`
pub struct CryptoCurrencyInfo {
    http: UpstreamClient,
    base_url: Url,
}

impl CryptoCurrencyInfo {
    /// Create the tool against a Coinlore base URL.
    pub fn new(http: UpstreamClient, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn ticker_url(&self, id: &str) -> Result<Url, ToolError> {
        let mut url = join_segments(&self.base_url, &["api", "ticker", ""], DOMAIN)?;
        url.query_pairs_mut().append_pair("id", id);
        Ok(url)
    }

    /// Turn the ticker list into the reply; only the first entry is used.
    fn summarize(id: &str, body: Value) -> ToolOutput {
        let summary = decode::<Vec<CoinTicker>>(body)
            .and_then(|tickers| tickers.into_iter().next())
            .and_then(|ticker| ticker.summary());

        match summary {
            Some(summary) => ToolOutput::success(summary),
            None => ToolOutput::failure(format!("No cryptocurrency found for id {}.", id)),
        }
    }
}

#[async_trait]
impl Tool for CryptoCurrencyInfo {
    fn name(&self) -> &str {
        "crypto_currency_info"
    }

    fn description(&self) -> &str {
        "Fetches real-time cryptocurrency information."
    }

    fn inputs(&self) -> &[ToolInput] {
        INPUTS
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let id = args.get_string("id")?;

        debug!("Getting cryptocurrency info for id {}", id);

        let body = self.http.get_json(self.ticker_url(&id)?, DOMAIN).await?;
        Ok(Self::summarize(&id, body))
    }
}
