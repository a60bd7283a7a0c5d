//! Stock price tool using Alpha Vantage `GLOBAL_QUOTE`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::alpha_vantage::AlphaVantage;
use super::{decode, Scalar};
use crate::error::ToolError;
use crate::http::UpstreamClient;
use crate::tool::{Tool, ToolArgs, ToolInput, ToolOutput};

const DOMAIN: &str = "stock price";

const INPUTS: &[ToolInput] = &[ToolInput::string(
    "symbol",
    "The stock symbol to fetch the price for, e.g., 'AAPL' for Apple Inc.",
)];

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(rename = "Global Quote")]
    quote: Option<GlobalQuote>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<Scalar>,
}

/// Latest traded price of a stock from Alpha Vantage.
///
/// Requires an Alpha Vantage API key. Unknown symbols come back from the
/// provider as an empty quote and are reported as "no data found".
///
/// # Parameters
///
/// - `symbol` (required): Ticker symbol (e.g., "AAPL", "PETR4.SAO")
pub struct StockPrice {
    alpha_vantage: AlphaVantage,
}

impl StockPrice {
    /// Create the tool against an Alpha Vantage base URL.
    pub fn new(http: UpstreamClient, base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            alpha_vantage: AlphaVantage::new(http, base_url, api_key.into()),
        }
    }

    fn summarize(symbol: &str, body: Value) -> ToolOutput {
        let price = decode::<QuoteResponse>(body)
            .and_then(|r| r.quote)
            .and_then(|q| q.price);

        match price {
            Some(price) => {
                ToolOutput::success(format!("The current price of {} is ${}.", symbol, price))
            }
            None => ToolOutput::failure(format!("No data found for the stock symbol {}.", symbol)),
        }
    }
}

#[async_trait]
impl Tool for StockPrice {
    fn name(&self) -> &str {
        "stock_price"
    }

    fn description(&self) -> &str {
        "Fetches the current stock price for a given stock symbol."
    }

    fn inputs(&self) -> &[ToolInput] {
        INPUTS
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let symbol = args.get_string("symbol")?;

        debug!("Getting stock price for {}", symbol);

        let body = self
            .alpha_vantage
            .query("GLOBAL_QUOTE", &[("symbol", symbol.as_str())], DOMAIN)
            .await?;
        Ok(Self::summarize(&symbol, body))
    }
}
