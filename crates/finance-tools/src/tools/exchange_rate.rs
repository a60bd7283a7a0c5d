//! Currency exchange rate tool using the AwesomeAPI economia endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{decode, Scalar};
use crate::error::ToolError;
use crate::http::{join_segments, UpstreamClient};
use crate::tool::{Tool, ToolArgs, ToolInput, ToolOutput};

const DOMAIN: &str = "exchange rate";

const INPUTS: &[ToolInput] = &[
    ToolInput::string("from_currency", "The currency to convert from, e.g., 'USD'."),
    ToolInput::string("to_currency", "The currency to convert to, e.g., 'EUR'."),
];

/// Quote stored under the `<FROM><TO>` key of the `/last/` response.
#[derive(Debug, Deserialize)]
struct PairQuote {
    name: Option<Scalar>,
    high: Option<Scalar>,
    low: Option<Scalar>,
    bid: Option<Scalar>,
    ask: Option<Scalar>,
}

impl PairQuote {
    fn summary(&self) -> Option<String> {
        Some(format!(
            "Exchange rate {}, High: {}, Low: {}, Bid: {}, Ask: {}",
            self.name.as_ref()?,
            self.high.as_ref()?,
            self.low.as_ref()?,
            self.bid.as_ref()?,
            self.ask.as_ref()?,
        ))
    }
}

/// Current exchange rate between two currencies from AwesomeAPI.
///
/// Free, no API key required. Currency codes are upper-cased, so
/// `"usd"` and `"USD"` are equivalent.
///
/// # Parameters
///
/// - `from_currency` (required): Source currency code (e.g., "USD")
/// - `to_currency` (required): Target currency code (e.g., "EUR")
///
/// # Example
///
/// ```json
/// {"from_currency": "USD", "to_currency": "BRL"}
/// ```
pub struct CurrencyExchangeRate {
    http: UpstreamClient,
    base_url: Url,
}

impl CurrencyExchangeRate {
    /// Create the tool against an AwesomeAPI base URL.
    pub fn new(http: UpstreamClient, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Trim and upper-case a currency code, rejecting anything that is not
    /// a plain alphanumeric code.
    fn currency_code(args: &ToolArgs, key: &str) -> Result<String, ToolError> {
        let code = args.get_string(key)?.trim().to_uppercase();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ToolError::InvalidParameter {
                name: key.to_string(),
                reason: format!("'{}' is not a currency code", code),
            });
        }
        Ok(code)
    }

    fn pair_url(&self, from: &str, to: &str) -> Result<Url, ToolError> {
        let pair = format!("{}-{}", from, to);
        join_segments(&self.base_url, &["last", pair.as_str()], DOMAIN)
    }

    fn summarize(from: &str, to: &str, mut body: Value) -> ToolOutput {
        let key = format!("{}{}", from, to);
        let summary = body
            .get_mut(&key)
            .map(Value::take)
            .and_then(decode::<PairQuote>)
            .and_then(|quote| quote.summary());

        match summary {
            Some(summary) => ToolOutput::success(summary),
            None => ToolOutput::failure(format!("No exchange rate found for {}/{}.", from, to)),
        }
    }
}

#[async_trait]
impl Tool for CurrencyExchangeRate {
    fn name(&self) -> &str {
        "currency_exchange_rate"
    }

    fn description(&self) -> &str {
        "Fetches the exchange rate between two currencies at the current time."
    }

    fn inputs(&self) -> &[ToolInput] {
        INPUTS
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let from = Self::currency_code(&args, "from_currency")?;
        let to = Self::currency_code(&args, "to_currency")?;

        debug!("Getting exchange rate {} -> {}", from, to);

        let body = self.http.get_json(self.pair_url(&from, &to)?, DOMAIN).await?;
        Ok(Self::summarize(&from, &to, body))
    }
}
