//! Market open/closed tool using Alpha Vantage `MARKET_STATUS`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::alpha_vantage::AlphaVantage;
use super::decode;
use crate::error::ToolError;
use crate::http::UpstreamClient;
use crate::tool::{Tool, ToolArgs, ToolInput, ToolOutput};

const DOMAIN: &str = "market status";

const UNKNOWN_STATUS: &str = "unknown";

const INPUTS: &[ToolInput] = &[ToolInput::string(
    "country",
    "The country for which to check the market status, e.g., 'United States' or 'Brazil'.",
)];

#[derive(Debug, Deserialize)]
struct MarketStatusResponse {
    markets: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct Market {
    region: Option<String>,
    current_status: Option<String>,
}

/// Whether a country's stock market is open or closed, from Alpha Vantage.
///
/// Requires an Alpha Vantage API key. The country is matched against the
/// provider's `region` field ignoring case; with no match the status is
/// reported as "unknown".
///
/// # Parameters
///
/// - `country` (required): Region name as Alpha Vantage spells it
///   (e.g., "United States", "Brazil", "Hong Kong")
pub struct MarketStatus {
    alpha_vantage: AlphaVantage,
}

impl MarketStatus {
    /// Create the tool against an Alpha Vantage base URL.
    pub fn new(http: UpstreamClient, base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            alpha_vantage: AlphaVantage::new(http, base_url, api_key.into()),
        }
    }

    fn summarize(country: &str, body: Value) -> ToolOutput {
        let Some(markets) = decode::<MarketStatusResponse>(body).and_then(|r| r.markets) else {
            return ToolOutput::failure("Market status information is not available.");
        };

        let wanted = country.trim().to_lowercase();
        let status = markets
            .into_iter()
            .filter_map(decode::<Market>)
            .find(|m| {
                m.region
                    .as_deref()
                    .is_some_and(|region| region.trim().to_lowercase() == wanted)
            })
            .and_then(|m| m.current_status)
            .unwrap_or_else(|| UNKNOWN_STATUS.to_string());

        ToolOutput::success(format!(
            "The stock market in {} is currently {}.",
            country, status
        ))
    }
}

#[async_trait]
impl Tool for MarketStatus {
    fn name(&self) -> &str {
        "market_status"
    }

    fn description(&self) -> &str {
        "Provides the current status of the stock market (open or closed)."
    }

    fn inputs(&self) -> &[ToolInput] {
        INPUTS
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let country = args.get_string("country")?;

        debug!("Getting market status for '{}'", country);

        let body = self.alpha_vantage.query("MARKET_STATUS", &[], DOMAIN).await?;
        Ok(Self::summarize(&country, body))
    }
}
