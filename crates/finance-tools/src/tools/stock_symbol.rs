//! Stock symbol search tool using Alpha Vantage `SYMBOL_SEARCH`.

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

const DOMAIN: &str = "stock symbol";

const NOT_FOUND: &str = "No stock symbol found for the given company name.";

const DEFAULT_MAX_MATCHES: usize = 3;

const INPUTS: &[ToolInput] = &[ToolInput::string(
    "company_name",
    "The name of the company to search for its stock symbol.",
)];

#[derive(Debug, Default, Deserialize)]
struct SymbolSearchResponse {
    #[serde(rename = "bestMatches", default)]
    best_matches: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct SymbolMatch {
    #[serde(rename = "1. symbol")]
    symbol: Option<String>,
    #[serde(rename = "2. name")]
    name: Option<String>,
    #[serde(rename = "3. type")]
    kind: Option<String>,
    #[serde(rename = "4. region")]
    region: Option<String>,
}

impl SymbolMatch {
    fn summary(&self) -> Option<String> {
        Some(format!(
            "Company: {} symbol: {} type: {} region: {}",
            self.name.as_ref()?,
            self.symbol.as_ref()?,
            self.kind.as_ref()?,
            self.region.as_ref()?,
        ))
    }
}

/// Searches Alpha Vantage for ticker symbols matching a company name.
///
/// Requires an Alpha Vantage API key. Reports the best few matches
/// (three by default), skipping any match with missing fields.
///
/// # Parameters
///
/// - `company_name` (required): Free-text company name (e.g., "Petrobras")
///
/// # Example
///
/// ```json
/// {"company_name": "Tesla"}
/// ```
///
/// Returns: `Company: Tesla Inc symbol: TSLA type: Equity region: United States`
pub struct SearchStockSymbol {
    alpha_vantage: AlphaVantage,
    max_matches: usize,
}

impl SearchStockSymbol {
    /// Create the tool against an Alpha Vantage base URL.
    pub fn new(http: UpstreamClient, base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            alpha_vantage: AlphaVantage::new(http, base_url, api_key.into()),
            max_matches: DEFAULT_MAX_MATCHES,
        }
    }

    /// Set how many matches are reported.
    pub fn with_max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = max_matches;
        self
    }

    fn summarize(&self, body: Value) -> ToolOutput {
        let response: SymbolSearchResponse = decode(body).unwrap_or_default();

        // Each match is decoded on its own so one malformed entry does not
        // hide the others.
        let matches: Vec<String> = response
            .best_matches
            .into_iter()
            .filter_map(decode::<SymbolMatch>)
            .filter_map(|m| m.summary())
            .take(self.max_matches)
            .collect();

        if matches.is_empty() {
            ToolOutput::failure(NOT_FOUND)
        } else {
            ToolOutput::success(matches.join("; "))
        }
    }
}

#[async_trait]
impl Tool for SearchStockSymbol {
    fn name(&self) -> &str {
        "search_stock_symbol"
    }

    fn description(&self) -> &str {
        "Searches for a stock symbol based on a company name."
    }

    fn inputs(&self) -> &[ToolInput] {
        INPUTS
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let company_name = args.get_string("company_name")?;

        debug!("Searching stock symbol for '{}'", company_name);

        let body = self
            .alpha_vantage
            .query("SYMBOL_SEARCH", &[("keywords", company_name.as_str())], DOMAIN)
            .await?;
        Ok(self.summarize(body))
    }
}
