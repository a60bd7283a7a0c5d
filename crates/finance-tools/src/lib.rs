//! Finance lookup tools for LLM agents.
//!
//! This crate provides a `ToolRegistry` of tools that answer short finance
//! questions with one English sentence: cryptocurrency tickers, currency
//! exchange rates, stock symbol search, stock prices and market open/closed
//! status. Each tool makes a single GET against a public provider.
//!
//! # Architecture
//!
//! Every tool implements [`Tool`], which describes itself (name, description,
//! typed inputs) and runs against a string-keyed argument map. The
//! [`RegistryToolExecutor`] adapter exposes the registry to an agent host as
//! an `agent_core::ToolExecutor`, with optional policy controls.
//!
//! Lookups that find nothing still succeed with a "not found" sentence.
//! Transport failures, non-2xx responses and unparseable bodies surface as
//! [`ToolError::Fetch`]; [`Tool::forward`] turns those into strings so the
//! host always gets text back.
//!
//! # Built-in Tools
//!
//! - [`CryptoCurrencyInfo`] - Coinlore ticker by numeric id (no key needed).
//! - [`CurrencyExchangeRate`] - Latest pair quote via AwesomeAPI (no key needed).
//! - [`SearchStockSymbol`] - Alpha Vantage symbol search.
//! - [`StockPrice`] - Alpha Vantage global quote.
//! - [`MarketStatus`] - Alpha Vantage market open/closed status.
//!
//! # Example
//!
//! ```rust,no_run
//! use finance_tools::{finance_registry, FinanceToolsConfig};
//! use std::collections::HashMap;
//! use serde_json::Value;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FinanceToolsConfig::from_env()?;
//!     let registry = finance_registry(&config)?;
//!
//!     let mut params = HashMap::new();
//!     params.insert("symbol".to_string(), Value::String("AAPL".to_string()));
//!
//!     println!("{}", registry.forward("stock_price", params).await);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod executor;
mod http;
mod registry;
mod tool;
pub mod tools;

pub use config::{
    ConfigError, FinanceToolsConfig, FinanceToolsConfigBuilder, API_KEY_FALLBACK_VAR, API_KEY_VAR,
    DEFAULT_ALPHAVANTAGE_URL, DEFAULT_AWESOMEAPI_URL, DEFAULT_COINLORE_URL,
};
pub use error::ToolError;
pub use executor::{RegistryToolExecutor, ToolPolicy};
pub use http::UpstreamClient;
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolArgs, ToolInput, ToolOutput, ValueType};
pub use tools::{CryptoCurrencyInfo, CurrencyExchangeRate, MarketStatus, SearchStockSymbol, StockPrice};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

/// Create a registry with all five finance tools registered.
///
/// Tools are registered in a fixed order (crypto, exchange rate, symbol
/// search, stock price, market status) and share one HTTP client.
pub fn finance_registry(config: &FinanceToolsConfig) -> Result<ToolRegistry, ConfigError> {
    config.validate()?;

    let http = UpstreamClient::new(config.http_client()?);
    let api_key = config.alpha_vantage_api_key.as_str();

    let mut registry = ToolRegistry::new();

    // Keyless providers
    registry.register(CryptoCurrencyInfo::new(
        http.clone(),
        config.coinlore_url.clone(),
    ));
    registry.register(CurrencyExchangeRate::new(
        http.clone(),
        config.awesomeapi_url.clone(),
    ));

    // Alpha Vantage
    registry.register(
        SearchStockSymbol::new(http.clone(), config.alpha_vantage_url.clone(), api_key)
            .with_max_matches(config.max_symbol_matches),
    );
    registry.register(StockPrice::new(
        http.clone(),
        config.alpha_vantage_url.clone(),
        api_key,
    ));
    registry.register(MarketStatus::new(
        http,
        config.alpha_vantage_url.clone(),
        api_key,
    ));

    Ok(registry)
}
