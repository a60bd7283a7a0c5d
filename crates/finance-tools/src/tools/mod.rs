//! Built-in finance tools.
//!
//! Each tool makes one GET against its provider, validates the fields it
//! needs, and answers with one sentence.

mod alpha_vantage;
mod crypto_info;
mod exchange_rate;
mod market_status;
mod stock_price;
mod stock_symbol;

pub use crypto_info::CryptoCurrencyInfo;
pub use exchange_rate::CurrencyExchangeRate;
pub use market_status::MarketStatus;
pub use stock_price::StockPrice;
pub use stock_symbol::SearchStockSymbol;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// A JSON scalar rendered exactly as the provider sent it.
///
/// Providers disagree on whether prices are strings or numbers (Coinlore
/// sends `price_usd` as a string and `volume24` as a number).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Decode a JSON value into `T`, treating a shape mismatch as absence.
fn decode<T: DeserializeOwned>(value: Value) -> Option<T> {
    serde_json::from_value(value).ok()
}
