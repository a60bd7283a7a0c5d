//! End-to-end tests against an in-process fake of the providers.

mod common;

use std::collections::HashMap;
use std::time::Duration;

use agent_core::{ToolExecutor, ToolRequest};
use common::{params, registry_for, spawn_upstream};
use finance_tools::{
    finance_registry, FinanceToolsConfig, RegistryToolExecutor, ToolError, ToolPolicy,
};
use serde_json::Value;
use url::Url;

const CRYPTO: &str = "crypto_currency_info";
const EXCHANGE: &str = "currency_exchange_rate";
const SYMBOL: &str = "search_stock_symbol";
const PRICE: &str = "stock_price";
const MARKET: &str = "market_status";

#[tokio::test]
async fn test_crypto_info() {
    let registry = registry_for(spawn_upstream().await);

    let output = registry.forward(CRYPTO, params(&[("id", "90")])).await;
    assert_eq!(
        output,
        "Bitcoin (BTC): $50000, Change in 24h: $2.5, Volume: $1000000"
    );

    let output = registry.forward(CRYPTO, params(&[("id", "424242")])).await;
    assert_eq!(output, "No cryptocurrency found for id 424242.");
}

#[tokio::test]
async fn test_exchange_rate() {
    let registry = registry_for(spawn_upstream().await);

    let output = registry
        .forward(
            EXCHANGE,
            params(&[("from_currency", "usd"), ("to_currency", "EUR")]),
        )
        .await;
    assert_eq!(
        output,
        "Exchange rate Dollar/Euro, High: 1.1, Low: 1.0, Bid: 1.05, Ask: 1.06"
    );

    let output = registry
        .forward(
            EXCHANGE,
            params(&[("from_currency", "USD"), ("to_currency", "XXX")]),
        )
        .await;
    assert_eq!(output, "No exchange rate found for USD/XXX.");
}

#[tokio::test]
async fn test_exchange_rate_unknown_pair_is_fetch_error() {
    let registry = registry_for(spawn_upstream().await);

    let result = registry
        .execute(
            EXCHANGE,
            params(&[("from_currency", "USD"), ("to_currency", "ZZZ")]),
        )
        .await;
    match result {
        Err(ToolError::Fetch { domain, message }) => {
            assert_eq!(domain, "exchange rate");
            assert!(message.contains("404"), "unexpected message: {}", message);
        }
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_symbol_search() {
    let registry = registry_for(spawn_upstream().await);

    let output = registry
        .forward(SYMBOL, params(&[("company_name", "AT&T Inc")]))
        .await;
    assert_eq!(
        output,
        "Company: AT&T Inc symbol: T type: Equity region: United States"
    );

    let output = registry
        .forward(SYMBOL, params(&[("company_name", "Zzzz")]))
        .await;
    assert_eq!(output, "No stock symbol found for the given company name.");
}

#[tokio::test]
async fn test_stock_price() {
    let registry = registry_for(spawn_upstream().await);

    let output = registry.forward(PRICE, params(&[("symbol", "AAPL")])).await;
    assert_eq!(output, "The current price of AAPL is $189.9800.");

    let output = registry.forward(PRICE, params(&[("symbol", "ZZZZ")])).await;
    assert_eq!(output, "No data found for the stock symbol ZZZZ.");
}

#[tokio::test]
async fn test_market_status() {
    let registry = registry_for(spawn_upstream().await);

    let output = registry
        .forward(MARKET, params(&[("country", "BRAZIL")]))
        .await;
    assert_eq!(output, "The stock market in BRAZIL is currently closed.");

    let output = registry
        .forward(MARKET, params(&[("country", "Atlantis")]))
        .await;
    assert_eq!(output, "The stock market in Atlantis is currently unknown.");
}

#[tokio::test]
async fn test_wrong_api_key_reports_not_found() {
    let base = spawn_upstream().await;
    let config = FinanceToolsConfig::builder()
        .api_key("wrong-key")
        .all_urls(base)
        .build();
    let registry = finance_registry(&config).unwrap();

    let output = registry.forward(PRICE, params(&[("symbol", "AAPL")])).await;
    assert_eq!(output, "No data found for the stock symbol AAPL.");
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let registry = registry_for(spawn_upstream().await);

    let output = registry.forward(CRYPTO, params(&[("id", "500")])).await;
    assert!(
        output.starts_with("Error fetching cryptocurrency data: "),
        "unexpected output: {}",
        output
    );
    assert!(output.contains("500"));
}

#[tokio::test]
async fn test_non_json_body_is_reported() {
    let registry = registry_for(spawn_upstream().await);

    let output = registry.forward(CRYPTO, params(&[("id", "html")])).await;
    assert!(
        output.starts_with("Error fetching cryptocurrency data: "),
        "unexpected output: {}",
        output
    );
}

#[tokio::test]
async fn test_unreachable_host_never_fails() {
    let registry = registry_for(Url::parse("http://127.0.0.1:1/").unwrap());

    let calls = [
        (CRYPTO, params(&[("id", "90")]), "cryptocurrency"),
        (
            EXCHANGE,
            params(&[("from_currency", "USD"), ("to_currency", "EUR")]),
            "exchange rate",
        ),
        (SYMBOL, params(&[("company_name", "Tesla")]), "stock symbol"),
        (PRICE, params(&[("symbol", "AAPL")]), "stock price"),
        (MARKET, params(&[("country", "Brazil")]), "market status"),
    ];

    for (tool, args, domain) in calls {
        let output = registry.forward(tool, args).await;
        let prefix = format!("Error fetching {} data: ", domain);
        assert!(output.starts_with(&prefix), "unexpected output: {}", output);
        assert!(!output.contains(common::API_KEY));
    }
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let registry = registry_for(spawn_upstream().await);

    let calls = [
        (CRYPTO, &[("id", "90")][..]),
        (EXCHANGE, &[("from_currency", "USD"), ("to_currency", "EUR")][..]),
        (SYMBOL, &[("company_name", "Tesla")][..]),
        (PRICE, &[("symbol", "AAPL")][..]),
        (MARKET, &[("country", "Brazil")][..]),
    ];

    for (tool, args) in calls {
        let first = registry.forward(tool, params(args)).await;
        let second = registry.forward(tool, params(args)).await;
        assert_eq!(first, second, "{} changed between calls", tool);
        assert!(!first.starts_with("Error fetching"), "{}: {}", tool, first);
    }
}

#[tokio::test]
async fn test_missing_parameter() {
    let registry = registry_for(spawn_upstream().await);

    let output = registry.forward(PRICE, HashMap::new()).await;
    assert_eq!(output, "Missing required parameter: symbol");
}

#[test]
fn test_definitions() {
    let registry = registry_for(Url::parse("http://127.0.0.1:1/").unwrap());
    let definitions = registry.definitions();

    let names: Vec<&str> = definitions.iter().map(|d| d.name()).collect();
    assert_eq!(names, vec![CRYPTO, EXCHANGE, SYMBOL, PRICE, MARKET]);

    let json = serde_json::to_value(&definitions[1]).unwrap();
    assert_eq!(json["type"], "function");
    assert_eq!(json["function"]["name"], EXCHANGE);
    assert_eq!(
        json["function"]["parameters"]["required"],
        serde_json::json!(["from_currency", "to_currency"])
    );
    assert_eq!(
        json["function"]["parameters"]["properties"]["from_currency"]["type"],
        "string"
    );
}

#[tokio::test]
async fn test_executor_over_finance_registry() {
    let registry = registry_for(spawn_upstream().await);
    let policy = ToolPolicy::default()
        .allow_tools([PRICE, MARKET])
        .with_json_results(true);
    let executor = RegistryToolExecutor::with_policy(registry, policy);

    let result = executor
        .execute(ToolRequest::new("call-1", PRICE, params(&[("symbol", "AAPL")])))
        .await;
    assert!(result.success);
    let json: Value = serde_json::from_str(&result.content).unwrap();
    assert_eq!(json["tool"], PRICE);
    assert_eq!(json["content"], "The current price of AAPL is $189.9800.");

    let result = executor
        .execute(ToolRequest::new("call-2", PRICE, params(&[("symbol", "ZZZZ")])))
        .await;
    assert!(!result.success);
    let json: Value = serde_json::from_str(&result.content).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["content"], "No data found for the stock symbol ZZZZ.");

    let result = executor
        .execute(ToolRequest::new("call-3", CRYPTO, params(&[("id", "90")])))
        .await;
    assert!(!result.success);
    let json: Value = serde_json::from_str(&result.content).unwrap();
    assert_eq!(json["tool"], CRYPTO);
    assert_eq!(json["content"], "Tool not allowed");
}

#[tokio::test]
async fn test_executor_json_wraps_fetch_errors() {
    let registry = registry_for(Url::parse("http://127.0.0.1:1/").unwrap());
    let policy = ToolPolicy::default().with_json_results(true);
    let executor = RegistryToolExecutor::with_policy(registry, policy);

    let result = executor
        .execute(ToolRequest::new("call-1", PRICE, params(&[("symbol", "AAPL")])))
        .await;
    assert!(!result.success);
    let json: Value = serde_json::from_str(&result.content).unwrap();
    assert_eq!(json["tool"], PRICE);
    assert_eq!(json["success"], false);
    let content = json["content"].as_str().unwrap();
    assert!(
        content.starts_with("Error fetching stock price data: "),
        "unexpected content: {}",
        content
    );
}

#[tokio::test]
async fn test_executor_timeout() {
    let registry = registry_for(spawn_upstream().await);
    let policy = ToolPolicy::default().with_timeout(Duration::from_millis(100));
    let executor = RegistryToolExecutor::with_policy(registry, policy);

    let result = executor
        .execute(ToolRequest::new("call-1", PRICE, params(&[("symbol", "SLOW")])))
        .await;
    assert!(!result.success);
    assert_eq!(result.content, "Tool execution timed out");
}
