//! Exercise the finance tools against the live providers.
//!
//! Run with: cargo run -p finance-tools --example finance_tools
//!
//! Pass a tool name and JSON arguments to run a single call:
//!
//! ```text
//! cargo run -p finance-tools --example finance_tools -- stock_price '{"symbol": "AAPL"}'
//! ```

use std::collections::HashMap;
use std::env;

use finance_tools::{finance_registry, FinanceToolsConfig, ToolRegistry};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("finance_tools=debug".parse()?),
        )
        .init();

    let config = FinanceToolsConfig::from_env()?;
    let registry = finance_registry(&config)?;

    println!("Registered tools:");
    for definition in registry.definitions() {
        println!("{}", serde_json::to_string_pretty(&definition)?);
    }
    println!();

    let mut args = env::args().skip(1);
    if let Some(tool) = args.next() {
        let raw = args.next().unwrap_or_else(|| "{}".to_string());
        let params: HashMap<String, Value> = serde_json::from_str(&raw)?;
        println!("{}", registry.forward(&tool, params).await);
        return Ok(());
    }

    smoke(&registry, "crypto_currency_info", &[("id", "90")]).await;
    smoke(
        &registry,
        "currency_exchange_rate",
        &[("from_currency", "USD"), ("to_currency", "BRL")],
    )
    .await;
    smoke(&registry, "search_stock_symbol", &[("company_name", "Petrobras")]).await;
    smoke(&registry, "stock_price", &[("symbol", "AAPL")]).await;
    smoke(&registry, "market_status", &[("country", "United States")]).await;

    Ok(())
}

async fn smoke(registry: &ToolRegistry, tool: &str, pairs: &[(&str, &str)]) {
    let params: HashMap<String, Value> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();

    println!("--- {} ---", tool);
    println!("  {}", registry.forward(tool, params).await);
}
