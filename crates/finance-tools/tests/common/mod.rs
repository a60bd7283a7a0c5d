//! In-process fake of the three finance providers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use finance_tools::{finance_registry, FinanceToolsConfig, ToolRegistry};
use serde_json::{json, Value};
use url::Url;

pub const API_KEY: &str = "test-key";

/// Start the fake upstream on an ephemeral port and return its base URL.
pub async fn spawn_upstream() -> Url {
    let app = Router::new()
        .route("/api/ticker/", get(ticker))
        .route("/last/:pair", get(last))
        .route("/query", get(query));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Url::parse(&format!("http://{}", addr)).unwrap()
}

/// Registry with every provider pointed at `base`.
pub fn registry_for(base: Url) -> ToolRegistry {
    let config = FinanceToolsConfig::builder()
        .api_key(API_KEY)
        .all_urls(base)
        .http_timeout(Some(Duration::from_secs(5)))
        .build();
    finance_registry(&config).unwrap()
}

/// String-valued tool parameters.
pub fn params(pairs: &[(&str, &str)]) -> HashMap<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

async fn ticker(Query(query): Query<HashMap<String, String>>) -> Response {
    match query.get("id").map(String::as_str) {
        Some("90") => Json(json!([
            {
                "id": "90",
                "name": "Bitcoin",
                "symbol": "BTC",
                "price_usd": "50000",
                "percent_change_24h": "2.5",
                "volume24": "1000000"
            }
        ]))
        .into_response(),
        Some("500") => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        Some("html") => "<html>maintenance</html>".into_response(),
        _ => Json(json!([])).into_response(),
    }
}

async fn last(Path(pair): Path<String>) -> Response {
    match pair.as_str() {
        "USD-EUR" => Json(json!({
            "USDEUR": {
                "code": "USD",
                "codein": "EUR",
                "name": "Dollar/Euro",
                "high": "1.1",
                "low": "1.0",
                "bid": "1.05",
                "ask": "1.06"
            }
        }))
        .into_response(),
        "USD-XXX" => Json(json!({})).into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"status": 404, "code": "CoinNotExists"})),
        )
            .into_response(),
    }
}

async fn query(Query(query): Query<HashMap<String, String>>) -> Response {
    if query.get("apikey").map(String::as_str) != Some(API_KEY) {
        return Json(json!({"Error Message": "the parameter apikey is invalid or missing."}))
            .into_response();
    }

    let param = |name: &str| query.get(name).cloned().unwrap_or_default();

    match query.get("function").map(String::as_str) {
        Some("SYMBOL_SEARCH") => symbol_search(&param("keywords")),
        Some("GLOBAL_QUOTE") => global_quote(&param("symbol")).await,
        Some("MARKET_STATUS") => Json(json!({
            "endpoint": "Global Market Open & Close Status",
            "markets": [
                {"market_type": "Equity", "region": "United States", "current_status": "open"},
                {"market_type": "Equity", "region": "Brazil", "current_status": "closed"}
            ]
        }))
        .into_response(),
        _ => Json(json!({"Error Message": "Invalid API call."})).into_response(),
    }
}

fn symbol_search(keywords: &str) -> Response {
    if keywords == "Zzzz" {
        return Json(json!({"bestMatches": []})).into_response();
    }

    // Echo the keywords back as the company name so callers can check
    // they arrived intact.
    Json(json!({
        "bestMatches": [
            {
                "1. symbol": "T",
                "2. name": keywords,
                "3. type": "Equity",
                "4. region": "United States",
                "9. matchScore": "1.0000"
            }
        ]
    }))
    .into_response()
}

async fn global_quote(symbol: &str) -> Response {
    match symbol {
        "AAPL" => Json(json!({
            "Global Quote": {
                "01. symbol": "AAPL",
                "05. price": "189.9800"
            }
        }))
        .into_response(),
        "SLOW" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({"Global Quote": {"05. price": "1.00"}})).into_response()
        }
        _ => Json(json!({"Global Quote": {}})).into_response(),
    }
}
