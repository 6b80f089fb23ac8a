mod common;

use std::sync::Arc;

use borsvakt_market_data::{FallbackPrices, Symbol};
use common::{app_with, get_json, test_config, Script, StubProvider};
use rust_decimal_macros::dec;

#[tokio::test]
async fn quote_is_live_with_change() {
    let config = test_config();
    let provider = Arc::new(StubProvider::new(Script::Closes(vec![
        dec!(265.00),
        dec!(270.50),
    ])));
    let app = app_with(&config, provider.clone());

    let (status, json) = get_json(app, "/api/v1/quotes/eqnr.ol").await;

    assert_eq!(status, 200);
    assert_eq!(json["status"], "live");
    assert_eq!(json["symbol"], "EQNR.OL");
    assert_eq!(json["price"], 270.5);
    assert_eq!(json["change"], 5.5);
    assert!(json.get("reason").is_none());
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn quote_degrades_to_configured_fallback() {
    let mut config = test_config();
    config.fallback_prices =
        FallbackPrices::new().with_price(Symbol::parse("EQNR.OL").unwrap(), dec!(270.50));
    let provider = Arc::new(StubProvider::new(Script::RateLimited));
    let app = app_with(&config, provider.clone());

    let (status, json) = get_json(app, "/api/v1/quotes/EQNR.OL").await;

    assert_eq!(status, 200);
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["price"], 270.5);
    assert_eq!(json["change"], 0.0);
    assert_eq!(json["reason"], "rate_limited");
    assert_eq!(json["message"], "API rate limited — showing fallback data.");
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn history_returns_tagged_live_series() {
    let config = test_config();
    let provider = Arc::new(StubProvider::new(Script::Closes(vec![
        dec!(100),
        dec!(101),
        dec!(102),
    ])));
    let app = app_with(&config, provider);

    let (status, json) = get_json(app, "/api/v1/history/DNB.OL?days=30").await;

    assert_eq!(status, 200);
    assert_eq!(json["status"], "live");
    assert_eq!(json["data"]["symbol"], "DNB.OL");
    assert_eq!(json["data"]["bars"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn history_not_found_is_degraded_after_one_call() {
    let config = test_config();
    let provider = Arc::new(StubProvider::new(Script::NotFound));
    let app = app_with(&config, provider.clone());

    let (status, json) = get_json(app, "/api/v1/history/ZZZZ").await;

    assert_eq!(status, 200);
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["data"]["reason"], "no_data");
    assert_eq!(json["data"]["price"], 100.0);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn invalid_symbol_is_bad_request() {
    let config = test_config();
    let provider = Arc::new(StubProvider::new(Script::NotFound));
    let app = app_with(&config, provider.clone());

    let (status, json) = get_json(app, "/api/v1/quotes/EQ%20NR").await;

    assert_eq!(status, 400);
    assert_eq!(json["code"], 400);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn out_of_range_days_is_bad_request() {
    let config = test_config();
    let provider = Arc::new(StubProvider::new(Script::NotFound));

    let (status, _) = get_json(
        app_with(&config, provider.clone()),
        "/api/v1/history/EQNR.OL?days=0",
    )
    .await;
    assert_eq!(status, 400);

    let (status, json) = get_json(
        app_with(&config, provider.clone()),
        "/api/v1/indicators/EQNR.OL?days=4000",
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(json["code"], 400);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn indicators_for_single_observation() {
    let config = test_config();
    let provider = Arc::new(StubProvider::new(Script::Closes(vec![dec!(270.50)])));
    let app = app_with(&config, provider);

    let (status, json) = get_json(app, "/api/v1/indicators/EQNR.OL").await;

    assert_eq!(status, 200);
    assert_eq!(json["status"], "live");
    assert_eq!(json["observations"], 1);
    assert_eq!(json["indicators"]["sma_20"], serde_json::json!([270.5]));
    assert_eq!(json["indicators"]["rsi_14"], 50.0);
}

#[tokio::test]
async fn indicators_degrade_to_neutral_defaults() {
    let config = test_config();
    let provider = Arc::new(StubProvider::new(Script::RateLimited));
    let app = app_with(&config, provider);

    let (status, json) = get_json(app, "/api/v1/indicators/EQNR.OL?days=60").await;

    assert_eq!(status, 200);
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["reason"], "rate_limited");
    assert_eq!(json["observations"], 0);
    assert_eq!(json["indicators"]["rsi_14"], 50.0);
    assert_eq!(json["indicators"]["stochastic_k"], 50.0);
    assert_eq!(json["indicators"]["macd"], serde_json::json!([]));
}
