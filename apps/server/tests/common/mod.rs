#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use borsvakt_market_data::{Bar, MarketDataError, MarketDataProvider, PriceSeries, Symbol};
use borsvakt_server::{api::app_router, build_state_with_provider, config::Config};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rust_decimal::Decimal;
use tower::ServiceExt;

/// What the stub provider answers with.
#[derive(Clone)]
pub enum Script {
    /// Daily bars with the given closes, ending at the requested end date.
    Closes(Vec<Decimal>),
    RateLimited,
    NotFound,
}

pub struct StubProvider {
    script: Script,
    calls: AtomicU32,
}

impl StubProvider {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    fn id(&self) -> &'static str {
        "STUB"
    }

    async fn fetch_history(
        &self,
        symbol: &Symbol,
        _start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceSeries, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Closes(closes) => {
                let count = closes.len() as i64;
                let bars = closes
                    .iter()
                    .enumerate()
                    .map(|(i, close)| {
                        Bar::flat(end - ChronoDuration::days(count - i as i64), *close)
                    })
                    .collect();
                PriceSeries::new(symbol.clone(), bars)
            }
            Script::RateLimited => Err(MarketDataError::RateLimited {
                provider: "STUB".to_string(),
            }),
            Script::NotFound => Err(MarketDataError::SymbolNotFound(symbol.to_string())),
        }
    }
}

pub fn test_config() -> Config {
    Config {
        min_delay: Duration::ZERO,
        backoff_base: Duration::ZERO,
        backoff_jitter: Duration::ZERO,
        ..Config::default()
    }
}

pub fn app_with(config: &Config, provider: Arc<StubProvider>) -> Router {
    let state = build_state_with_provider(config, provider).unwrap();
    app_router(state, config)
}

pub async fn get_json(app: Router, uri: &str) -> (u16, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
