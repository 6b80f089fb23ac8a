use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use borsvakt_indicators::IndicatorEngine;
use borsvakt_market_data::{FetchGateway, MarketDataProvider, YahooProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    /// Shared by every request so provider spacing holds process-wide.
    pub gateway: Arc<FetchGateway>,
    pub provider: Arc<dyn MarketDataProvider>,
    pub engine: IndicatorEngine,
    pub history_days: u32,
    pub fetch_timeout: Duration,
}

pub fn init_tracing() {
    let log_format = std::env::var("BV_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = YahooProvider::new()?;
    tracing::info!("Market data provider: {}", provider.id());
    build_state_with_provider(config, Arc::new(provider))
}

/// Wire the gateway and engine around an explicit provider.
pub fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn MarketDataProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let gateway_config = config.gateway_config();
    tracing::info!(
        "Gateway: min delay {:?}, {} attempts, {} fallback prices",
        gateway_config.min_delay,
        gateway_config.retry.max_attempts(),
        gateway_config.fallback_prices.len()
    );

    Ok(Arc::new(AppState {
        gateway: Arc::new(FetchGateway::new(gateway_config)),
        provider,
        engine: IndicatorEngine::default(),
        history_days: config.history_days,
        fetch_timeout: config.fetch_timeout,
    }))
}
