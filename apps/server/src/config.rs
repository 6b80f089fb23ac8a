use std::{net::SocketAddr, time::Duration};

use borsvakt_market_data::{FallbackPrices, GatewayConfig, Symbol};
use rust_decimal::Decimal;

/// Default history window, in days, when a request does not specify one.
pub const DEFAULT_HISTORY_DAYS: u32 = 180;

/// Largest history window a request may ask for.
pub const MAX_HISTORY_DAYS: u32 = 3650;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Upper bound on one gateway fetch, retries included.
    pub fetch_timeout: Duration,
    pub min_delay: Duration,
    pub max_retries: u32,
    pub backoff_base: Duration,
    pub backoff_jitter: Duration,
    pub history_days: u32,
    pub fallback_prices: FallbackPrices,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30000),
            fetch_timeout: Duration::from_millis(25000),
            min_delay: Duration::from_millis(1000),
            max_retries: 3,
            backoff_base: Duration::from_millis(1000),
            backoff_jitter: Duration::from_millis(1000),
            history_days: DEFAULT_HISTORY_DAYS,
            fallback_prices: FallbackPrices::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from a variable lookup. Invalid values for
    /// the listen address or fallback prices abort startup; malformed
    /// numbers fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let listen_addr: SocketAddr = lookup("BV_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid BV_LISTEN_ADDR");
        let cors_allow = lookup("BV_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let millis = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(default)
        };
        let max_retries = lookup("BV_MAX_RETRIES")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.max_retries);
        let history_days = lookup("BV_HISTORY_DAYS")
            .and_then(|v| v.trim().parse().ok())
            .filter(|d| (1..=MAX_HISTORY_DAYS).contains(d))
            .unwrap_or(defaults.history_days);
        let fallback_prices = lookup("BV_FALLBACK_PRICES")
            .map(|raw| parse_fallback_prices(&raw).expect("Invalid BV_FALLBACK_PRICES"))
            .unwrap_or_default();

        Self {
            listen_addr,
            cors_allow,
            request_timeout: millis("BV_REQUEST_TIMEOUT_MS", defaults.request_timeout),
            fetch_timeout: millis("BV_FETCH_TIMEOUT_MS", defaults.fetch_timeout),
            min_delay: millis("BV_MIN_DELAY_MS", defaults.min_delay),
            max_retries,
            backoff_base: millis("BV_BACKOFF_BASE_MS", defaults.backoff_base),
            backoff_jitter: millis("BV_BACKOFF_JITTER_MS", defaults.backoff_jitter),
            history_days,
            fallback_prices,
        }
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig::default()
            .with_min_delay(self.min_delay)
            .with_max_retries(self.max_retries)
            .with_backoff(self.backoff_base, self.backoff_jitter)
            .with_fallback_prices(self.fallback_prices.clone())
    }
}

/// Parse `SYMBOL=PRICE` pairs separated by commas, e.g.
/// `EQNR.OL=270.50,DNB.OL=215`.
pub fn parse_fallback_prices(raw: &str) -> Result<FallbackPrices, String> {
    let mut prices = FallbackPrices::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (symbol, price) = entry
            .split_once('=')
            .ok_or_else(|| format!("expected SYMBOL=PRICE, got '{}'", entry))?;
        let symbol = Symbol::parse(symbol).map_err(|e| e.to_string())?;
        let price: Decimal = price
            .trim()
            .parse()
            .map_err(|e| format!("invalid price for {}: {}", symbol, e))?;
        prices = prices.with_price(symbol, price);
    }
    Ok(prices)
}
