use borsvakt_indicators::IndicatorSet;
use borsvakt_market_data::{DegradedReason, FallbackQuote, FetchResult, QuoteSummary};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Whether a response carries live market data or a fallback.
#[derive(Serialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DataStatus {
    Live,
    Degraded,
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Days of history ending today, 1 to 3650.
    pub days: Option<u32>,
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub status: DataStatus,
    pub symbol: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[schema(value_type = f64)]
    pub change: Decimal,
    #[schema(value_type = f64)]
    pub change_percent: Decimal,
    #[schema(value_type = Option<f64>)]
    pub volume: Option<Decimal>,
    pub timestamp: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DegradedReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<QuoteSummary> for QuoteResponse {
    fn from(q: QuoteSummary) -> Self {
        Self {
            status: DataStatus::Live,
            symbol: q.symbol.to_string(),
            price: q.price,
            change: q.change,
            change_percent: q.change_percent,
            volume: q.volume,
            timestamp: Some(q.timestamp),
            reason: None,
            message: None,
        }
    }
}

impl From<FallbackQuote> for QuoteResponse {
    fn from(f: FallbackQuote) -> Self {
        Self {
            status: DataStatus::Degraded,
            symbol: f.symbol.to_string(),
            price: f.price,
            change: f.change,
            change_percent: f.change_percent,
            volume: Some(f.volume),
            timestamp: None,
            reason: Some(f.reason),
            message: Some(f.message),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorsResponse {
    pub status: DataStatus,
    pub symbol: String,
    /// Number of observations the indicators were computed over.
    pub observations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DegradedReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub indicators: IndicatorSet,
}

impl IndicatorsResponse {
    pub fn new(symbol: String, result: &FetchResult, indicators: IndicatorSet) -> Self {
        let (status, observations, reason, message) = match result {
            FetchResult::Live(series) => (DataStatus::Live, series.len(), None, None),
            FetchResult::Degraded(fallback) => (
                DataStatus::Degraded,
                0,
                Some(fallback.reason),
                Some(fallback.message.clone()),
            ),
        };
        Self {
            status,
            symbol,
            observations,
            reason,
            message,
            indicators,
        }
    }
}
