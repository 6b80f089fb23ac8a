use std::sync::Arc;

use crate::{
    config::MAX_HISTORY_DAYS,
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{HistoryQuery, IndicatorsResponse, QuoteResponse},
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use borsvakt_market_data::{DegradedReason, FetchResult, PriceSeries, Symbol};
use chrono::{Duration, Utc};
use tokio::time::Instant;

/// Calendar days fetched for a quote; covers weekends and holidays.
const QUOTE_LOOKBACK_DAYS: u32 = 10;

fn resolve_days(requested: Option<u32>, default: u32) -> ApiResult<u32> {
    let days = requested.unwrap_or(default);
    if !(1..=MAX_HISTORY_DAYS).contains(&days) {
        return Err(ApiError::BadRequest(format!(
            "days must be between 1 and {}, got {}",
            MAX_HISTORY_DAYS, days
        )));
    }
    Ok(days)
}

/// Fetch the trailing `days` of history through the shared gateway, bounded
/// by the configured fetch timeout.
async fn fetch_recent(state: &AppState, symbol: &Symbol, days: u32) -> FetchResult {
    let end = Utc::now();
    let start = end - Duration::days(i64::from(days));
    let deadline = Instant::now() + state.fetch_timeout;
    let provider = state.provider.as_ref();

    state
        .gateway
        .fetch_with_deadline(symbol, deadline, || {
            provider.fetch_history(symbol, start, end)
        })
        .await
}

#[utoipa::path(
    get,
    path = "/api/v1/quotes/{symbol}",
    params(("symbol" = String, Path, description = "Ticker, e.g. EQNR.OL")),
    responses(
        (status = 200, description = "Live quote or degraded fallback", body = QuoteResponse),
        (status = 400, description = "Invalid symbol")
    )
)]
pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<QuoteResponse>> {
    let symbol = Symbol::parse(&symbol)?;
    let result = fetch_recent(&state, &symbol, QUOTE_LOOKBACK_DAYS).await;

    let response: QuoteResponse = match result {
        FetchResult::Live(series) => match series.quote() {
            Some(summary) => summary.into(),
            None => state
                .gateway
                .fallback_quote(&symbol, DegradedReason::NoData)
                .into(),
        },
        FetchResult::Degraded(fallback) => fallback.into(),
    };
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/history/{symbol}",
    params(
        ("symbol" = String, Path, description = "Ticker, e.g. EQNR.OL"),
        HistoryQuery
    ),
    responses(
        (status = 200, description = "Live series or degraded fallback, tagged by status"),
        (status = 400, description = "Invalid symbol or range")
    )
)]
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(q): Query<HistoryQuery>,
) -> ApiResult<Json<FetchResult>> {
    let symbol = Symbol::parse(&symbol)?;
    let days = resolve_days(q.days, state.history_days)?;
    Ok(Json(fetch_recent(&state, &symbol, days).await))
}

#[utoipa::path(
    get,
    path = "/api/v1/indicators/{symbol}",
    params(
        ("symbol" = String, Path, description = "Ticker, e.g. EQNR.OL"),
        HistoryQuery
    ),
    responses(
        (status = 200, description = "Indicator set, computed over no data when degraded"),
        (status = 400, description = "Invalid symbol or range")
    )
)]
pub async fn get_indicators(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(q): Query<HistoryQuery>,
) -> ApiResult<Json<IndicatorsResponse>> {
    let symbol = Symbol::parse(&symbol)?;
    let days = resolve_days(q.days, state.history_days)?;
    let result = fetch_recent(&state, &symbol, days).await;

    let indicators = match &result {
        FetchResult::Live(series) => state.engine.compute(series),
        FetchResult::Degraded(_) => state.engine.compute(&PriceSeries::empty(symbol.clone())),
    };
    Ok(Json(IndicatorsResponse::new(
        symbol.to_string(),
        &result,
        indicators,
    )))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/quotes/{symbol}", get(get_quote))
        .route("/history/{symbol}", get(get_history))
        .route("/indicators/{symbol}", get(get_indicators))
}
