//! Borsvakt Technical Indicators
//!
//! Pure functions deriving moving averages, RSI, MACD, Bollinger bands and
//! the stochastic oscillator from a [`PriceSeries`](borsvakt_market_data::PriceSeries).
//!
//! Every indicator has an explicit short-history policy: averages use the
//! points available, oscillators report a neutral 50. No function fails on
//! short or empty input.
//!
//! # Example
//!
//! ```
//! use borsvakt_indicators::IndicatorEngine;
//! use borsvakt_market_data::{PriceSeries, Symbol};
//!
//! let series = PriceSeries::empty(Symbol::parse("EQNR.OL").unwrap());
//! let set = IndicatorEngine::default().compute(&series);
//! assert_eq!(set.scalar("rsi_14"), Some(50.0));
//! ```

mod bollinger;
mod config;
mod engine;
mod errors;
mod macd;
mod moving_average;
mod rsi;
mod set;
mod stochastic;

pub use bollinger::{bollinger, BollingerBands};
pub use config::IndicatorConfig;
pub use engine::{
    IndicatorEngine, BOLLINGER_LOWER, BOLLINGER_MIDDLE, BOLLINGER_UPPER, MACD, MACD_HISTOGRAM,
    MACD_SIGNAL, STOCHASTIC_K,
};
pub use errors::IndicatorError;
pub use macd::{macd, Macd};
pub use moving_average::{ema, sma};
pub use rsi::{rsi, NEUTRAL_RSI};
pub use set::{IndicatorSet, IndicatorValue};
pub use stochastic::{stochastic_k, NEUTRAL_STOCHASTIC};
