use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// Longest identifier accepted. Yahoo tickers stay well below this.
const MAX_SYMBOL_LEN: usize = 32;

/// A validated instrument identifier, e.g. `EQNR.OL`, `NOK=X` or `^OSEAX`.
///
/// Parsing trims surrounding whitespace and upper-cases the input. Only ASCII
/// alphanumerics and `.`, `-`, `=`, `^` are accepted, which covers Oslo Børs
/// suffixes, currency pairs, crypto pairs and index tickers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a symbol.
    pub fn parse(raw: &str) -> Result<Self, MarketDataError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed.len() > MAX_SYMBOL_LEN {
            return Err(MarketDataError::InvalidSymbol(raw.to_string()));
        }

        let valid = trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '=' | '^'));
        if !valid {
            return Err(MarketDataError::InvalidSymbol(raw.to_string()));
        }

        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = MarketDataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
