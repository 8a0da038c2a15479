//! Option chain definitions
//!
//! Raw per-expiration chains as reported by a market data source, before any
//! filtering or flattening.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{SurfaceError, SurfaceResult};

/// A listed expiration.
///
/// Providers identify expirations by a Unix epoch; the calendar date is the UTC
/// date of that epoch. Both are kept so a chain request can echo back exactly
/// the identifier the provider listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expiration {
    /// Expiration date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Provider epoch in seconds
    pub epoch: i64,
}

impl Expiration {
    /// Build from a provider epoch
    pub fn from_epoch(epoch: i64) -> SurfaceResult<Self> {
        let date = DateTime::from_timestamp(epoch, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| SurfaceError::data(format!("expiration epoch out of range: {}", epoch)))?;

        Ok(Self { date, epoch })
    }

    /// Build from a calendar date, using midnight UTC as the epoch
    pub fn from_date(date: NaiveDate) -> Self {
        let epoch = date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        Self { date, epoch }
    }

    /// Parse a `YYYY-MM-DD` string
    pub fn parse(s: &str) -> SurfaceResult<Self> {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| SurfaceError::invalid_input(format!("bad expiration '{}': {}", s, e)))?;
        Ok(Self::from_date(date))
    }
}

impl fmt::Display for Expiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m-%d"))
    }
}

/// One listed contract in a chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractQuote {
    /// Exchange contract symbol (e.g. AAPL240719C00175000)
    pub contract_symbol: String,
    /// Strike price
    pub strike: f64,
    /// Bid price
    pub bid: Option<f64>,
    /// Ask price
    pub ask: Option<f64>,
    /// Last traded price
    pub last_price: Option<f64>,
    /// Implied volatility as reported by the source
    pub implied_volatility: Option<f64>,
}

impl ContractQuote {
    pub fn new(contract_symbol: impl Into<String>, strike: f64) -> Self {
        Self {
            contract_symbol: contract_symbol.into(),
            strike,
            bid: None,
            ask: None,
            last_price: None,
            implied_volatility: None,
        }
    }

    /// Set the implied volatility
    pub fn with_iv(mut self, iv: f64) -> Self {
        self.implied_volatility = Some(iv);
        self
    }

    /// Set bid/ask/last
    pub fn with_prices(mut self, bid: f64, ask: f64, last: f64) -> Self {
        self.bid = Some(bid);
        self.ask = Some(ask);
        self.last_price = Some(last);
        self
    }

    /// Present and strictly positive implied volatility.
    ///
    /// NaN compares false against zero, so it is rejected too.
    pub fn positive_iv(&self) -> Option<f64> {
        self.implied_volatility.filter(|&iv| iv > 0.0)
    }
}

/// Calls and puts for a single expiration, in source order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    /// Expiration this chain belongs to
    pub expiration: Expiration,
    /// Call contracts
    pub calls: Vec<ContractQuote>,
    /// Put contracts
    pub puts: Vec<ContractQuote>,
}

impl OptionChain {
    pub fn new(expiration: Expiration) -> Self {
        Self {
            expiration,
            calls: Vec::new(),
            puts: Vec::new(),
        }
    }

    /// Append a call, keeping source order
    pub fn add_call(&mut self, quote: ContractQuote) {
        self.calls.push(quote);
    }

    /// Append a put, keeping source order
    pub fn add_put(&mut self, quote: ContractQuote) {
        self.puts.push(quote);
    }
}
