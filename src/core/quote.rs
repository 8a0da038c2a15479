//! Flattened option quote records
//!
//! One record per retained call contract, carrying everything the report and
//! the surface need.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::chain::{ContractQuote, Expiration};

/// A call quote with its time to maturity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuoteRecord {
    /// Exchange contract symbol
    pub contract: String,
    /// Strike price
    pub strike: f64,
    /// Expiration date
    pub expiration: NaiveDate,
    /// Time to maturity in years
    pub ttm: f64,
    /// Implied volatility, always > 0
    #[serde(rename = "IV")]
    pub iv: f64,
    /// Bid price
    pub bid: Option<f64>,
    /// Ask price
    pub ask: Option<f64>,
    /// Last traded price
    #[serde(rename = "lastPrice")]
    pub last_price: Option<f64>,
}

impl OptionQuoteRecord {
    /// Build a record from a call quote.
    ///
    /// Returns `None` when the quote has no strictly positive implied volatility.
    pub fn from_call(call: &ContractQuote, expiration: &Expiration, ttm: f64) -> Option<Self> {
        let iv = call.positive_iv()?;

        Some(Self {
            contract: call.contract_symbol.clone(),
            strike: call.strike,
            expiration: expiration.date,
            ttm,
            iv,
            bid: call.bid,
            ask: call.ask,
            last_price: call.last_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_pass_through() {
        let exp = Expiration::parse("2024-07-19").unwrap();
        let call = ContractQuote::new("AAPL240719C00175000", 175.0)
            .with_iv(0.3125)
            .with_prices(12.1, 12.45, 12.3);

        let rec = OptionQuoteRecord::from_call(&call, &exp, 0.05).unwrap();

        assert_eq!(rec.contract, "AAPL240719C00175000");
        assert_eq!(rec.strike, 175.0);
        assert_eq!(rec.expiration, exp.date);
        assert_eq!(rec.ttm, 0.05);
        assert_eq!(rec.iv, 0.3125);
        assert_eq!(rec.bid, Some(12.1));
        assert_eq!(rec.ask, Some(12.45));
        assert_eq!(rec.last_price, Some(12.3));
    }

    #[test]
    fn test_zero_iv_rejected() {
        let exp = Expiration::parse("2024-07-19").unwrap();
        let call = ContractQuote::new("AAPL240719C00175000", 175.0).with_iv(0.0);
        assert!(OptionQuoteRecord::from_call(&call, &exp, 0.05).is_none());
    }

    #[test]
    fn test_serialized_column_names() {
        let exp = Expiration::parse("2024-07-19").unwrap();
        let call = ContractQuote::new("X", 1.0).with_iv(0.2);
        let rec = OptionQuoteRecord::from_call(&call, &exp, 0.1).unwrap();

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["IV"], 0.2);
        assert_eq!(json["expiration"], "2024-07-19");
        assert!(json["lastPrice"].is_null());
    }
}
