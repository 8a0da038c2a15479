//! Yahoo Finance data fetcher
//!
//! Fetches listed option chains through Yahoo Finance's unofficial v7 options
//! API. The endpoint wants a session cookie plus a crumb token, obtained once
//! per client and reused for every request.
//!
//! Note: This is for educational/research purposes. Yahoo Finance
//! data is delayed ~15 minutes and intended for personal use.

use std::cell::OnceCell;

use serde::Deserialize;

use super::source::OptionDataSource;
use crate::core::{ContractQuote, Expiration, OptionChain, SurfaceError, SurfaceResult};

const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";
const OPTIONS_URL: &str = "https://query2.finance.yahoo.com/v7/finance/options";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
    crumb: OnceCell<String>,
}

impl YahooClient {
    pub fn new() -> SurfaceResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()
            .map_err(|e| SurfaceError::network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: OPTIONS_URL.to_string(),
            crumb: OnceCell::new(),
        })
    }

    /// Session crumb, fetched on first use
    fn crumb(&self) -> SurfaceResult<&str> {
        if let Some(crumb) = self.crumb.get() {
            return Ok(crumb.as_str());
        }

        // Only the Set-Cookie matters here; fc.yahoo.com answers 404
        let _ = self
            .client
            .get(COOKIE_URL)
            .send()
            .map_err(|e| SurfaceError::network(e.to_string()))?;

        let crumb = self
            .client
            .get(CRUMB_URL)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| SurfaceError::network(format!("crumb request failed: {}", e)))?
            .text()
            .map_err(|e| SurfaceError::network(e.to_string()))?;

        let crumb = validate_crumb(&crumb)?;
        tracing::debug!("Obtained Yahoo crumb");

        Ok(self.crumb.get_or_init(|| crumb).as_str())
    }

    fn fetch_options(&self, ticker: &str, date: Option<i64>) -> SurfaceResult<YahooOptionChainData> {
        let crumb = self.crumb()?;
        let url = format!("{}/{}", self.base_url, ticker);

        let mut query: Vec<(&str, String)> = vec![("crumb", crumb.to_string())];
        if let Some(epoch) = date {
            query.push(("date", epoch.to_string()));
        }

        tracing::debug!(ticker, ?date, "GET {}", url);

        let body = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| SurfaceError::network(e.to_string()))?
            .text()
            .map_err(|e| SurfaceError::network(e.to_string()))?;

        parse_options_response(&body)
    }
}

impl OptionDataSource for YahooClient {
    fn list_expirations(&self, ticker: &str) -> SurfaceResult<Vec<Expiration>> {
        let data = self.fetch_options(ticker, None)?;

        data.expiration_dates
            .iter()
            .map(|&ts| Expiration::from_epoch(ts))
            .collect()
    }

    fn get_option_chain(&self, ticker: &str, expiration: &Expiration) -> SurfaceResult<OptionChain> {
        let data = self.fetch_options(ticker, Some(expiration.epoch))?;
        Ok(convert_chain(data, *expiration))
    }
}

fn validate_crumb(raw: &str) -> SurfaceResult<String> {
    let crumb = raw.trim();
    if crumb.is_empty() || crumb.contains('<') {
        return Err(SurfaceError::network("Yahoo returned no usable crumb"));
    }
    Ok(crumb.to_string())
}

/// Decode a v7 options payload into its first result.
///
/// An empty result list is a valid answer (nothing listed); an `error` object
/// from the API is not.
fn parse_options_response(body: &str) -> SurfaceResult<YahooOptionChainData> {
    let response: YahooOptionsResponse = serde_json::from_str(body)
        .map_err(|e| SurfaceError::data(format!("Failed to parse options: {}", e)))?;

    if let Some(err) = response.option_chain.error {
        return Err(SurfaceError::data(format!(
            "Yahoo error {}: {}",
            err.code.unwrap_or_default(),
            err.description.unwrap_or_default()
        )));
    }

    Ok(response.option_chain.result.into_iter().next().unwrap_or_default())
}

fn convert_chain(data: YahooOptionChainData, expiration: Expiration) -> OptionChain {
    let mut chain = OptionChain::new(expiration);

    if let Some(options) = data.options.into_iter().next() {
        for call in options.calls {
            chain.add_call(call.into());
        }
        for put in options.puts {
            chain.add_put(put.into());
        }
    }

    chain
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    #[serde(default)]
    result: Vec<YahooOptionChainData>,
    error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
struct YahooApiError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    #[serde(default)]
    calls: Vec<YahooOptionData>,
    #[serde(default)]
    puts: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionData {
    #[serde(rename = "contractSymbol")]
    contract_symbol: String,
    strike: f64,
    bid: Option<f64>,
    ask: Option<f64>,
    #[serde(rename = "lastPrice")]
    last_price: Option<f64>,
    #[serde(rename = "impliedVolatility")]
    implied_volatility: Option<f64>,
}

impl From<YahooOptionData> for ContractQuote {
    fn from(data: YahooOptionData) -> Self {
        ContractQuote {
            contract_symbol: data.contract_symbol,
            strike: data.strike,
            bid: data.bid,
            ask: data.ask,
            last_price: data.last_price,
            implied_volatility: data.implied_volatility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAIN_JSON: &str = r#"{
        "optionChain": {
            "result": [{
                "underlyingSymbol": "AAPL",
                "expirationDates": [1721347200, 1721952000],
                "strikes": [175.0, 180.0],
                "quote": {"regularMarketPrice": 224.31},
                "options": [{
                    "expirationDate": 1721347200,
                    "calls": [
                        {"contractSymbol": "AAPL240719C00175000", "strike": 175.0,
                         "bid": 49.1, "ask": 49.6, "lastPrice": 49.35,
                         "impliedVolatility": 0.7285, "volume": 12, "inTheMoney": true},
                        {"contractSymbol": "AAPL240719C00180000", "strike": 180.0,
                         "lastPrice": 44.0, "impliedVolatility": 0.0}
                    ],
                    "puts": [
                        {"contractSymbol": "AAPL240719P00175000", "strike": 175.0,
                         "bid": 0.01, "ask": 0.02, "lastPrice": 0.01,
                         "impliedVolatility": 0.51}
                    ]
                }]
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_expirations() {
        let data = parse_options_response(CHAIN_JSON).unwrap();
        let exps: Vec<Expiration> = data
            .expiration_dates
            .iter()
            .map(|&ts| Expiration::from_epoch(ts).unwrap())
            .collect();

        assert_eq!(exps.len(), 2);
        assert_eq!(exps[0].to_string(), "2024-07-19");
        assert_eq!(exps[1].to_string(), "2024-07-26");
        assert_eq!(exps[0].epoch, 1721347200);
    }

    #[test]
    fn test_convert_chain() {
        let data = parse_options_response(CHAIN_JSON).unwrap();
        let exp = Expiration::from_epoch(1721347200).unwrap();
        let chain = convert_chain(data, exp);

        assert_eq!(chain.expiration, exp);
        assert_eq!(chain.calls.len(), 2);
        assert_eq!(chain.puts.len(), 1);

        let first = &chain.calls[0];
        assert_eq!(first.contract_symbol, "AAPL240719C00175000");
        assert_eq!(first.bid, Some(49.1));
        assert_eq!(first.implied_volatility, Some(0.7285));

        // Missing quote fields stay missing
        assert_eq!(chain.calls[1].bid, None);
        assert_eq!(chain.calls[1].positive_iv(), None);
    }

    #[test]
    fn test_empty_result_lists_nothing() {
        let body = r#"{"optionChain": {"result": [], "error": null}}"#;
        let data = parse_options_response(body).unwrap();
        assert!(data.expiration_dates.is_empty());

        let chain = convert_chain(data, Expiration::from_epoch(1721347200).unwrap());
        assert!(chain.calls.is_empty());
    }

    #[test]
    fn test_api_error_is_data_error() {
        let body = r#"{"optionChain": {"result": [],
            "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#;
        let err = parse_options_response(body).unwrap_err();
        assert!(matches!(err, SurfaceError::Data(ref m) if m.contains("delisted")));
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(parse_options_response("<html>"), Err(SurfaceError::Data(_))));

        // A call without a strike is malformed
        let body = r#"{"optionChain": {"result": [{"options": [{"calls": [
            {"contractSymbol": "X"}], "puts": []}]}], "error": null}}"#;
        assert!(parse_options_response(body).is_err());
    }

    #[test]
    fn test_validate_crumb() {
        assert_eq!(validate_crumb("abc/DEF.g\n").unwrap(), "abc/DEF.g");
        assert!(validate_crumb("").is_err());
        assert!(validate_crumb("<html><body>Too Many Requests</body></html>").is_err());
    }

    #[test]
    #[ignore] // Requires network
    fn test_get_expirations() {
        let client = YahooClient::new().unwrap();
        let expiries = client.list_expirations("AAPL").unwrap();

        assert!(!expiries.is_empty());
        println!("AAPL expiries: {:?}", expiries);
    }

    #[test]
    #[ignore] // Requires network
    fn test_get_option_chain() {
        let client = YahooClient::new().unwrap();
        let expiries = client.list_expirations("AAPL").unwrap();

        if let Some(expiry) = expiries.first() {
            let chain = client.get_option_chain("AAPL", expiry).unwrap();

            println!("Chain for {}: {} calls, {} puts",
                expiry, chain.calls.len(), chain.puts.len());

            assert!(!chain.calls.is_empty());
        }
    }
}
