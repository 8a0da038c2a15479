//! Call quote collection
//!
//! Walks the first few listed expirations of an underlying and flattens every
//! call with a positive implied volatility into an [`OptionQuoteRecord`].
//! Chains are requested one at a time; the first failure aborts the run.

use chrono::NaiveDateTime;

use crate::core::{time_to_maturity, OptionQuoteRecord, SurfaceError, SurfaceResult};
use crate::data::OptionDataSource;

/// Collect call records for `ticker` from the first `expirations` listed expirations.
///
/// `now` is the reference instant for time to maturity. Records come out in
/// expiration order, then in the source's chain order.
pub fn collect_calls<S: OptionDataSource>(
    source: &S,
    ticker: &str,
    expirations: usize,
    now: NaiveDateTime,
) -> SurfaceResult<Vec<OptionQuoteRecord>> {
    if ticker.trim().is_empty() {
        return Err(SurfaceError::invalid_input("ticker must not be empty"));
    }

    let listed = source.list_expirations(ticker)?;
    let sampled = &listed[..expirations.min(listed.len())];

    tracing::info!(
        "{}: {} expirations listed, sampling {}",
        ticker,
        listed.len(),
        sampled.len()
    );

    let mut records = Vec::new();

    for expiration in sampled {
        let chain = source.get_option_chain(ticker, expiration)?;
        let ttm = time_to_maturity(expiration.date, now);

        let before = records.len();
        records.extend(
            chain
                .calls
                .iter()
                .filter_map(|call| OptionQuoteRecord::from_call(call, expiration, ttm)),
        );
        let kept = records.len() - before;

        tracing::info!(
            expiration = %expiration,
            ttm,
            "kept {} of {} calls",
            kept,
            chain.calls.len()
        );
        if kept < chain.calls.len() {
            tracing::debug!(
                "{} calls without positive IV dropped for {}",
                chain.calls.len() - kept,
                expiration
            );
        }
    }

    tracing::info!("{}: collected {} call quotes", ticker, records.len());
    Ok(records)
}
