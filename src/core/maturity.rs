//! Time to maturity
//!
//! Day counting is Actual/365 on whole calendar days, floored, measured from an
//! explicit reference instant to midnight at the start of the expiration date.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Days per year used for the year fraction
pub const DAYS_PER_YEAR: f64 = 365.0;

const MICROS_PER_DAY: i64 = 86_400_000_000;
const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days from `now` to midnight of `expiry`, rounded toward negative infinity.
///
/// An expiry later today (reference past midnight) yields -1.
pub fn whole_days_until(expiry: NaiveDate, now: NaiveDateTime) -> i64 {
    let delta = expiry.and_time(NaiveTime::MIN) - now;

    match delta.num_microseconds() {
        Some(us) => us.div_euclid(MICROS_PER_DAY),
        // Outside +-292k years; second resolution is plenty there
        None => delta.num_seconds().div_euclid(SECONDS_PER_DAY),
    }
}

/// Time to maturity in years. Negative for expirations before `now`.
pub fn time_to_maturity(expiry: NaiveDate, now: NaiveDateTime) -> f64 {
    whole_days_until(expiry, now) as f64 / DAYS_PER_YEAR
}
