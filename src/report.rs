//! Text preview of collected quotes
//!
//! Prints the first rows of the collection as a fixed-width, right-aligned
//! table without row indices.

use std::io::Write;

use crate::core::{OptionQuoteRecord, SurfaceResult};

/// Banner printed above the table
pub const BANNER: &str = "\n📊 Sample Option Chain Data (Calls Only):\n";

/// Column headers, in display order
pub const COLUMNS: [&str; 8] = [
    "contract",
    "strike",
    "expiration",
    "ttm",
    "IV",
    "bid",
    "ask",
    "lastPrice",
];

/// Digits after the decimal point before trailing zeros are trimmed
const FLOAT_PRECISION: usize = 6;

/// Write the banner and a table of the first `rows` records
pub fn write_preview<W: Write>(out: &mut W, records: &[OptionQuoteRecord], rows: usize) -> SurfaceResult<()> {
    writeln!(out, "{}", BANNER)?;
    writeln!(out, "{}", format_table(&records[..rows.min(records.len())]))?;
    Ok(())
}

/// Render records as a table: header plus one line per record
pub fn format_table(records: &[OptionQuoteRecord]) -> String {
    let columns: Vec<Vec<String>> = vec![
        records.iter().map(|r| r.contract.clone()).collect(),
        format_floats(records.iter().map(|r| Some(r.strike))),
        records.iter().map(|r| r.expiration.format("%Y-%m-%d").to_string()).collect(),
        format_floats(records.iter().map(|r| Some(r.ttm))),
        format_floats(records.iter().map(|r| Some(r.iv))),
        format_floats(records.iter().map(|r| r.bid)),
        format_floats(records.iter().map(|r| r.ask)),
        format_floats(records.iter().map(|r| r.last_price)),
    ];

    let widths: Vec<usize> = COLUMNS
        .iter()
        .zip(&columns)
        .map(|(header, cells)| {
            cells
                .iter()
                .map(|c| c.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(join_row(COLUMNS.iter().copied(), &widths));
    for row in 0..records.len() {
        lines.push(join_row(columns.iter().map(|c| c[row].as_str()), &widths));
    }

    lines.join("\n")
}

fn join_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &w)| format!("{:>w$}", cell, w = w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a float column with a shared number of decimals.
///
/// Values are printed with six decimals, then trailing zeros common to every
/// finite value are trimmed, always keeping one decimal digit. Missing and
/// NaN values print as `NaN`.
fn format_floats(values: impl Iterator<Item = Option<f64>>) -> Vec<String> {
    let values: Vec<Option<f64>> = values.map(|v| v.filter(|x| !x.is_nan())).collect();

    let mut decimals = FLOAT_PRECISION;
    let finite: Vec<String> = values
        .iter()
        .flatten()
        .map(|v| format!("{:.*}", FLOAT_PRECISION, v))
        .collect();

    while decimals > 1 && !finite.is_empty() && finite.iter().all(|s| trailing_zeros(s) > FLOAT_PRECISION - decimals) {
        decimals -= 1;
    }

    values
        .iter()
        .map(|v| match v {
            Some(x) => format!("{:.*}", decimals, x),
            None => "NaN".to_string(),
        })
        .collect()
}

fn trailing_zeros(s: &str) -> usize {
    s.chars().rev().take_while(|&c| c == '0').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(contract: &str, strike: f64, ttm: f64, iv: f64) -> OptionQuoteRecord {
        OptionQuoteRecord {
            contract: contract.to_string(),
            strike,
            expiration: NaiveDate::from_ymd_opt(2024, 7, 19).unwrap(),
            ttm,
            iv,
            bid: Some(1.5),
            ask: Some(1.75),
            last_price: Some(1.6),
        }
    }

    #[test]
    fn test_float_trimming() {
        let col = format_floats([Some(100.0), Some(105.0)].into_iter());
        assert_eq!(col, vec!["100.0", "105.0"]);

        let col = format_floats([Some(1.5), Some(1.25)].into_iter());
        assert_eq!(col, vec!["1.50", "1.25"]);

        let col = format_floats([Some(3.0 / 365.0)].into_iter());
        assert_eq!(col, vec!["0.008219"]);

        let col = format_floats([Some(2.0), None, Some(f64::NAN)].into_iter());
        assert_eq!(col, vec!["2.0", "NaN", "NaN"]);
    }

    #[test]
    fn test_table_layout() {
        let records = vec![
            record("AAPL240719C00175000", 175.0, 0.049315, 0.7285),
            record("AAPL240719C00180000", 180.0, 0.049315, 0.65),
        ];

        let table = format_table(&records);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "           contract strike expiration      ttm     IV bid  ask lastPrice"
        );
        assert_eq!(
            lines[1],
            "AAPL240719C00175000  175.0 2024-07-19 0.049315 0.7285 1.5 1.75       1.6"
        );
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn test_preview_limits_rows() {
        let records: Vec<_> = (0..8)
            .map(|i| record(&format!("C{}", i), 100.0 + i as f64, 0.1, 0.2))
            .collect();

        let mut out = Vec::new();
        write_preview(&mut out, &records, 5).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with(BANNER));
        assert!(text.contains("C4"));
        assert!(!text.contains("C5"));
    }

    #[test]
    fn test_empty_prints_header_only() {
        let mut out = Vec::new();
        write_preview(&mut out, &[], 5).unwrap();
        let text = String::from_utf8(out).unwrap();

        let body: Vec<&str> = text[BANNER.len()..].lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(body, vec!["contract strike expiration ttm IV bid ask lastPrice"]);
    }
}
