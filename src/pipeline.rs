//! One surface run: collect, report, render

use std::io::Write;

use chrono::NaiveDateTime;

use crate::collector::collect_calls;
use crate::config::SurfaceConfig;
use crate::core::{OptionQuoteRecord, SurfaceResult};
use crate::data::OptionDataSource;
use crate::render::{SurfacePoints, SurfaceRenderer};
use crate::report::write_preview;

/// Run the whole pipeline against the given collaborators.
///
/// The preview is written to `out` before rendering starts, so it survives a
/// render failure. Returns the collected records.
pub fn run<S, R, W>(
    config: &SurfaceConfig,
    source: &S,
    renderer: &R,
    now: NaiveDateTime,
    out: &mut W,
) -> SurfaceResult<Vec<OptionQuoteRecord>>
where
    S: OptionDataSource,
    R: SurfaceRenderer,
    W: Write,
{
    let records = collect_calls(source, &config.ticker, config.expirations, now)?;

    write_preview(out, &records, config.preview_rows)?;
    out.flush()?;

    let points = SurfacePoints::from_records(&records);
    renderer.render(&config.title(), &points)?;

    Ok(records)
}
