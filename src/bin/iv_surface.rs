//! Implied volatility surface for listed call options
//!
//! Fetches the first expirations of a fixed underlying from Yahoo Finance,
//! prints a preview of the collected calls and opens a 3D surface window.

use std::io;
use std::process::ExitCode;

use chrono::Local;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use iv_surface::prelude::*;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = SurfaceConfig::default();
    let renderer = InteractiveRenderer::new(config.figure.clone());

    let result = YahooClient::new().and_then(|client| {
        let now = Local::now().naive_local();
        run(&config, &client, &renderer, now, &mut io::stdout().lock())
    });

    match result {
        Ok(records) => {
            tracing::info!("Done: {} call quotes plotted", records.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
