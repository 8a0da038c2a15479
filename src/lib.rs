//! # IV Surface - Implied Volatility Surface from Listed Calls
//!
//! Pulls listed call options for one underlying across its nearest
//! expirations, previews them as a table and renders the implied volatility
//! surface in 3D.
//!
//! ## Overview
//!
//! The run is a single forward pass:
//! - **Data Fetching**: Yahoo Finance option chains, one expiration at a time
//! - **Collection**: keep calls with a positive implied volatility, attach time to maturity
//! - **Report**: fixed-width preview of the first records
//! - **Rendering**: Delaunay triangulation over (strike, ttm), viridis shading, native window
//!
//! ## Usage
//!
//! ```rust,no_run
//! use iv_surface::prelude::*;
//!
//! # fn main() -> SurfaceResult<()> {
//! let config = SurfaceConfig::for_ticker("AAPL");
//! let client = YahooClient::new()?;
//! let renderer = InteractiveRenderer::new(config.figure.clone());
//!
//! let now = chrono::Local::now().naive_local();
//! run(&config, &client, &renderer, now, &mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## What This Does NOT Do
//!
//! - Compute implied volatility (it is taken as quoted)
//! - Look at puts
//! - Store anything between runs

pub mod collector;
pub mod config;
pub mod core;
pub mod data;
pub mod pipeline;
pub mod render;
pub mod report;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        time_to_maturity, ContractQuote, Expiration, OptionChain, OptionQuoteRecord,
        SurfaceError, SurfaceResult,
    };

    // Configuration
    pub use crate::config::{FigureConfig, SurfaceConfig};

    // Data fetching
    pub use crate::data::{InMemorySource, OptionDataSource, YahooClient};

    // Pipeline stages
    pub use crate::collector::collect_calls;
    pub use crate::pipeline::run;
    pub use crate::report::{format_table, write_preview};

    // Rendering
    pub use crate::render::{
        delaunay, InteractiveRenderer, SurfacePoints, SurfaceRenderer, TriSurface,
    };
}

// Re-export main types at crate root
pub use crate::core::{SurfaceError, SurfaceResult};
