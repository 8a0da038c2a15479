//! Run configuration
//!
//! Everything here is fixed at build time; `Default` carries the values the
//! binary runs with.

use serde::{Deserialize, Serialize};

/// Configuration for one surface run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Underlying ticker
    /// Default: AAPL
    pub ticker: String,

    /// Number of leading expirations to sample
    /// Fewer are used when the source lists fewer.
    /// Default: 5
    pub expirations: usize,

    /// Rows shown in the report preview
    /// Default: 5
    pub preview_rows: usize,

    /// Figure layout
    pub figure: FigureConfig,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            ticker: "AAPL".to_string(),
            expirations: 5,
            preview_rows: 5,
            figure: FigureConfig::default(),
        }
    }
}

impl SurfaceConfig {
    /// Default settings for another underlying
    pub fn for_ticker(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Default::default()
        }
    }

    /// Figure title
    pub fn title(&self) -> String {
        format!("{} Implied Volatility Surface (Calls Only)", self.ticker)
    }
}

/// Figure layout for the rendered surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureConfig {
    /// Width in pixels (10in at 100dpi)
    pub width: u32,
    /// Height in pixels (6in at 100dpi)
    pub height: u32,
    /// Initial yaw of the 3D view, radians
    pub yaw: f64,
    /// Initial pitch of the 3D view, radians
    pub pitch: f64,
    /// Colour bar height as a fraction of the plot height
    pub colorbar_shrink: f64,
    /// Width reserved on the right for the colour bar, pixels
    pub colorbar_width: u32,
    /// Radians of rotation per dragged pixel
    pub drag_sensitivity: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            yaw: 0.7,
            pitch: 0.35,
            colorbar_shrink: 0.5,
            colorbar_width: 110,
            drag_sensitivity: 0.01,
        }
    }
}
