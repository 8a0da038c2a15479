//! Volatility surface rendering
//!
//! - Scattered (strike, ttm, IV) samples
//! - Delaunay triangulation over the (strike, ttm) plane
//! - Viridis shading by IV
//! - Plotters drawing and an interactive eframe window

pub mod colormap;
pub mod plot;
pub mod triangulation;
pub mod viewer;

pub use colormap::*;
pub use plot::*;
pub use triangulation::*;
pub use viewer::*;

use crate::config::FigureConfig;
use crate::core::{OptionQuoteRecord, SurfaceResult};

/// Parallel strike / ttm / IV sequences in record order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfacePoints {
    pub strikes: Vec<f64>,
    pub ttms: Vec<f64>,
    pub ivs: Vec<f64>,
}

impl SurfacePoints {
    pub fn from_records(records: &[OptionQuoteRecord]) -> Self {
        Self {
            strikes: records.iter().map(|r| r.strike).collect(),
            ttms: records.iter().map(|r| r.ttm).collect(),
            ivs: records.iter().map(|r| r.iv).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.strikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty()
    }
}

/// Something that can present a surface to the user
pub trait SurfaceRenderer {
    fn render(&self, title: &str, points: &SurfacePoints) -> SurfaceResult<()>;
}

/// Triangulated surface ready for drawing
#[derive(Debug, Clone)]
pub struct TriSurface {
    pub points: SurfacePoints,
    /// Vertex indices into `points`
    pub triangles: Vec<[usize; 3]>,
    /// Mean IV of each triangle's vertices
    pub face_values: Vec<f64>,
    /// Span of `face_values` the colour map covers
    pub range: ColorRange,
}

impl TriSurface {
    /// Triangulate `points` over the (strike, ttm) plane
    pub fn build(points: SurfacePoints) -> SurfaceResult<Self> {
        let triangles = delaunay(&points.strikes, &points.ttms)?;

        let face_values: Vec<f64> = triangles
            .iter()
            .map(|t| t.iter().map(|&i| points.ivs[i]).sum::<f64>() / 3.0)
            .collect();

        // delaunay never returns an empty set
        let range = ColorRange::from_values(&face_values).unwrap_or(ColorRange::new(0.0, 1.0));

        Ok(Self {
            points,
            triangles,
            face_values,
            range,
        })
    }

    /// (min, max) of strike, ttm and IV
    pub fn extents(&self) -> [(f64, f64); 3] {
        let range = |v: &[f64]| {
            v.iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)))
        };
        [
            range(&self.points.strikes),
            range(&self.points.ttms),
            range(&self.points.ivs),
        ]
    }
}

/// Triangulates, then shows the surface in a native window until it is closed
#[derive(Debug, Clone, Default)]
pub struct InteractiveRenderer {
    pub figure: FigureConfig,
}

impl InteractiveRenderer {
    pub fn new(figure: FigureConfig) -> Self {
        Self { figure }
    }
}

impl SurfaceRenderer for InteractiveRenderer {
    fn render(&self, title: &str, points: &SurfacePoints) -> SurfaceResult<()> {
        let surface = TriSurface::build(points.clone())?;

        tracing::info!(
            "Triangulated {} points into {} faces",
            points.len(),
            surface.triangles.len()
        );

        show_surface(surface, title, &self.figure)
    }
}
