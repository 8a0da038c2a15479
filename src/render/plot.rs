//! Plotters drawing of a triangulated surface
//!
//! The chart is drawn into an in-memory RGB buffer so the same code serves
//! the interactive window and headless tests.

use std::f64::consts::FRAC_PI_2;

use plotters::coord::ranged3d::Cartesian3d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::TriSurface;
use crate::config::FigureConfig;
use crate::core::{SurfaceError, SurfaceResult};

const FONT: &str = "sans-serif";
const COLORBAR_STEPS: usize = 128;

/// Camera angles for the 3D projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub yaw: f64,
    pub pitch: f64,
}

impl View {
    pub fn from_figure(figure: &FigureConfig) -> Self {
        Self {
            yaw: figure.yaw,
            pitch: figure.pitch,
        }
    }

    /// Rotate by the given deltas; pitch stays within straight up/down
    pub fn rotate(&mut self, d_yaw: f64, d_pitch: f64) {
        self.yaw = (self.yaw + d_yaw).rem_euclid(std::f64::consts::TAU);
        self.pitch = (self.pitch + d_pitch).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Approximate distance from the camera for a point in unit-cube chart
    /// coordinates (x = strike, y = IV, z = ttm). Larger is farther.
    fn depth(&self, (x, y, z): (f64, f64, f64)) -> f64 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        (x * sy + z * cy) * cp - y * sp
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> SurfaceError {
    SurfaceError::render(e.to_string())
}

/// Pad a range by 2% each side; a flat range gets a unit-relative window
fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let span = hi - lo;
    if span > 0.0 {
        (lo - 0.02 * span, hi + 0.02 * span)
    } else {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.05 };
        (lo - pad, hi + pad)
    }
}

/// Render the figure to a packed RGB buffer of `width * height * 3` bytes
pub fn render_rgb(
    surface: &TriSurface,
    title: &str,
    view: View,
    figure: &FigureConfig,
) -> SurfaceResult<Vec<u8>> {
    let mut buffer = vec![0u8; figure.width as usize * figure.height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (figure.width, figure.height))
            .into_drawing_area();
        draw_figure(&root, surface, title, view, figure)?;
        root.present().map_err(render_err)?;
    }
    Ok(buffer)
}

/// Draw surface, axes, title and colour bar onto `root`
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    surface: &TriSurface,
    title: &str,
    view: View,
    figure: &FigureConfig,
) -> SurfaceResult<()> {
    root.fill(&WHITE).map_err(render_err)?;

    let bar_width = figure.colorbar_width.min(figure.width / 2);
    let (plot_area, bar_area) = root.split_horizontally((figure.width - bar_width) as i32);

    draw_surface(&plot_area, surface, title, view)?;
    draw_colorbar(&bar_area, surface, figure.colorbar_shrink)?;
    Ok(())
}

type SurfaceChart<'a, DB> =
    ChartContext<'a, DB, Cartesian3d<RangedCoordf64, RangedCoordf64, RangedCoordf64>>;

/// Padded chart ranges for strike, ttm and IV
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    strike: (f64, f64),
    ttm: (f64, f64),
    iv: (f64, f64),
}

impl Bounds {
    fn of(surface: &TriSurface) -> Self {
        let [strike, ttm, iv] = surface.extents();
        Self {
            strike: padded(strike),
            ttm: padded(ttm),
            iv: padded(iv),
        }
    }

    /// Chart coordinates rescaled to the unit cube
    fn unit(&self, (k, v, t): (f64, f64, f64)) -> (f64, f64, f64) {
        let scale = |x: f64, (lo, hi): (f64, f64)| (x - lo) / (hi - lo);
        (scale(k, self.strike), scale(v, self.iv), scale(t, self.ttm))
    }
}

fn surface_chart<'a, DB: DrawingBackend>(
    builder: &mut ChartBuilder<'a, '_, DB>,
    bounds: &Bounds,
    view: View,
) -> SurfaceResult<SurfaceChart<'a, DB>> {
    let (k_lo, k_hi) = bounds.strike;
    let (t_lo, t_hi) = bounds.ttm;
    let (v_lo, v_hi) = bounds.iv;

    // Plotters' vertical axis is y, so IV goes there and ttm runs into the screen
    let mut chart = builder
        .build_cartesian_3d(k_lo..k_hi, v_lo..v_hi, t_lo..t_hi)
        .map_err(render_err)?;

    chart.with_projection(|mut pb| {
        pb.yaw = view.yaw;
        pb.pitch = view.pitch;
        pb.scale = 0.8;
        pb.into_matrix()
    });

    Ok(chart)
}

fn draw_surface<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    surface: &TriSurface,
    title: &str,
    view: View,
) -> SurfaceResult<()> {
    let bounds = Bounds::of(surface);
    let mut builder = ChartBuilder::on(area);
    builder.caption(title, (FONT, 20).into_font()).margin(10);
    let mut chart = surface_chart(&mut builder, &bounds, view)?;

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.1))
        .max_light_lines(3)
        .draw()
        .map_err(render_err)?;

    draw_faces(&mut chart, surface, &bounds, view)?;

    let (k_lo, k_hi) = bounds.strike;
    let (t_lo, t_hi) = bounds.ttm;
    let (v_lo, v_hi) = bounds.iv;
    let label_font = (FONT, 14).into_font().color(&BLACK);
    let labels = [
        ("Strike Price", ((k_lo + k_hi) / 2.0, v_lo, t_lo)),
        ("Time to Maturity (Years)", (k_hi, v_lo, (t_lo + t_hi) / 2.0)),
        ("Implied Volatility", (k_lo, v_hi, t_lo)),
    ];
    chart
        .draw_series(
            labels
                .iter()
                .map(|&(text, pos)| Text::new(text, pos, label_font.clone())),
        )
        .map_err(render_err)?;

    Ok(())
}

/// Filled faces with thin same-colour edges, farthest first
fn draw_faces<DB: DrawingBackend>(
    chart: &mut SurfaceChart<'_, DB>,
    surface: &TriSurface,
    bounds: &Bounds,
    view: View,
) -> SurfaceResult<()> {
    let points = &surface.points;
    let vertex = |i: usize| (points.strikes[i], points.ivs[i], points.ttms[i]);

    let mut order: Vec<(usize, f64)> = surface
        .triangles
        .iter()
        .enumerate()
        .map(|(f, tri)| {
            let d = tri
                .iter()
                .map(|&i| view.depth(bounds.unit(vertex(i))))
                .sum::<f64>()
                / 3.0;
            (f, d)
        })
        .collect();
    order.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    for (f, _) in order {
        let color = surface.range.color(surface.face_values[f]);
        let [a, b, c] = surface.triangles[f].map(vertex);

        chart
            .draw_series(std::iter::once(Polygon::new(vec![a, b, c], color.filled())))
            .map_err(render_err)?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![a, b, c, a],
                color.stroke_width(1),
            )))
            .map_err(render_err)?;
    }

    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    surface: &TriSurface,
    shrink: f64,
) -> SurfaceResult<()> {
    let (_, height) = area.dim_in_pixel();
    let pad = ((1.0 - shrink.clamp(0.05, 1.0)) * height as f64 / 2.0) as i32;
    let bar = area.margin(pad, pad, 10, 0);

    let range = surface.range;
    let (lo, hi) = if range.is_flat() {
        padded((range.min, range.max))
    } else {
        (range.min, range.max)
    };

    let mut chart = ChartBuilder::on(&bar)
        .right_y_label_area_size(55)
        .build_cartesian_2d(0.0..1.0, lo..hi)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_label_formatter(&|v| format!("{:.2}", v))
        .draw()
        .map_err(render_err)?;

    let step = (hi - lo) / COLORBAR_STEPS as f64;
    chart
        .draw_series((0..COLORBAR_STEPS).map(|i| {
            let v0 = lo + step * i as f64;
            let v1 = v0 + step;
            let color = surface.range.color((v0 + v1) / 2.0);
            Rectangle::new([(0.0, v0), (1.0, v1)], color.filled())
        }))
        .map_err(render_err)?;

    Ok(())
}
