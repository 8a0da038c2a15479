//! Face colouring over plotters' viridis map

use plotters::style::colors::colormaps::ViridisRGB;
use plotters::style::RGBColor;

/// Value span mapped onto viridis, low end to high end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRange {
    pub min: f64,
    pub max: f64,
}

impl ColorRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range spanned by `values`, ignoring NaN
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut finite = values.iter().copied().filter(|v| !v.is_nan());
        let first = finite.next()?;
        let (min, max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Self { min, max })
    }

    /// Empty or non-finite span
    pub fn is_flat(&self) -> bool {
        !(self.min.is_finite() && self.max.is_finite() && self.max > self.min)
    }

    /// Colour for `value`, clamped into the range.
    /// A flat range or a NaN value takes the low end.
    pub fn color(&self, value: f64) -> RGBColor {
        if value.is_nan() || self.is_flat() {
            return ViridisRGB::get_color(0.0_f64);
        }
        ViridisRGB::get_color_normalized(value, self.min, self.max)
    }
}
