//! Multi-colored polylines.
//!
//! [`colorline`] draws a polyline whose color varies per segment: each pair of
//! consecutive points becomes one segment of a [`LineCollection`], colored by
//! mapping a scalar value through a normalization and a colormap.

use crate::axes::Axes;
use crate::colormaps::{get_colormap, Colormap};
use crate::error::{RadiatorError, Result};
use crate::normalize::Normalization;
use crate::segments::{linspace, make_segments, Segment};

/// How segment color values are supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    /// Color by position along the curve: values linearly spaced on `[0, 1]`
    Default,
    /// A single value, giving the whole line a uniform color
    Uniform(f64),
    /// One value per point, colored according to this data
    PerPoint(Vec<f64>),
}

impl ColorSpec {
    /// Resolve into the value array attached to the collection.
    fn resolve(self, point_count: usize) -> Vec<f64> {
        match self {
            Self::Default => linspace(0.0, 1.0, point_count),
            Self::Uniform(value) => vec![value],
            Self::PerPoint(values) => values,
        }
    }
}

/// Parameters for [`colorline`].
#[derive(Debug, Clone)]
pub struct ColorlineParams {
    /// Colormap name (e.g. copper, viridis)
    pub colormap: String,
    /// Normalization applied to color values before colormap lookup
    pub norm: Normalization,
    /// Stroke width in pixels
    pub line_width: f32,
    /// Stroke opacity in `[0, 1]`
    pub alpha: f32,
}

impl Default for ColorlineParams {
    fn default() -> Self {
        Self {
            colormap: "copper".to_string(),
            norm: Normalization::default(),
            line_width: 3.0,
            alpha: 1.0,
        }
    }
}

/// A renderable batch of line segments, each independently colorable.
pub struct LineCollection {
    segments: Vec<Segment>,
    values: Vec<f64>,
    colormap: Box<dyn Colormap>,
    /// Normalization applied to the value array
    pub norm: Normalization,
    /// Stroke width in pixels
    pub line_width: f32,
    /// Stroke opacity in `[0, 1]`
    pub alpha: f32,
    /// Draw order among collections on the same axes (higher draws later)
    pub z_order: i32,
}

impl LineCollection {
    /// Build a collection from segments and an already-resolved value array.
    pub fn new(
        segments: Vec<Segment>,
        values: Vec<f64>,
        colormap: Box<dyn Colormap>,
        norm: Normalization,
        line_width: f32,
        alpha: f32,
    ) -> Self {
        Self {
            segments,
            values,
            colormap,
            norm,
            line_width,
            alpha,
            z_order: 0,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The color value array attached to this collection.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn colormap_name(&self) -> &str {
        self.colormap.name()
    }

    /// Swap the colormap, by name.
    pub fn set_colormap(&mut self, name: &str) -> Result<()> {
        self.colormap = get_colormap(name)?;
        Ok(())
    }

    /// The color value for segment `i`.
    ///
    /// A length-1 value array colors every segment uniformly; otherwise
    /// segment `i` takes value `i`. A value array shorter than the segment
    /// count (but longer than 1) is rejected rather than cycled.
    pub fn segment_value(&self, i: usize) -> Result<f64> {
        if self.values.len() == 1 {
            return Ok(self.values[0]);
        }
        self.values.get(i).copied().ok_or_else(|| {
            RadiatorError::InvalidParameter {
                param: "color_values".to_string(),
                message: format!(
                    "{} color values for {} segments; provide one value, or at least one per segment",
                    self.values.len(),
                    self.segments.len()
                ),
            }
        })
    }

    /// The mapped RGBA color for segment `i`, or `None` when the value has no
    /// position on the normalization scale.
    pub fn segment_color(&self, i: usize) -> Result<Option<[u8; 4]>> {
        let value = self.segment_value(i)?;
        Ok(self
            .norm
            .normalize(value)
            .map(|t| self.colormap.map_normalized(t)))
    }
}

/// Draw a polyline through `(x, y)` with per-segment colors onto `axes`.
///
/// Builds the segment list, resolves `color` into a value array, and pushes
/// the resulting collection onto the axes. Returns a mutable handle to the
/// stored collection so the caller can adjust it further (draw order, opacity,
/// colormap).
pub fn colorline<'a>(
    axes: &'a mut Axes,
    x: &[f64],
    y: &[f64],
    color: ColorSpec,
    params: ColorlineParams,
) -> Result<&'a mut LineCollection> {
    let segments = make_segments(x, y)?;
    let values = color.resolve(x.len());
    let colormap = get_colormap(&params.colormap)?;

    let collection = LineCollection::new(
        segments,
        values,
        colormap,
        params.norm,
        params.line_width,
        params.alpha,
    );

    Ok(axes.add_collection(collection))
}
