//! Axes state: tick positions and labels, spines, limits, and plot content.
//!
//! An [`Axes`] is the explicit drawing context every operation mutates. It
//! owns the line collections, an optional heatmap layer with its colorbar,
//! per-axis tick state and spine visibility. Rendering walks this state; see
//! [`Figure`](crate::figure::Figure).

use crate::collection::LineCollection;
use crate::error::{RadiatorError, Result};
use crate::heatmap::{Colorbar, HeatmapLayer};

/// Axis selector for operations that target one of the two axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    X,
    Y,
}

/// Tick and label state for a single axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Tick positions in data coordinates
    pub ticks: Vec<f64>,
    /// Tick labels, parallel to `ticks`
    pub tick_labels: Vec<String>,
    /// Axis label text
    pub label: String,
    /// Whether tick marks and labels are drawn
    pub visible: bool,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            ticks: Vec::new(),
            tick_labels: Vec::new(),
            label: String::new(),
            visible: true,
        }
    }
}

impl Axis {
    /// Set tick positions, regenerating plain numeric labels.
    pub fn set_ticks(&mut self, positions: Vec<f64>) {
        self.tick_labels = positions.iter().map(|p| format!("{}", p)).collect();
        self.ticks = positions;
    }

    /// Replace the tick labels, keeping positions.
    pub fn set_tick_labels(&mut self, labels: Vec<String>) {
        self.tick_labels = labels;
    }
}

/// Visibility of the four axes border lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spines {
    pub left: bool,
    pub right: bool,
    pub bottom: bool,
    pub top: bool,
}

impl Default for Spines {
    fn default() -> Self {
        Self {
            left: true,
            right: true,
            bottom: true,
            top: true,
        }
    }
}

impl Spines {
    pub fn set_all(&mut self, visible: bool) {
        self.left = visible;
        self.right = visible;
        self.bottom = visible;
        self.top = visible;
    }

    pub fn any_visible(&self) -> bool {
        self.left || self.right || self.bottom || self.top
    }
}

/// The drawing context: plot content plus axis decoration state.
#[derive(Default)]
pub struct Axes {
    collections: Vec<LineCollection>,
    heatmap: Option<HeatmapLayer>,
    colorbar: Option<Colorbar>,
    /// Horizontal axis state
    pub x_axis: Axis,
    /// Vertical axis state
    pub y_axis: Axis,
    /// Border line visibility
    pub spines: Spines,
    x_limits: Option<(f64, f64)>,
    y_limits: Option<(f64, f64)>,
}

impl Axes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a collection, returning a mutable handle to the stored value.
    pub fn add_collection(&mut self, collection: LineCollection) -> &mut LineCollection {
        let index = self.collections.len();
        self.collections.push(collection);
        &mut self.collections[index]
    }

    pub fn collections(&self) -> &[LineCollection] {
        &self.collections
    }

    /// Attach a heatmap layer, replacing any existing one.
    pub fn set_heatmap(&mut self, layer: HeatmapLayer) {
        self.heatmap = Some(layer);
    }

    pub fn heatmap(&self) -> Option<&HeatmapLayer> {
        self.heatmap.as_ref()
    }

    /// Attach a colorbar, replacing any existing one.
    pub fn set_colorbar(&mut self, colorbar: Colorbar) {
        self.colorbar = Some(colorbar);
    }

    pub fn colorbar(&self) -> Option<&Colorbar> {
        self.colorbar.as_ref()
    }

    pub fn colorbar_mut(&mut self) -> Option<&mut Colorbar> {
        self.colorbar.as_mut()
    }

    /// Fix the x-axis data range; `None` reverts to auto-fitting.
    pub fn set_xlim(&mut self, limits: Option<(f64, f64)>) {
        self.x_limits = limits;
    }

    /// Fix the y-axis data range; `None` reverts to auto-fitting.
    pub fn set_ylim(&mut self, limits: Option<(f64, f64)>) {
        self.y_limits = limits;
    }

    pub fn x_limits(&self) -> Option<(f64, f64)> {
        self.x_limits
    }

    pub fn y_limits(&self) -> Option<(f64, f64)> {
        self.y_limits
    }

    /// Hide all axis decoration: both axes' ticks and labels, and all four
    /// spines, leaving a frameless plot area.
    pub fn clear_frame(&mut self) {
        self.x_axis.visible = false;
        self.y_axis.visible = false;
        self.spines.set_all(false);
    }

    /// Rewrite the selected axis' tick labels as LaTeX power-of-ten strings
    /// derived from the current tick positions.
    ///
    /// Positions exactly equal to 0.1, 1 and 10 keep literal labels (`$0.1$`,
    /// `$1$`, `$10$`); everything else becomes `$10^{e}$`.
    ///
    /// # Errors
    ///
    /// Any non-positive tick position is a domain error.
    pub fn fix_log_axis(&mut self, which: AxisKind) -> Result<()> {
        let axis = match which {
            AxisKind::X => &mut self.x_axis,
            AxisKind::Y => &mut self.y_axis,
        };
        axis.tick_labels = format_log_tick_labels(&axis.ticks)?;
        Ok(())
    }

    /// Bounding box of all collection segments, as (x_min, x_max, y_min,
    /// y_max). `None` when no segments exist.
    pub fn data_bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;

        for collection in &self.collections {
            for segment in collection.segments() {
                for point in [segment.start, segment.end] {
                    bounds = Some(match bounds {
                        None => (point[0], point[0], point[1], point[1]),
                        Some((x_min, x_max, y_min, y_max)) => (
                            x_min.min(point[0]),
                            x_max.max(point[0]),
                            y_min.min(point[1]),
                            y_max.max(point[1]),
                        ),
                    });
                }
            }
        }

        bounds
    }
}

/// Format log-scale tick labels for the given positions.
///
/// Exponents within 1e-9 of an integer snap to it before truncation, so
/// floating point noise in `log10` cannot shift a decade label.
pub fn format_log_tick_labels(positions: &[f64]) -> Result<Vec<String>> {
    positions
        .iter()
        .map(|&p| {
            if p <= 0.0 {
                return Err(RadiatorError::Normalization {
                    message: format!("log tick positions must be positive, got {}", p),
                });
            }

            if p == 1.0 {
                return Ok("$1$".to_string());
            }
            if p == 10.0 {
                return Ok("$10$".to_string());
            }
            if p == 0.1 {
                return Ok("$0.1$".to_string());
            }

            let exponent = p.log10();
            let snapped = if (exponent - exponent.round()).abs() < 1e-9 {
                exponent.round()
            } else {
                exponent.trunc()
            };
            Ok(format!("$10^{{{}}}$", snapped as i64))
        })
        .collect()
}

/// Powers of ten lying inside `[vmin, vmax]`, for log-scale tick placement.
pub fn decade_ticks(vmin: f64, vmax: f64) -> Vec<f64> {
    if vmin <= 0.0 || vmax <= vmin {
        return Vec::new();
    }

    let lo = vmin.log10().ceil() as i32;
    let hi = vmax.log10().floor() as i32;
    (lo..=hi).map(|e| 10f64.powi(e)).collect()
}

/// `n` evenly spaced tick positions across `[vmin, vmax]`.
pub fn linear_ticks(vmin: f64, vmax: f64, n: usize) -> Vec<f64> {
    crate::segments::linspace(vmin, vmax, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_log_axis_labels() {
        let mut axes = Axes::new();
        axes.x_axis.set_ticks(vec![0.1, 1.0, 10.0, 100.0]);
        axes.fix_log_axis(AxisKind::X).unwrap();

        assert_eq!(
            axes.x_axis.tick_labels,
            vec!["$0.1$", "$1$", "$10$", "$10^{2}$"]
        );
    }

    #[test]
    fn test_fix_log_axis_y() {
        let mut axes = Axes::new();
        axes.y_axis.set_ticks(vec![0.001, 0.01, 1000.0]);
        axes.fix_log_axis(AxisKind::Y).unwrap();

        assert_eq!(
            axes.y_axis.tick_labels,
            vec!["$10^{-3}$", "$10^{-2}$", "$10^{3}$"]
        );
    }

    #[test]
    fn test_fix_log_axis_rejects_nonpositive_positions() {
        let mut axes = Axes::new();
        axes.x_axis.set_ticks(vec![0.1, 0.0, 10.0]);
        assert!(axes.fix_log_axis(AxisKind::X).is_err());

        axes.x_axis.set_ticks(vec![-1.0]);
        assert!(axes.fix_log_axis(AxisKind::X).is_err());
    }

    #[test]
    fn test_clear_frame_hides_everything() {
        let mut axes = Axes::new();
        axes.x_axis.set_ticks(vec![0.0, 1.0]);
        assert!(axes.spines.any_visible());
        assert!(axes.x_axis.visible);

        axes.clear_frame();

        assert!(!axes.spines.any_visible());
        assert!(!axes.spines.left);
        assert!(!axes.spines.right);
        assert!(!axes.spines.bottom);
        assert!(!axes.spines.top);
        assert!(!axes.x_axis.visible);
        assert!(!axes.y_axis.visible);
    }

    #[test]
    fn test_set_ticks_generates_default_labels() {
        let mut axis = Axis::default();
        axis.set_ticks(vec![0.5, 1.0, 2.0]);
        assert_eq!(axis.tick_labels, vec!["0.5", "1", "2"]);
    }

    #[test]
    fn test_data_bounds_spans_all_collections() {
        use crate::collection::{colorline, ColorSpec, ColorlineParams};

        let mut axes = Axes::new();
        assert_eq!(axes.data_bounds(), None);

        colorline(
            &mut axes,
            &[0.0, 1.0],
            &[-2.0, 3.0],
            ColorSpec::Default,
            ColorlineParams::default(),
        )
        .unwrap();
        colorline(
            &mut axes,
            &[-5.0, 0.5],
            &[0.0, 1.0],
            ColorSpec::Default,
            ColorlineParams::default(),
        )
        .unwrap();

        assert_eq!(axes.data_bounds(), Some((-5.0, 1.0, -2.0, 3.0)));
    }

    #[test]
    fn test_decade_ticks() {
        assert_eq!(decade_ticks(0.01, 10.0), vec![0.01, 0.1, 1.0, 10.0]);
        assert_eq!(decade_ticks(0.02, 5.0), vec![0.1, 1.0]);
        assert!(decade_ticks(-1.0, 10.0).is_empty());
    }

    #[test]
    fn test_linear_ticks() {
        assert_eq!(linear_ticks(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
    }
}
