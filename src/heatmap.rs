//! 2D heatmap rendering with a horizontal colorbar.
//!
//! [`plot2d`] composes a complete heatmap figure: an image panel showing a 2D
//! array through a colormap with logarithmic or linear normalization, and a
//! horizontal colorbar above it. The composed [`Figure`] is returned for the
//! caller to render or save.

use std::str::FromStr;

use ndarray::Array2;
use tracing::debug;

use crate::axes::{decade_ticks, linear_ticks};
use crate::colormaps::{get_colormap, Colormap};
use crate::error::{RadiatorError, Result};
use crate::figure::Figure;
use crate::normalize::Normalization;
use crate::style::{FigureStyle, LayoutMode, Palette};

/// Resampling method used when the image panel resolution differs from the
/// data resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resampling {
    /// Each pixel takes the value of the closest data cell
    #[default]
    Nearest,
    /// Each pixel blends the four surrounding data cells
    Bilinear,
}

impl Resampling {
    /// Sample the data array at fractional (row, col) indices.
    pub fn sample(&self, data: &Array2<f32>, row: f64, col: f64) -> f32 {
        let (rows, cols) = data.dim();
        if rows == 0 || cols == 0 {
            return f32::NAN;
        }

        match self {
            Self::Nearest => {
                let r = (row.round().max(0.0) as usize).min(rows - 1);
                let c = (col.round().max(0.0) as usize).min(cols - 1);
                data[[r, c]]
            }
            Self::Bilinear => {
                let r0 = (row.floor().max(0.0) as usize).min(rows - 1);
                let c0 = (col.floor().max(0.0) as usize).min(cols - 1);
                let r1 = (r0 + 1).min(rows - 1);
                let c1 = (c0 + 1).min(cols - 1);

                let fr = (row - r0 as f64).clamp(0.0, 1.0) as f32;
                let fc = (col - c0 as f64).clamp(0.0, 1.0) as f32;

                let top = data[[r0, c0]] * (1.0 - fc) + data[[r0, c1]] * fc;
                let bottom = data[[r1, c0]] * (1.0 - fc) + data[[r1, c1]] * fc;
                top * (1.0 - fr) + bottom * fr
            }
        }
    }
}

impl FromStr for Resampling {
    type Err = RadiatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "bilinear" => Ok(Self::Bilinear),
            other => Err(RadiatorError::InvalidParameter {
                param: "resampling".to_string(),
                message: format!(
                    "Unknown resampling method: {}. Valid values are 'nearest', 'bilinear'",
                    other
                ),
            }),
        }
    }
}

/// A 2D data array drawn as an image through a colormap.
pub struct HeatmapLayer {
    data: Array2<f32>,
    /// Normalization into the colormap domain
    pub norm: Normalization,
    colormap: Box<dyn Colormap>,
    /// Resampling method for the pixel loop
    pub resampling: Resampling,
}

impl HeatmapLayer {
    pub fn new(
        data: Array2<f32>,
        norm: Normalization,
        colormap: Box<dyn Colormap>,
        resampling: Resampling,
    ) -> Self {
        Self {
            data,
            norm,
            colormap,
            resampling,
        }
    }

    pub fn data(&self) -> &Array2<f32> {
        &self.data
    }

    pub fn colormap(&self) -> &dyn Colormap {
        self.colormap.as_ref()
    }

    /// The RGBA color of the data cell nearest to fractional (row, col), or
    /// `None` when the sampled value has no position on the scale.
    pub fn color_at(&self, row: f64, col: f64) -> Option<[u8; 4]> {
        let value = self.resampling.sample(&self.data, row, col);
        self.norm
            .normalize(value as f64)
            .map(|t| self.colormap.map_normalized(t))
    }
}

/// A horizontal colorbar drawn above the image panel.
pub struct Colorbar {
    colormap: Box<dyn Colormap>,
    /// Normalization shared with the image layer
    pub norm: Normalization,
    /// Colorbar label text
    pub label: String,
    /// Tick positions in data units
    pub ticks: Vec<f64>,
    /// Tick labels, parallel to `ticks`
    pub tick_labels: Vec<String>,
    /// Bar height as a fraction of the figure height
    pub size_frac: f32,
    /// Gap between the bar and the image panel, as a fraction of the figure
    /// height
    pub pad_frac: f32,
}

impl Colorbar {
    pub fn new(colormap: Box<dyn Colormap>, norm: Normalization, label: String) -> Self {
        Self {
            colormap,
            norm,
            label,
            ticks: Vec::new(),
            tick_labels: Vec::new(),
            size_frac: 0.05,
            pad_frac: 0.0,
        }
    }

    pub fn colormap(&self) -> &dyn Colormap {
        self.colormap.as_ref()
    }

    /// Tick positions as fractions along the bar, skipping ticks outside the
    /// normalization range.
    pub fn tick_fractions(&self) -> Vec<f64> {
        self.ticks
            .iter()
            .filter_map(|&t| self.norm.normalize(t))
            .collect()
    }
}

/// Parameters for [`plot2d`].
#[derive(Debug, Clone)]
pub struct HeatmapParams {
    /// Lower end of the color scale
    pub zmin: f64,
    /// Upper end of the color scale
    pub zmax: f64,
    /// Colorbar label
    pub title: String,
    /// Label below the image panel
    pub xlabel: String,
    /// Logarithmic (true) or linear (false) normalization
    pub log_scale: bool,
    /// Literal colorbar tick values; empty selects scale-appropriate defaults
    pub colorbar_ticks: Vec<f64>,
    /// Colormap name
    pub colormap: String,
    /// Image panel resampling
    pub resampling: Resampling,
}

impl Default for HeatmapParams {
    fn default() -> Self {
        Self {
            zmin: 0.01,
            zmax: 10.0,
            title: String::new(),
            xlabel: String::new(),
            log_scale: true,
            colorbar_ticks: Vec::new(),
            colormap: "blues".to_string(),
            resampling: Resampling::Nearest,
        }
    }
}

/// Number of default colorbar ticks on a linear scale
const LINEAR_COLORBAR_TICKS: usize = 5;

/// Compose a heatmap figure: image panel plus horizontal colorbar on top.
///
/// The image panel has its ticks removed and carries only `xlabel`; the
/// colorbar carries `title` as its label. Custom `colorbar_ticks` replace the
/// default ticks, labeled as math-mode literals (`$v$`).
pub fn plot2d(data: Array2<f32>, params: &HeatmapParams, palette: Palette) -> Result<Figure> {
    let norm = if params.log_scale {
        Normalization::log(params.zmin, params.zmax)?
    } else {
        Normalization::linear(params.zmin, params.zmax)?
    };

    debug!(
        shape = ?data.dim(),
        zmin = params.zmin,
        zmax = params.zmax,
        log_scale = params.log_scale,
        colormap = %params.colormap,
        "Composing heatmap figure"
    );

    let style =
        FigureStyle::new(LayoutMode::Heatmap, palette).with_figure_size(3.375, 3.75);
    let mut figure = Figure::new(style)?;

    let axes = figure.axes_mut();
    axes.set_heatmap(HeatmapLayer::new(
        data,
        norm,
        get_colormap(&params.colormap)?,
        params.resampling,
    ));

    let (ticks, tick_labels) = if params.colorbar_ticks.is_empty() {
        let ticks = if params.log_scale {
            decade_ticks(params.zmin, params.zmax)
        } else {
            linear_ticks(params.zmin, params.zmax, LINEAR_COLORBAR_TICKS)
        };
        let labels = ticks.iter().map(|t| format!("{}", t)).collect();
        (ticks, labels)
    } else {
        let ticks = params.colorbar_ticks.clone();
        let labels = ticks.iter().map(|t| format!("${}$", t)).collect();
        (ticks, labels)
    };

    let mut colorbar = Colorbar::new(get_colormap(&params.colormap)?, norm, params.title.clone());
    colorbar.ticks = ticks;
    colorbar.tick_labels = tick_labels;
    axes.set_colorbar(colorbar);

    // Frameless image panel: no ticks, a single x label
    axes.x_axis.set_ticks(Vec::new());
    axes.y_axis.set_ticks(Vec::new());
    axes.x_axis.label = params.xlabel.clone();
    axes.y_axis.label.clear();

    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn demo_data() -> Array2<f32> {
        array![[0.01, 0.1], [1.0, 10.0]]
    }

    #[test]
    fn test_plot2d_composition() {
        let figure = plot2d(demo_data(), &HeatmapParams::default(), Palette::Light).unwrap();
        let axes = figure.axes();

        assert!(axes.heatmap().is_some());
        assert!(axes.colorbar().is_some());
        assert!(axes.x_axis.ticks.is_empty());
        assert!(axes.y_axis.ticks.is_empty());
    }

    #[test]
    fn test_plot2d_default_log_ticks_are_decades() {
        let figure = plot2d(demo_data(), &HeatmapParams::default(), Palette::Light).unwrap();
        let colorbar = figure.axes().colorbar().unwrap();

        assert_eq!(colorbar.ticks, vec![0.01, 0.1, 1.0, 10.0]);
        assert_eq!(colorbar.tick_labels.len(), 4);
    }

    #[test]
    fn test_plot2d_custom_ticks_math_mode() {
        let params = HeatmapParams {
            colorbar_ticks: vec![0.1, 1.0, 5.0],
            ..Default::default()
        };
        let figure = plot2d(demo_data(), &params, Palette::Light).unwrap();
        let colorbar = figure.axes().colorbar().unwrap();

        assert_eq!(colorbar.ticks, vec![0.1, 1.0, 5.0]);
        assert_eq!(colorbar.tick_labels, vec!["$0.1$", "$1$", "$5$"]);
    }

    #[test]
    fn test_plot2d_linear_scale() {
        let params = HeatmapParams {
            zmin: 0.0,
            zmax: 8.0,
            log_scale: false,
            ..Default::default()
        };
        let figure = plot2d(demo_data(), &params, Palette::Light).unwrap();
        let colorbar = figure.axes().colorbar().unwrap();

        assert_eq!(colorbar.ticks, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_plot2d_log_scale_rejects_nonpositive_zmin() {
        let params = HeatmapParams {
            zmin: 0.0,
            ..Default::default()
        };
        assert!(plot2d(demo_data(), &params, Palette::Light).is_err());
    }

    #[test]
    fn test_plot2d_labels() {
        let params = HeatmapParams {
            title: "density".to_string(),
            xlabel: "$x$".to_string(),
            ..Default::default()
        };
        let figure = plot2d(demo_data(), &params, Palette::Dark).unwrap();

        assert_eq!(figure.axes().colorbar().unwrap().label, "density");
        assert_eq!(figure.axes().x_axis.label, "$x$");
        assert!(figure.axes().y_axis.label.is_empty());
    }

    #[test]
    fn test_nearest_sampling() {
        let data = demo_data();
        assert_eq!(Resampling::Nearest.sample(&data, 0.0, 0.0), 0.01);
        assert_eq!(Resampling::Nearest.sample(&data, 0.9, 1.1), 10.0);
        // Clamped outside the grid
        assert_eq!(Resampling::Nearest.sample(&data, -3.0, 5.0), 0.1);
    }

    #[test]
    fn test_bilinear_sampling() {
        let data = array![[0.0, 1.0], [2.0, 3.0]];
        assert_eq!(Resampling::Bilinear.sample(&data, 0.0, 0.5), 0.5);
        assert_eq!(Resampling::Bilinear.sample(&data, 0.5, 0.0), 1.0);
        assert_eq!(Resampling::Bilinear.sample(&data, 0.5, 0.5), 1.5);
    }

    #[test]
    fn test_resampling_parsing() {
        assert_eq!("nearest".parse::<Resampling>().unwrap(), Resampling::Nearest);
        assert_eq!("Bilinear".parse::<Resampling>().unwrap(), Resampling::Bilinear);
        assert!("bicubic".parse::<Resampling>().is_err());
    }

    #[test]
    fn test_colorbar_tick_fractions() {
        let norm = Normalization::log(0.01, 10.0).unwrap();
        let mut colorbar = Colorbar::new(get_colormap("blues").unwrap(), norm, String::new());
        colorbar.ticks = vec![0.01, 10.0];

        let fractions = colorbar.tick_fractions();
        assert_eq!(fractions, vec![0.0, 1.0]);
    }

    #[test]
    fn test_heatmap_layer_blank_cells() {
        let data = array![[1.0, -1.0], [f32::NAN, 10.0]];
        let layer = HeatmapLayer::new(
            data,
            Normalization::log(0.1, 10.0).unwrap(),
            get_colormap("blues").unwrap(),
            Resampling::Nearest,
        );

        assert!(layer.color_at(0.0, 0.0).is_some());
        // Negative and NaN cells have no color
        assert!(layer.color_at(0.0, 1.0).is_none());
        assert!(layer.color_at(1.0, 0.0).is_none());
    }
}
