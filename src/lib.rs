//! # radiator
//!
//! Publication-quality styling and rendering helpers for 2D scientific
//! figures.
//!
//! This library provides the pieces a plotting script needs to produce
//! consistent publication figures: an explicit style configuration for light
//! and dark palettes, multi-colored polylines, logarithmic tick-label
//! formatting, and 2D heatmap rendering with a colorbar.
//!
//! ## Key Features
//!
//! - **Explicit figure styles**: fonts, tick sizes, DPI, color cycles and
//!   margins as a plain serializable value, no process-global state
//! - **Multi-colored lines**: polylines rendered as collections of
//!   independently colored segments
//! - **Matplotlib-inspired colormaps**: gradient-backed colormaps with linear
//!   and logarithmic normalization
//! - **Heatmaps with colorbars**: 2D arrays rendered through a colormap with
//!   a horizontal colorbar on top
//!
//! ## Architecture
//!
//! - **Style Layer**: [`FigureStyle`] built from a layout mode and palette
//! - **Content Layer**: [`Axes`] holding line collections, heatmap layers and
//!   tick/spine state
//! - **Raster Layer**: [`Figure::render`] walking that state into an
//!   `image::RgbaImage`

pub mod axes;
pub mod collection;
pub mod colormaps;
pub mod error;
pub mod figure;
pub mod heatmap;
pub mod logging;
pub mod normalize;
mod render;
pub mod segments;
pub mod style;

pub use axes::{format_log_tick_labels, Axes, Axis, AxisKind, Spines};
pub use collection::{colorline, ColorSpec, ColorlineParams, LineCollection};
pub use colormaps::{get_colormap, Colormap};
pub use error::{RadiatorError, Result};
pub use figure::Figure;
pub use heatmap::{plot2d, Colorbar, HeatmapLayer, HeatmapParams, Resampling};
pub use logging::{init_tracing, log_timed_operation};
pub use normalize::Normalization;
pub use segments::{linspace, make_segments, Segment};
pub use style::{FigureStyle, LayoutMode, Margins, Palette, Rgb};
