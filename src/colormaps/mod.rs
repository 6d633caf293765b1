//! Colormap implementations for figure rendering.
//!
//! Matplotlib-style colormaps, backed by `colorgrad` gradients.

pub mod colormap;

pub use colormap::{get_colormap, Colormap, GradientColormap};
