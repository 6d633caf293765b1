//! Figure style configuration.
//!
//! Publication figures share a small set of style decisions: fonts and tick
//! sizes, DPI, foreground/background colors, a color cycle, and subplot
//! margins tuned per plot type. [`FigureStyle`] captures those decisions as an
//! explicit value built from a [`LayoutMode`] and a [`Palette`], passed to
//! [`Figure::new`](crate::figure::Figure::new) by the caller. Styles
//! round-trip through JSON for sharing between projects.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RadiatorError, Result};

/// Background/foreground palette selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// Black foreground elements on a white background
    Light,
    /// White foreground elements on a black background
    Dark,
}

impl FromStr for Palette {
    type Err = RadiatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "w" | "white" | "light" => Ok(Self::Light),
            "k" | "black" | "dark" => Ok(Self::Dark),
            other => Err(RadiatorError::InvalidParameter {
                param: "palette".to_string(),
                message: format!("Unknown palette: {}. Valid values are 'w' or 'k'", other),
            }),
        }
    }
}

/// Figure layout selection, tuned per plot type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Standard line plots
    Lines,
    /// Line plots with a second x-axis on top
    DoubleX,
    /// Heatmap images with minimal outer margins
    Heatmap,
}

impl FromStr for LayoutMode {
    type Err = RadiatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lines" => Ok(Self::Lines),
            "doublex" => Ok(Self::DoubleX),
            "heatmap" => Ok(Self::Heatmap),
            other => Err(RadiatorError::InvalidParameter {
                param: "mode".to_string(),
                message: format!(
                    "Unknown layout mode: {}. Valid values are 'lines', 'doublex', 'heatmap'",
                    other
                ),
            }),
        }
    }
}

/// An RGB color, serialized as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RadiatorError::Config {
                message: format!("Invalid hex color: {}", hex),
            });
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|e| RadiatorError::Config {
                message: format!("Invalid hex color {}: {}", hex, e),
            })
        };
        Ok(Self::new(parse(0..2)?, parse(2..4)?, parse(4..6)?))
    }

    /// The color as an opaque RGBA pixel.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = RadiatorError;

    fn try_from(value: String) -> Result<Self> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Axes rectangle expressed as fractions of the figure size.
///
/// `left`/`bottom` are the near edges and `right`/`top` the far edges, all
/// measured from the figure origin, so `left < right` and `bottom < top`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Margins {
    pub const fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }
}

// Palette color cycles: six accessible colors per background.
const LIGHT_CYCLE: [&str; 6] = [
    "#CC6677", "#117733", "#4477AA", "#DDCC77", "#88CCEE", "#AA4499",
];
const DARK_CYCLE: [&str; 6] = [
    "#809BC8", "#FF6666", "#64C204", "#FFCC66", "#FFFFCC", "#FFFFFF",
];

/// Complete figure style configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureStyle {
    /// Layout the margins are tuned for
    pub mode: LayoutMode,

    /// Background/foreground palette
    pub palette: Palette,

    /// Default line width in points
    #[serde(default = "default_line_width")]
    pub line_width: f32,

    /// Foreground color for drawn lines
    pub foreground: Rgb,

    /// Figure and axes background color
    pub background: Rgb,

    /// Axes edge (spine) color
    pub edge_color: Rgb,

    /// Axis label color
    pub label_color: Rgb,

    /// Tick mark and tick label color
    pub tick_color: Rgb,

    /// Color cycle applied to successive plot elements
    pub color_cycle: Vec<Rgb>,

    /// Whether axis labels are set in bold
    pub bold_labels: bool,

    /// Tick label size in points
    #[serde(default = "default_tick_label_size")]
    pub tick_label_size: f32,

    /// Raster resolution in dots per inch
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Figure size in inches (width, height)
    #[serde(default = "default_figure_size")]
    pub figure_size: (f32, f32),

    /// Axes rectangle within the figure
    pub margins: Margins,
}

impl FigureStyle {
    /// Build the style for a layout mode and palette.
    pub fn new(mode: LayoutMode, palette: Palette) -> Self {
        let (foreground, background, cycle, bold_labels) = match palette {
            Palette::Light => (Rgb::BLACK, Rgb::WHITE, &LIGHT_CYCLE, false),
            Palette::Dark => (Rgb::WHITE, Rgb::BLACK, &DARK_CYCLE, true),
        };

        let margins = match mode {
            LayoutMode::Lines => Margins::new(0.18, 0.95, 0.15, 0.95),
            LayoutMode::DoubleX => Margins::new(0.18, 0.95, 0.15, 0.85),
            LayoutMode::Heatmap => Margins::new(0.05, 0.95, 0.05, 0.95),
        };

        let color_cycle = cycle
            .iter()
            .map(|hex| Rgb::from_hex(hex).expect("static palette colors are valid hex"))
            .collect();

        Self {
            mode,
            palette,
            line_width: default_line_width(),
            foreground,
            background,
            edge_color: foreground,
            label_color: foreground,
            tick_color: foreground,
            color_cycle,
            bold_labels,
            tick_label_size: default_tick_label_size(),
            dpi: default_dpi(),
            figure_size: default_figure_size(),
            margins,
        }
    }

    /// Override the figure size in inches.
    pub fn with_figure_size(mut self, width: f32, height: f32) -> Self {
        self.figure_size = (width, height);
        self
    }

    /// Raster dimensions in pixels at the configured DPI.
    pub fn pixel_size(&self) -> (u32, u32) {
        let (w, h) = self.figure_size;
        (
            (w * self.dpi as f32).round() as u32,
            (h * self.dpi as f32).round() as u32,
        )
    }

    /// Load a style from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let style: FigureStyle = serde_json::from_str(&content)?;
        style.validate()?;
        Ok(style)
    }

    /// Save the style to a JSON file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the style configuration.
    pub fn validate(&self) -> Result<()> {
        let m = &self.margins;
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !(in_unit(m.left) && in_unit(m.right) && in_unit(m.bottom) && in_unit(m.top)) {
            return Err(RadiatorError::Config {
                message: "Margins must be fractions in [0, 1]".to_string(),
            });
        }
        if m.left >= m.right || m.bottom >= m.top {
            return Err(RadiatorError::Config {
                message: format!(
                    "Margins must leave a positive axes area: left={} right={} bottom={} top={}",
                    m.left, m.right, m.bottom, m.top
                ),
            });
        }

        if self.dpi == 0 {
            return Err(RadiatorError::Config {
                message: "DPI must be positive".to_string(),
            });
        }

        if !(self.line_width > 0.0) {
            return Err(RadiatorError::Config {
                message: format!("Line width must be positive, got {}", self.line_width),
            });
        }

        if self.figure_size.0 <= 0.0 || self.figure_size.1 <= 0.0 {
            return Err(RadiatorError::Config {
                message: format!(
                    "Figure size must be positive, got {:?}",
                    self.figure_size
                ),
            });
        }

        if self.color_cycle.is_empty() {
            return Err(RadiatorError::Config {
                message: "Color cycle cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self::new(LayoutMode::Lines, Palette::Light)
    }
}

// Default value functions for serde
fn default_line_width() -> f32 {
    2.0
}

fn default_tick_label_size() -> f32 {
    10.0
}

fn default_dpi() -> u32 {
    300
}

fn default_figure_size() -> (f32, f32) {
    (3.375, 3.375)
}
