//! Colormap trait and the gradient-backed implementation.
//!
//! A colormap maps a normalized value in `[0, 1]` to a display color. All
//! built-in maps are `colorgrad` gradients, looked up by name.

use colorgrad::{Color, CustomGradient, Gradient};

use crate::error::{RadiatorError, Result};

/// Trait for color mapping implementations
pub trait Colormap: Send + Sync {
    /// Map a normalized value (0.0 to 1.0) to an RGBA color
    fn map_normalized(&self, value: f64) -> [u8; 4];

    /// Get the name of this colormap
    fn name(&self) -> &str;
}

/// A colormap backed by a `colorgrad` gradient.
pub struct GradientColormap {
    name: String,
    gradient: Gradient,
}

impl GradientColormap {
    pub fn new(name: impl Into<String>, gradient: Gradient) -> Self {
        Self {
            name: name.into(),
            gradient,
        }
    }
}

impl Colormap for GradientColormap {
    fn map_normalized(&self, value: f64) -> [u8; 4] {
        self.gradient.at(value.clamp(0.0, 1.0)).to_rgba8()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Get a colormap by name (case-insensitive)
pub fn get_colormap(name: &str) -> Result<Box<dyn Colormap>> {
    let key = name.to_lowercase();

    let gradient = match key.as_str() {
        "viridis" => colorgrad::viridis(),
        "plasma" => colorgrad::plasma(),
        "inferno" => colorgrad::inferno(),
        "magma" => colorgrad::magma(),
        "cividis" => colorgrad::cividis(),
        "turbo" => colorgrad::turbo(),
        "blues" => colorgrad::blues(),
        "greens" => colorgrad::greens(),
        "greys" => colorgrad::greys(),
        "oranges" => colorgrad::oranges(),
        "reds" => colorgrad::reds(),
        "rdbu" => colorgrad::rd_bu(),
        "spectral" => colorgrad::spectral(),
        "copper" => copper()?,
        _ => {
            return Err(RadiatorError::InvalidParameter {
                param: "colormap".to_string(),
                message: format!("Unknown colormap: {}", name),
            })
        }
    };

    Ok(Box::new(GradientColormap::new(key, gradient)))
}

/// Black-to-copper gradient, the default for multi-colored polylines.
fn copper() -> Result<Gradient> {
    CustomGradient::new()
        .colors(&[
            Color::from_rgba8(0, 0, 0, 255),
            Color::from_rgba8(255, 199, 127, 255),
        ])
        .build()
        .map_err(|e| RadiatorError::InvalidParameter {
            param: "colormap".to_string(),
            message: format!("Failed to build copper gradient: {}", e),
        })
}
