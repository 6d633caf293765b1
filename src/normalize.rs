//! Value normalization for colormap lookup.
//!
//! A normalization maps raw data values into `[0, 1]` so a colormap can turn
//! them into display colors. Linear and logarithmic scales are supported.

use serde::{Deserialize, Serialize};

use crate::error::{RadiatorError, Result};

/// Mapping of raw data values into the `[0, 1]` colormap domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scale", rename_all = "lowercase")]
pub enum Normalization {
    /// Linear mapping between `vmin` and `vmax`
    Linear { vmin: f64, vmax: f64 },
    /// Logarithmic mapping between `vmin` and `vmax` (both must be positive)
    Log { vmin: f64, vmax: f64 },
}

impl Normalization {
    /// Create a linear normalization over `[vmin, vmax]`.
    pub fn linear(vmin: f64, vmax: f64) -> Result<Self> {
        if !(vmax > vmin) {
            return Err(RadiatorError::Normalization {
                message: format!("vmax ({}) must be greater than vmin ({})", vmax, vmin),
            });
        }
        Ok(Self::Linear { vmin, vmax })
    }

    /// Create a logarithmic normalization over `[vmin, vmax]`.
    pub fn log(vmin: f64, vmax: f64) -> Result<Self> {
        if vmin <= 0.0 {
            return Err(RadiatorError::Normalization {
                message: format!("log scale requires positive vmin, got {}", vmin),
            });
        }
        if !(vmax > vmin) {
            return Err(RadiatorError::Normalization {
                message: format!("vmax ({}) must be greater than vmin ({})", vmax, vmin),
            });
        }
        Ok(Self::Log { vmin, vmax })
    }

    /// Map a raw value into `[0, 1]`, clamped at the range ends.
    ///
    /// Returns `None` for values that have no position on the scale:
    /// non-finite input, and non-positive input under a log scale. Renderers
    /// blank such values rather than drawing them.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }

        match *self {
            Self::Linear { vmin, vmax } => {
                Some(((value - vmin) / (vmax - vmin)).clamp(0.0, 1.0))
            }
            Self::Log { vmin, vmax } => {
                if value <= 0.0 {
                    return None;
                }
                let t = (value.ln() - vmin.ln()) / (vmax.ln() - vmin.ln());
                Some(t.clamp(0.0, 1.0))
            }
        }
    }

    /// The lower end of the normalization range.
    pub fn vmin(&self) -> f64 {
        match *self {
            Self::Linear { vmin, .. } | Self::Log { vmin, .. } => vmin,
        }
    }

    /// The upper end of the normalization range.
    pub fn vmax(&self) -> f64 {
        match *self {
            Self::Linear { vmax, .. } | Self::Log { vmax, .. } => vmax,
        }
    }
}

impl Default for Normalization {
    /// The unit interval, linearly.
    fn default() -> Self {
        Self::Linear {
            vmin: 0.0,
            vmax: 1.0,
        }
    }
}
