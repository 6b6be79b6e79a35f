//! Sampling domain and grid resolution.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in field space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Domain {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Rejects non-finite bounds and empty or inverted spans.
    pub fn validate(&self) -> Result<(), FieldError> {
        let bounds = [self.x_min, self.x_max, self.y_min, self.y_max];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(FieldError::InvalidDomain(format!(
                "non-finite bounds {bounds:?}"
            )));
        }
        if self.x_min >= self.x_max {
            return Err(FieldError::InvalidDomain(format!(
                "x_min {} must be below x_max {}",
                self.x_min, self.x_max
            )));
        }
        if self.y_min >= self.y_max {
            return Err(FieldError::InvalidDomain(format!(
                "y_min {} must be below y_max {}",
                self.y_min, self.y_max
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

}

impl Default for Domain {
    /// The reference view: `[-3, 3] x [-2, 3]`.
    fn default() -> Self {
        Self::new(-3.0, 3.0, -2.0, 3.0)
    }
}

/// Upper bound on `nx * ny` for one sampling pass.
pub const MAX_GRID_SAMPLES: usize = 1 << 24;

/// Number of grid samples along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub nx: usize,
    pub ny: usize,
}

impl Resolution {
    pub fn new(nx: usize, ny: usize) -> Self {
        Self { nx, ny }
    }

    /// Returns `FieldError::InvalidResolution` if either axis has fewer than
    /// two samples or the grid would exceed [`MAX_GRID_SAMPLES`].
    pub fn validate(&self) -> Result<(), FieldError> {
        let too_large = self
            .nx
            .checked_mul(self.ny)
            .map_or(true, |n| n > MAX_GRID_SAMPLES);
        if self.nx < 2 || self.ny < 2 || too_large {
            return Err(FieldError::InvalidResolution {
                nx: self.nx,
                ny: self.ny,
            });
        }
        Ok(())
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::new(150, 150)
    }
}

/// `count` evenly spaced values from `min` to `max`, both inclusive.
///
/// `count` must be at least 2.
pub(crate) fn linspace(min: f64, max: f64, count: usize) -> Vec<f64> {
    let last = (count - 1) as f64;
    (0..count)
        .map(|i| min + (max - min) * i as f64 / last)
        .collect()
}
