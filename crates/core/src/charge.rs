//! Point charges: the only input the field model reads.

use crate::error::FieldError;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A signed point charge at `(x, y)` in field space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub x: f64,
    pub y: f64,
    /// Signed magnitude. Zero is allowed and contributes nothing.
    pub q: f64,
}

impl Charge {
    pub fn new(x: f64, y: f64, q: f64) -> Self {
        Self { x, y, q }
    }

    /// Charge position as a vector.
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Rejects NaN or infinite position and magnitude.
    pub fn validate(&self) -> Result<(), FieldError> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(FieldError::NonFinite(format!(
                "charge position ({}, {})",
                self.x, self.y
            )));
        }
        if !self.q.is_finite() {
            return Err(FieldError::NonFinite(format!("charge magnitude {}", self.q)));
        }
        Ok(())
    }
}
