//! Evenly spaced contour levels.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};

/// `count` potential levels spread evenly from `min` to `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelRange {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl LevelRange {
    pub fn new(min: f64, max: f64, count: usize) -> Self {
        Self { min, max, count }
    }

    /// Rejects non-finite bounds. `min > max` is allowed and yields a
    /// descending sequence.
    pub fn validate(&self) -> Result<(), FieldError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(FieldError::InvalidLevels(format!(
                "non-finite bounds [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// The level values in ascending index order, `min + k * (max - min) / (count - 1)`.
    ///
    /// A single level is `min`; zero levels is an empty list.
    pub fn levels(&self) -> Vec<f64> {
        match self.count {
            0 => Vec::new(),
            1 => vec![self.min],
            n => {
                let span = self.max - self.min;
                let last = (n - 1) as f64;
                // scale before dividing; the top level is not forced to `max`
                (0..n).map(|k| self.min + k as f64 * span / last).collect()
            }
        }
    }
}

impl Default for LevelRange {
    fn default() -> Self {
        Self::new(-5.0, 5.0, 12)
    }
}
