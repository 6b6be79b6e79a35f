//! Regular rectangular sampling grid of a scalar potential.
//!
//! A `Grid` stores `nx` X coordinates, `ny` Y coordinates and `nx * ny`
//! samples in row-major layout: the sample at column `i`, row `j` is the
//! potential at `(xs[i], ys[j])`. Grids are immutable once built; any change
//! to the charges or the domain means building a new one.

use crate::domain::{linspace, Domain, Resolution};
use crate::error::FieldError;
use crate::field_source::FieldSource;
use tracing::debug;

/// Potential samples on a rectilinear grid with strictly increasing axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    xs: Vec<f64>,
    ys: Vec<f64>,
    values: Vec<f64>,
}

impl Grid {
    /// Samples `source` at every node of an evenly spaced grid over `domain`.
    ///
    /// Rows are evaluated bottom to top and columns left to right, so the
    /// same inputs always give bit-identical samples.
    ///
    /// Returns `FieldError::InvalidResolution` or `FieldError::InvalidDomain`
    /// for malformed input.
    pub fn sample<S: FieldSource + ?Sized>(
        domain: &Domain,
        resolution: Resolution,
        source: &S,
    ) -> Result<Self, FieldError> {
        resolution.validate()?;
        domain.validate()?;

        let xs = linspace(domain.x_min, domain.x_max, resolution.nx);
        let ys = linspace(domain.y_min, domain.y_max, resolution.ny);
        let values = ys
            .iter()
            .flat_map(|&y| xs.iter().map(move |&x| source.potential(x, y)))
            .collect();

        debug!(nx = resolution.nx, ny = resolution.ny, "potential grid sampled");
        Ok(Self { xs, ys, values })
    }

    /// Assembles a grid from caller-provided axes and row-major samples.
    ///
    /// Both axes need at least two finite, strictly increasing values, and
    /// `values.len()` must equal `xs.len() * ys.len()`.
    pub fn from_samples(xs: Vec<f64>, ys: Vec<f64>, values: Vec<f64>) -> Result<Self, FieldError> {
        check_axis("x", &xs)?;
        check_axis("y", &ys)?;
        let expected = xs
            .len()
            .checked_mul(ys.len())
            .ok_or(FieldError::InvalidResolution {
                nx: xs.len(),
                ny: ys.len(),
            })?;
        if values.len() != expected {
            return Err(FieldError::DimensionMismatch {
                expected_w: xs.len(),
                expected_h: ys.len(),
                got: values.len(),
            });
        }
        Ok(Self { xs, ys, values })
    }

    /// Number of columns.
    pub fn nx(&self) -> usize {
        self.xs.len()
    }

    /// Number of rows.
    pub fn ny(&self) -> usize {
        self.ys.len()
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Read-only access to the row-major samples.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sample at column `i`, row `j`.
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.nx() && j < self.ny(), "grid index ({i}, {j}) out of range");
        self.values[j * self.nx() + i]
    }

    /// Samples of row `j`, left to right.
    pub fn row(&self, j: usize) -> &[f64] {
        let w = self.nx();
        &self.values[j * w..(j + 1) * w]
    }

    /// Iterates over all nodes yielding `(i, j, x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64, f64, f64)> + '_ {
        self.values.iter().enumerate().map(|(k, &v)| {
            let i = k % self.nx();
            let j = k / self.nx();
            (i, j, self.xs[i], self.ys[j], v)
        })
    }
}

fn check_axis(name: &str, axis: &[f64]) -> Result<(), FieldError> {
    if axis.len() < 2 {
        return Err(FieldError::InvalidAxis(format!(
            "{name} axis needs at least 2 values, got {}",
            axis.len()
        )));
    }
    if axis.iter().any(|v| !v.is_finite()) {
        return Err(FieldError::InvalidAxis(format!("{name} axis has non-finite values")));
    }
    if axis.windows(2).any(|w| w[0] >= w[1]) {
        return Err(FieldError::InvalidAxis(format!(
            "{name} axis is not strictly increasing"
        )));
    }
    Ok(())
}
