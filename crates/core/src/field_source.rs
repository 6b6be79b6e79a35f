//! Field model: potential and electric field of a set of point charges.
//!
//! A [`FieldSource`] returns the scalar potential and the field vector at any
//! point in the plane. [`ChargeField`] implements it by direct superposition
//! over a borrowed charge list. Squared distances are floored at
//! [`MIN_DISTANCE_SQUARED`], so sampling exactly on a charge yields a large
//! finite value instead of a division by zero. That value is an
//! approximation, not a physical result.
//!
//! All implementations are deterministic: same inputs = same output.

use crate::charge::Charge;
use crate::error::FieldError;
use glam::DVec2;

/// Floor applied to squared charge distances before roots and cubes.
pub const MIN_DISTANCE_SQUARED: f64 = 1e-12;

/// A source of scalar potential and field vectors in the plane.
pub trait FieldSource: Send + Sync {
    /// Scalar potential at `(x, y)`.
    fn potential(&self, x: f64, y: f64) -> f64;

    /// Field vector `(Ex, Ey)` at `(x, y)`.
    fn field(&self, x: f64, y: f64) -> DVec2;

    /// Distance from `(x, y)` to the nearest point where the source is
    /// singular. Smooth sources report infinity.
    fn singularity_distance(&self, _x: f64, _y: f64) -> f64 {
        f64::INFINITY
    }
}

/// Superposition of point-charge contributions.
///
/// Borrows the caller's charges for the duration of one sampling pass.
#[derive(Debug, Clone, Copy)]
pub struct ChargeField<'a> {
    charges: &'a [Charge],
}

impl<'a> ChargeField<'a> {
    /// Wraps a charge list.
    ///
    /// Returns `FieldError::EmptyCharges` for an empty list and
    /// `FieldError::NonFinite` if any charge has a NaN or infinite parameter.
    pub fn new(charges: &'a [Charge]) -> Result<Self, FieldError> {
        if charges.is_empty() {
            return Err(FieldError::EmptyCharges);
        }
        charges.iter().try_for_each(Charge::validate)?;
        Ok(Self { charges })
    }

}

impl FieldSource for ChargeField<'_> {
    fn potential(&self, x: f64, y: f64) -> f64 {
        let p = DVec2::new(x, y);
        self.charges.iter().fold(0.0, |sum, c| {
            let r2 = p.distance_squared(c.position()).max(MIN_DISTANCE_SQUARED);
            sum + c.q / r2.sqrt()
        })
    }

    fn field(&self, x: f64, y: f64) -> DVec2 {
        let p = DVec2::new(x, y);
        self.charges.iter().fold(DVec2::ZERO, |e, c| {
            let d = p - c.position();
            let r2 = d.length_squared().max(MIN_DISTANCE_SQUARED);
            e + d * (c.q / (r2 * r2.sqrt()))
        })
    }

    /// Euclidean distance to the closest charge.
    fn singularity_distance(&self, x: f64, y: f64) -> f64 {
        let p = DVec2::new(x, y);
        self.charges
            .iter()
            .map(|c| p.distance(c.position()))
            .fold(f64::INFINITY, f64::min)
    }
}

fn check_query(x: f64, y: f64) -> Result<(), FieldError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(FieldError::NonFinite(format!("query point ({x}, {y})")))
    }
}

/// Potential of `charges` at `(x, y)`.
///
/// Rejects an empty charge list and non-finite input.
pub fn compute_potential(charges: &[Charge], x: f64, y: f64) -> Result<f64, FieldError> {
    check_query(x, y)?;
    Ok(ChargeField::new(charges)?.potential(x, y))
}

/// Field vector of `charges` at `(x, y)`.
///
/// Rejects an empty charge list and non-finite input.
pub fn compute_field(charges: &[Charge], x: f64, y: f64) -> Result<DVec2, FieldError> {
    check_query(x, y)?;
    Ok(ChargeField::new(charges)?.field(x, y))
}
