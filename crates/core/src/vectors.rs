//! Field-direction arrows sampled on a regular lattice.
//!
//! Arrow lengths are scaled by field magnitude relative to the strongest
//! sampled field, clamped from below so weak regions stay visible. Anchors
//! too close to a charge are skipped because the field there dwarfs
//! everything else.

use crate::domain::Domain;
use crate::error::FieldError;
use crate::field_source::FieldSource;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fields weaker than this produce no arrow.
pub const MIN_FIELD_MAGNITUDE: f64 = 1e-6;

/// Slack on the upper domain bound when laying out anchors.
const ANCHOR_SLACK: f64 = 1e-9;

/// Upper bound on anchors along either axis of the lattice.
pub const MAX_ANCHORS_PER_AXIS: u32 = 4096;

/// Layout and scaling of the arrow lattice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VectorSettings {
    /// Lattice spacing along both axes.
    pub step: f64,
    /// Anchors closer than this to any charge are skipped.
    pub exclusion_radius: f64,
    /// Lower bound on arrow length.
    pub min_length: f64,
    /// Length of the arrow at the strongest sampled field.
    pub max_length: f64,
}

impl Default for VectorSettings {
    fn default() -> Self {
        Self {
            step: 0.3,
            exclusion_radius: 0.2,
            min_length: 0.08,
            max_length: 0.35,
        }
    }
}

impl VectorSettings {
    pub fn validate(&self) -> Result<(), FieldError> {
        let all = [self.step, self.exclusion_radius, self.min_length, self.max_length];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(FieldError::InvalidSettings(format!("non-finite value in {all:?}")));
        }
        if self.step <= 0.0 {
            return Err(FieldError::InvalidSettings(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if self.exclusion_radius < 0.0 || self.min_length < 0.0 {
            return Err(FieldError::InvalidSettings(
                "exclusion radius and minimum length must be non-negative".into(),
            ));
        }
        if self.min_length > self.max_length {
            return Err(FieldError::InvalidSettings(format!(
                "min_length {} exceeds max_length {}",
                self.min_length, self.max_length
            )));
        }
        Ok(())
    }
}

/// One field-direction arrow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    /// Lattice point the arrow starts at.
    pub origin: DVec2,
    /// Displacement from origin to tip, parallel to the field.
    pub delta: DVec2,
    /// Field magnitude at the origin.
    pub magnitude: f64,
}

impl Arrow {
    pub fn tip(&self) -> DVec2 {
        self.origin + self.delta
    }
}

fn anchors(min: f64, max: f64, step: f64) -> Vec<f64> {
    (0..=MAX_ANCHORS_PER_AXIS)
        .map(|a| min + f64::from(a) * step)
        .take_while(|v| *v <= max + ANCHOR_SLACK)
        .collect()
}

/// Arrows for `source` on a `settings.step` lattice over `domain`.
///
/// Anchors are visited column by column (x outer, y inner). Anchors within
/// `settings.exclusion_radius` of a singularity of the source are skipped.
/// A step that would lay out more than [`MAX_ANCHORS_PER_AXIS`] anchors
/// along either axis is rejected.
pub fn field_arrows<S: FieldSource + ?Sized>(
    source: &S,
    domain: &Domain,
    settings: &VectorSettings,
) -> Result<Vec<Arrow>, FieldError> {
    domain.validate()?;
    settings.validate()?;
    let per_axis = domain.width().max(domain.height()) / settings.step;
    if per_axis >= f64::from(MAX_ANCHORS_PER_AXIS) {
        return Err(FieldError::InvalidSettings(format!(
            "step {} lays out more than {MAX_ANCHORS_PER_AXIS} anchors per axis",
            settings.step
        )));
    }

    let xs = anchors(domain.x_min, domain.x_max, settings.step);
    let ys = anchors(domain.y_min, domain.y_max, settings.step);

    let samples: Vec<(DVec2, DVec2)> = xs
        .iter()
        .flat_map(|&x| ys.iter().map(move |&y| DVec2::new(x, y)))
        .filter(|p| source.singularity_distance(p.x, p.y) >= settings.exclusion_radius)
        .map(|p| (p, source.field(p.x, p.y)))
        .collect();

    let max_magnitude = samples
        .iter()
        .map(|(_, e)| e.length())
        .fold(0.0, f64::max);

    let arrows: Vec<Arrow> = samples
        .into_iter()
        .filter_map(|(origin, e)| {
            let magnitude = e.length();
            if magnitude < MIN_FIELD_MAGNITUDE {
                return None;
            }
            let length = (settings.max_length * magnitude / max_magnitude).max(settings.min_length);
            Some(Arrow {
                origin,
                delta: e / magnitude * length,
                magnitude,
            })
        })
        .collect();

    debug!(
        anchors = xs.len() * ys.len(),
        arrows = arrows.len(),
        max_magnitude,
        "field arrows sampled"
    );
    Ok(arrows)
}
