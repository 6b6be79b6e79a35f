#![deny(unsafe_code)]
//! Equipotential contour extraction.
//!
//! Samples the potential of a charge set on a regular grid, runs marching
//! squares once per requested level and stitches the resulting segments
//! into polylines. Every level is processed independently; nothing is shared
//! or cached between levels or between calls.

pub mod marching;
pub mod polyline;
pub mod stitch;

pub use marching::{extract_segments, CellCase, Edge, Segment};
pub use polyline::Polyline;
pub use stitch::stitch;

use equipotential_core::{Charge, ChargeField, Domain, FieldError, Grid, Resolution, Scene};
use serde::Serialize;
use tracing::{debug, instrument};

/// The polylines extracted for one level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelContours {
    pub level: f64,
    pub polylines: Vec<Polyline>,
}

/// Extracts and stitches the contour of `grid` at `level`.
pub fn contours_at(grid: &Grid, level: f64) -> Vec<Polyline> {
    let segments = extract_segments(grid, level);
    let polylines = stitch(&segments);
    debug!(
        level,
        segments = segments.len(),
        polylines = polylines.len(),
        "level stitched"
    );
    polylines
}

/// Contours for each of `levels`, paired with their level, in request order.
pub fn contour_levels(grid: &Grid, levels: &[f64]) -> Vec<LevelContours> {
    levels
        .iter()
        .map(|&level| LevelContours {
            level,
            polylines: contours_at(grid, level),
        })
        .collect()
}

fn check_levels(levels: &[f64]) -> Result<(), FieldError> {
    match levels.iter().find(|l| !l.is_finite()) {
        Some(bad) => Err(FieldError::NonFinite(format!("contour level {bad}"))),
        None => Ok(()),
    }
}

/// Equipotential polylines of `charges` for each requested level.
///
/// The outer list has one entry per level, in the order given.
///
/// Returns an error for an empty or non-finite charge list, a malformed
/// domain, a resolution below 2 or a non-finite level.
#[instrument(skip_all, fields(levels = levels.len(), nx = resolution.nx, ny = resolution.ny))]
pub fn compute_contours(
    charges: &[Charge],
    domain: &Domain,
    resolution: Resolution,
    levels: &[f64],
) -> Result<Vec<Vec<Polyline>>, FieldError> {
    check_levels(levels)?;
    let source = ChargeField::new(charges)?;
    let grid = Grid::sample(domain, resolution, &source)?;
    Ok(levels.iter().map(|&level| contours_at(&grid, level)).collect())
}

/// Contours for every level of a [`Scene`].
#[instrument(skip_all, fields(levels = scene.levels.count))]
pub fn contour_scene(scene: &Scene) -> Result<Vec<LevelContours>, FieldError> {
    scene.levels.validate()?;
    let grid = scene.grid()?;
    Ok(contour_levels(&grid, &scene.levels.levels()))
}
