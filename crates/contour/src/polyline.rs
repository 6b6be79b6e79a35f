//! Stitched contour polylines.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An ordered run of points along one contour.
///
/// Serializes as a bare array of `[x, y]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<DVec2>,
}

impl Polyline {
    pub fn new(points: Vec<DVec2>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<DVec2> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<DVec2> {
        self.points.last().copied()
    }

    /// Whether the walk came back to its start: at least three points and
    /// first and last within `tolerance` of each other.
    pub fn is_closed(&self, tolerance: f64) -> bool {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) if self.len() >= 3 => a.distance(b) <= tolerance,
            _ => false,
        }
    }

    /// Sum of the straight segment lengths.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}
