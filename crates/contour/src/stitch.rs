//! Joins per-cell segments into polylines.
//!
//! Endpoints are matched through a quantized key (six decimal digits), so
//! crossings computed from either side of a shared cell edge land in the
//! same bucket. Chains grow greedily from their tail only: each step takes
//! the first unused segment at the tail key in index order. A chain started
//! from the middle of an open contour therefore covers only the part ahead
//! of it; the remainder becomes a separate polyline. Closed loops are always
//! walked in full.

use crate::marching::Segment;
use crate::polyline::Polyline;
use glam::DVec2;
use std::collections::HashMap;

/// Endpoint coordinates are rounded to multiples of `1 / KEY_SCALE`.
pub const KEY_SCALE: f64 = 1e6;

/// Distance under which a segment endpoint is the chain tail itself.
pub const ENDPOINT_TOLERANCE: f64 = 1e-8;

/// Quantized endpoint position.
pub type PointKey = (i64, i64);

fn quantize(v: f64) -> i64 {
    // ties round toward +inf regardless of sign
    (v * KEY_SCALE + 0.5).floor() as i64
}

pub fn point_key(p: DVec2) -> PointKey {
    (quantize(p.x), quantize(p.y))
}

/// Segment indices touching each quantized endpoint, in insertion order.
struct EndpointIndex {
    buckets: HashMap<PointKey, Vec<usize>>,
}

impl EndpointIndex {
    fn build(segments: &[Segment]) -> Self {
        let mut buckets: HashMap<PointKey, Vec<usize>> = HashMap::new();
        for (idx, seg) in segments.iter().enumerate() {
            buckets.entry(point_key(seg.start)).or_default().push(idx);
            buckets.entry(point_key(seg.end)).or_default().push(idx);
        }
        Self { buckets }
    }

    fn neighbors(&self, p: DVec2) -> &[usize] {
        self.buckets
            .get(&point_key(p))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// The endpoint of `seg` that is not the chain tail.
fn far_end(seg: &Segment, tail: DVec2) -> DVec2 {
    if seg.start.distance(tail) < ENDPOINT_TOLERANCE {
        seg.end
    } else {
        seg.start
    }
}

/// Stitches `segments` into maximal chains.
///
/// Polylines come out in the order their starting segment appears in the
/// input; points follow the walk direction.
pub fn stitch(segments: &[Segment]) -> Vec<Polyline> {
    let index = EndpointIndex::build(segments);
    let mut used = vec![false; segments.len()];
    let mut polylines = Vec::new();

    for (s, seg) in segments.iter().enumerate() {
        if used[s] {
            continue;
        }
        used[s] = true;
        let mut chain = vec![seg.start, seg.end];
        let mut tail = seg.end;

        while let Some(n) = index.neighbors(tail).iter().copied().find(|&n| !used[n]) {
            used[n] = true;
            tail = far_end(&segments[n], tail);
            chain.push(tail);
        }
        polylines.push(Polyline::new(chain));
    }
    polylines
}
