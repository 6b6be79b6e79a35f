//! Marching squares over a potential [`Grid`].
//!
//! Each cell is classified by which of its four corners lie strictly above
//! the level: bit 0 bottom-left, bit 1 bottom-right, bit 2 top-right,
//! bit 3 top-left. The case table maps that 4-bit index to the pairs of
//! crossed edges joined into segments. The two saddle cases (5 and 10) always
//! emit two disjoint segments; no attempt is made to resolve them from the
//! cell center value.

use equipotential_core::Grid;
use glam::DVec2;

/// Value differences below this along an edge put the crossing on the
/// edge's first endpoint.
pub const FLAT_EDGE_EPSILON: f64 = 1e-15;

/// A cell edge. Crossings are interpolated counter-clockwise from the
/// bottom-left corner: bottom left to right, right bottom to top, top right
/// to left, left top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Bottom,
    Right,
    Top,
    Left,
}

impl Edge {
    /// Indices into the counter-clockwise corner array `[bl, br, tr, tl]`
    /// of the edge's first and second endpoint.
    fn corners(self) -> (usize, usize) {
        match self {
            Edge::Bottom => (0, 1),
            Edge::Right => (1, 2),
            Edge::Top => (2, 3),
            Edge::Left => (3, 0),
        }
    }
}

/// Segments emitted for one cell configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellCase {
    /// All corners on one side of the level.
    Empty,
    /// One segment between two crossed edges.
    Single(Edge, Edge),
    /// Diagonal corners agree; two disjoint segments.
    Saddle((Edge, Edge), (Edge, Edge)),
}

const CASE_TABLE: [CellCase; 16] = {
    use CellCase::{Empty, Saddle, Single};
    use Edge::{Bottom, Left, Right, Top};
    [
        Empty,
        Single(Bottom, Left),
        Single(Bottom, Right),
        Single(Right, Left),
        Single(Right, Top),
        Saddle((Bottom, Right), (Top, Left)),
        Single(Bottom, Top),
        Single(Top, Left),
        Single(Top, Left),
        Single(Bottom, Top),
        Saddle((Bottom, Left), (Right, Top)),
        Single(Right, Top),
        Single(Right, Left),
        Single(Bottom, Right),
        Single(Bottom, Left),
        Empty,
    ]
};

impl CellCase {
    /// Looks up a case index; only the low four bits are used.
    pub fn from_index(index: u8) -> Self {
        CASE_TABLE[usize::from(index & 0x0f)]
    }

    /// Edge pairs to join, in table order.
    pub fn edge_pairs(self) -> impl Iterator<Item = (Edge, Edge)> {
        let (first, second) = match self {
            CellCase::Empty => (None, None),
            CellCase::Single(a, b) => (Some((a, b)), None),
            CellCase::Saddle(p, q) => (Some(p), Some(q)),
        };
        first.into_iter().chain(second)
    }
}

/// Case index for corner values given counter-clockwise from bottom-left.
pub fn case_index(v00: f64, v10: f64, v11: f64, v01: f64, level: f64) -> u8 {
    u8::from(v00 > level)
        | u8::from(v10 > level) << 1
        | u8::from(v11 > level) << 2
        | u8::from(v01 > level) << 3
}

/// Where `level` crosses the straight edge from `p1` (value `v1`) to `p2`
/// (value `v2`), by linear interpolation.
pub fn interpolate(p1: DVec2, v1: f64, p2: DVec2, v2: f64, level: f64) -> DVec2 {
    if (v2 - v1).abs() < FLAT_EDGE_EPSILON {
        return p1;
    }
    let t = (level - v1) / (v2 - v1);
    p1 + (p2 - p1) * t
}

/// A piece of contour inside one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }
}

struct Cell {
    corners: [DVec2; 4],
    values: [f64; 4],
}

impl Cell {
    fn at(grid: &Grid, i: usize, j: usize) -> Self {
        let (xs, ys) = (grid.xs(), grid.ys());
        let (x0, x1, y0, y1) = (xs[i], xs[i + 1], ys[j], ys[j + 1]);
        Self {
            corners: [
                DVec2::new(x0, y0),
                DVec2::new(x1, y0),
                DVec2::new(x1, y1),
                DVec2::new(x0, y1),
            ],
            values: [
                grid.get(i, j),
                grid.get(i + 1, j),
                grid.get(i + 1, j + 1),
                grid.get(i, j + 1),
            ],
        }
    }

    fn case_index(&self, level: f64) -> u8 {
        let [v00, v10, v11, v01] = self.values;
        case_index(v00, v10, v11, v01, level)
    }

    fn crossing(&self, edge: Edge, level: f64) -> DVec2 {
        let (a, b) = edge.corners();
        interpolate(
            self.corners[a],
            self.values[a],
            self.corners[b],
            self.values[b],
            level,
        )
    }
}

/// All contour segments of `grid` at `level`.
///
/// Cells are scanned row by row from the bottom, left to right within a row;
/// segments come out in that order.
pub fn extract_segments(grid: &Grid, level: f64) -> Vec<Segment> {
    let mut segments = Vec::new();
    for j in 0..grid.ny() - 1 {
        for i in 0..grid.nx() - 1 {
            let cell = Cell::at(grid, i, j);
            let case = CellCase::from_index(cell.case_index(level));
            segments.extend(case.edge_pairs().map(|(a, b)| {
                Segment::new(cell.crossing(a, level), cell.crossing(b, level))
            }));
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single unit cell with corner values counter-clockwise from bottom-left.
    fn unit_cell(v00: f64, v10: f64, v11: f64, v01: f64) -> Grid {
        Grid::from_samples(vec![0.0, 1.0], vec![0.0, 1.0], vec![v00, v10, v01, v11]).unwrap()
    }

    fn edge_of(p: DVec2) -> Option<Edge> {
        let strictly_inside = |v: f64| v > 0.0 && v < 1.0;
        match (p.x, p.y) {
            (x, y) if y == 0.0 && strictly_inside(x) => Some(Edge::Bottom),
            (x, y) if x == 1.0 && strictly_inside(y) => Some(Edge::Right),
            (x, y) if y == 1.0 && strictly_inside(x) => Some(Edge::Top),
            (x, y) if x == 0.0 && strictly_inside(y) => Some(Edge::Left),
            _ => None,
        }
    }

    // -- Case table --

    #[test]
    fn empty_and_full_cases_emit_nothing() {
        assert_eq!(CellCase::from_index(0), CellCase::Empty);
        assert_eq!(CellCase::from_index(15), CellCase::Empty);
        assert_eq!(CellCase::from_index(0).edge_pairs().count(), 0);
    }

    #[test]
    fn only_cases_five_and_ten_are_saddles() {
        for index in 0..16u8 {
            let is_saddle = matches!(CellCase::from_index(index), CellCase::Saddle(..));
            assert_eq!(is_saddle, index == 5 || index == 10, "case {index}");
        }
    }

    #[test]
    fn saddles_emit_two_disjoint_pairs() {
        for index in [5u8, 10] {
            let pairs: Vec<_> = CellCase::from_index(index).edge_pairs().collect();
            assert_eq!(pairs.len(), 2);
            let (a, b) = (pairs[0], pairs[1]);
            for e in [a.0, a.1] {
                assert!(e != b.0 && e != b.1, "case {index} pairs share edge {e:?}");
            }
        }
    }

    #[test]
    fn complementary_cases_cross_the_same_edges() {
        for index in 1..15u8 {
            if index == 5 || index == 10 {
                continue;
            }
            let edges = |i: u8| {
                let (a, b) = CellCase::from_index(i).edge_pairs().next().unwrap();
                let mut e = [a as u8, b as u8];
                e.sort_unstable();
                e
            };
            assert_eq!(edges(index), edges(15 - index), "case {index}");
        }
    }

    #[test]
    fn table_edges_match_corner_sign_changes() {
        // An edge is crossed exactly when its two corners fall on different sides.
        for index in 1..15u8 {
            let above = |corner: usize| index >> corner & 1 == 1;
            let mut crossed: Vec<Edge> = [Edge::Bottom, Edge::Right, Edge::Top, Edge::Left]
                .into_iter()
                .filter(|e| {
                    let (a, b) = e.corners();
                    above(a) != above(b)
                })
                .collect();
            let mut listed: Vec<Edge> = CellCase::from_index(index)
                .edge_pairs()
                .flat_map(|(a, b)| [a, b])
                .collect();
            crossed.sort_by_key(|e| *e as u8);
            listed.sort_by_key(|e| *e as u8);
            assert_eq!(crossed, listed, "case {index}");
        }
    }

    #[test]
    fn from_index_ignores_high_bits() {
        assert_eq!(CellCase::from_index(0x13), CellCase::from_index(3));
    }

    // -- Case index --

    #[test]
    fn case_index_sets_bit_per_corner_above_level() {
        assert_eq!(case_index(1.0, 0.0, 0.0, 0.0, 0.5), 0b0001);
        assert_eq!(case_index(0.0, 1.0, 0.0, 0.0, 0.5), 0b0010);
        assert_eq!(case_index(0.0, 0.0, 1.0, 0.0, 0.5), 0b0100);
        assert_eq!(case_index(0.0, 0.0, 0.0, 1.0, 0.5), 0b1000);
        assert_eq!(case_index(1.0, 1.0, 1.0, 1.0, 0.5), 0b1111);
    }

    #[test]
    fn value_equal_to_level_counts_as_below() {
        assert_eq!(case_index(0.5, 0.5, 0.5, 0.5, 0.5), 0);
    }

    // -- Interpolation --

    #[test]
    fn interpolate_finds_linear_crossing() {
        let p = interpolate(DVec2::new(0.0, 0.0), 0.0, DVec2::new(2.0, 0.0), 4.0, 1.0);
        assert!((p.x - 0.5).abs() < 1e-15);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn interpolate_on_flat_edge_returns_first_endpoint() {
        let p1 = DVec2::new(3.0, 1.0);
        let p = interpolate(p1, 2.0, DVec2::new(3.0, 2.0), 2.0, 2.0);
        assert_eq!(p, p1);
    }

    // -- Extraction --

    #[test]
    fn uniform_cell_yields_no_segments_at_any_level() {
        let grid = unit_cell(1.0, 1.0, 1.0, 1.0);
        for level in [-10.0, 0.0, 0.999, 1.0, 1.001, 10.0] {
            assert!(extract_segments(&grid, level).is_empty(), "level {level}");
        }
    }

    #[test]
    fn single_corner_above_cuts_bottom_and_left() {
        let grid = unit_cell(1.0, 0.0, 0.0, 0.0);
        let segs = extract_segments(&grid, 0.25);
        assert_eq!(segs.len(), 1);
        let s = segs[0];
        assert!((s.start - DVec2::new(0.75, 0.0)).length() < 1e-12, "start {:?}", s.start);
        assert!((s.end - DVec2::new(0.0, 0.75)).length() < 1e-12, "end {:?}", s.end);
    }

    #[test]
    fn crossing_points_lie_strictly_inside_their_edges() {
        for index in 1..15u8 {
            let v = |bit: u8| if index >> bit & 1 == 1 { 1.0 } else { -1.0 };
            let grid = unit_cell(v(0), v(1), v(2), v(3));
            let segs = extract_segments(&grid, 0.1);
            let pairs: Vec<_> = CellCase::from_index(index).edge_pairs().collect();
            assert_eq!(segs.len(), pairs.len(), "case {index}");
            for (seg, (a, b)) in segs.iter().zip(pairs) {
                assert_eq!(edge_of(seg.start), Some(a), "case {index} start {:?}", seg.start);
                assert_eq!(edge_of(seg.end), Some(b), "case {index} end {:?}", seg.end);
            }
        }
    }

    #[test]
    fn saddle_cell_emits_two_segments() {
        let grid = unit_cell(1.0, -1.0, 1.0, -1.0);
        let segs = extract_segments(&grid, 0.0);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0], Segment::new(DVec2::new(0.5, 0.0), DVec2::new(1.0, 0.5)));
        assert_eq!(segs[1], Segment::new(DVec2::new(0.5, 1.0), DVec2::new(0.0, 0.5)));
    }

    #[test]
    fn segments_follow_row_major_cell_order() {
        // V = x on a 3x3 grid: the level-0.5 line crosses the first column of
        // cells, once per row.
        let grid = Grid::from_samples(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0, 0.0, 1.0, 2.0],
        )
        .unwrap();
        let segs = extract_segments(&grid, 0.5);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].start, DVec2::new(0.5, 0.0));
        assert_eq!(segs[0].end, DVec2::new(0.5, 1.0));
        assert_eq!(segs[1].start, DVec2::new(0.5, 1.0));
        assert_eq!(segs[1].end, DVec2::new(0.5, 2.0));
    }
}
