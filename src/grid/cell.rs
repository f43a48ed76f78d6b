use itertools::Itertools;

use crate::{indexed_vec::CellIdx, utils, V2Ext, V2};

use super::{Layout, Viewport};

/// How far along each edge (from its first vertex) the outer two crossing anchors sit.  The middle
/// anchor is always at `0.5`.
pub const ANCHOR_INSET: f32 = 0.28;
/// Number of boundary points on every cell (three per edge)
pub const NUM_POINTS: usize = 18;

/// `(Δrow, Δcol)` of the neighbour across each edge
const NEIGHBOUR_OFFSETS: [(i32, i32); 6] = [(-1, 0), (-1, 1), (0, 1), (1, 0), (1, -1), (0, -1)];

/// One hexagon of the grid.  Vertex `k` sits at angle `60°·k + 240°` from the centre, and edge `k`
/// runs from vertex `k` to vertex `k + 1` (i.e. clockwise on screen).
#[derive(Debug, Clone)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
    pub centre: V2,
    pub vertices: [V2; 6],
    /// The 18 boundary anchors.  Point `p` lies on edge `p / 3`; positions `0`, `1` and `2` within
    /// an edge are at [`ANCHOR_INSET`], `0.5` and `1 - ANCHOR_INSET` along it.
    pub points: [V2; NUM_POINTS],
    /// The cell across each edge.  These are only filled once the whole grid exists (see
    /// [`super::Grid`]), and are `None` at the edge of the grid.
    pub(super) neighbours: [Option<CellIdx>; 6],
}

impl Cell {
    pub fn new(row: i32, col: i32, layout: &Layout) -> Self {
        let centre = layout.cell_centre(row, col);
        let vertices = unit_vertices().map(|v| centre + v * layout.radius);
        let mut points = [V2::ZERO; NUM_POINTS];
        for (edge, (&a, &b)) in vertices.iter().circular_tuple_windows().enumerate() {
            points[3 * edge] = utils::lerp(a, b, ANCHOR_INSET);
            points[3 * edge + 1] = utils::lerp(a, b, 0.5);
            points[3 * edge + 2] = utils::lerp(a, b, 1.0 - ANCHOR_INSET);
        }
        Self {
            row,
            col,
            centre,
            vertices,
            points,
            neighbours: [None; 6],
        }
    }

    /// The `(row, col)` key of the cell across a given edge.  This cell may not exist.
    pub fn neighbour_key(&self, edge: usize) -> (i32, i32) {
        let (d_row, d_col) = NEIGHBOUR_OFFSETS[edge];
        (self.row + d_row, self.col + d_col)
    }

    /// The cell across a given edge, if it exists
    pub fn neighbour(&self, edge: usize) -> Option<CellIdx> {
        self.neighbours[edge]
    }

    /// Returns `true` if all 6 vertices are inside the viewport
    pub fn is_fully_inside(&self, viewport: &Viewport) -> bool {
        self.vertices.iter().all(|&v| viewport.contains(v))
    }

    /// Returns `true` if all 6 vertices are outside the viewport.  Cells bigger than the viewport
    /// which surround it completely also count as outside.
    pub fn is_fully_outside(&self, viewport: &Viewport) -> bool {
        !self.vertices.iter().any(|&v| viewport.contains(v))
    }
}

/// The vertices of the hexagon of radius 1 centred on the origin
pub fn unit_vertices() -> [V2; 6] {
    let first = V2::new(1.0, 0.0).rotate_sixths(4);
    [0, 1, 2, 3, 4, 5].map(|k| first.rotate_sixths(k))
}

/// The boundary anchors of the hexagon of radius 1 centred on the origin
pub fn unit_points() -> [V2; NUM_POINTS] {
    Cell::new(0, 0, &Layout::new(1.0, V2::ZERO)).points
}

/// Maps a boundary point onto the matching point of the cell across the same edge (the edges
/// run in opposite directions, so positions within the edge are mirrored).  Returns
/// `(edge, point_on_neighbour)`.
pub fn across_edge(point: usize) -> (usize, usize) {
    let edge = point / 3;
    let opposite = (edge + 3) % 6;
    (edge, 3 * opposite + (2 - point % 3))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: V2, b: V2) {
        assert!(
            (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn centre_and_vertices() {
        let layout = Layout::new(10.0, V2::new(100.0, 50.0));
        let cell = Cell::new(1, 2, &layout);
        // x = 100 + 2 * 1.5 * 10; y = 50 + (1 + 1) * 10 * sqrt(3)
        assert_close(cell.centre, V2::new(130.0, 50.0 + 20.0 * 3f32.sqrt()));
        // Vertex 0 is at 240°, i.e. up and to the left
        assert_close(cell.vertices[0], cell.centre + V2::new(-5.0, -10.0 * utils::SQRT_3_BY_2));
        assert_close(cell.vertices[3], cell.centre + V2::new(5.0, 10.0 * utils::SQRT_3_BY_2));
    }

    #[test]
    fn anchors_lie_on_edges() {
        let points = unit_points();
        let verts = unit_vertices();
        assert_close(points[1], (verts[0] + verts[1]) * 0.5);
        assert_close(points[0], V2::new(-0.5 + ANCHOR_INSET, -utils::SQRT_3_BY_2));
        assert_close(points[17], utils::lerp(verts[5], verts[0], 1.0 - ANCHOR_INSET));
    }

    #[test]
    fn neighbours_share_anchor_positions() {
        let layout = Layout::new(3.0, V2::ZERO);
        let cell = Cell::new(0, 0, &layout);
        for p in 0..NUM_POINTS {
            let (edge, mate) = across_edge(p);
            let (row, col) = cell.neighbour_key(edge);
            let neighbour = Cell::new(row, col, &layout);
            assert_close(cell.points[p], neighbour.points[mate]);
            // Crossing back gets us home
            assert_eq!(across_edge(mate), ((edge + 3) % 6, p));
        }
    }

    #[test]
    fn inside_and_outside() {
        let viewport = Viewport::new(100.0, 100.0);
        let layout = Layout::new(10.0, V2::new(50.0, 50.0));
        let centre = Cell::new(0, 0, &layout);
        assert!(centre.is_fully_inside(&viewport));
        assert!(!centre.is_fully_outside(&viewport));
        let far = Cell::new(0, 10, &layout);
        assert!(far.is_fully_outside(&viewport));
        assert!(!far.is_fully_inside(&viewport));
        // Straddles the right-hand edge
        let edge = Cell::new(-2, 3, &layout);
        assert!(!edge.is_fully_inside(&viewport));
        assert!(!edge.is_fully_outside(&viewport));
    }
}
