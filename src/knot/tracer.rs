//! Walking strands from cell to cell until they close up into loops.

use crate::{
    grid::{across_edge, Grid, NUM_POINTS},
    indexed_vec::{CellIdx, CellVec, LoopIdx, LoopVec},
};

use super::routing::CellRouting;

/// Total turn of a loop which closes up without winding round on itself
pub const FULL_TURN: i32 = 6;
/// Turn taken when a strand is handed to the next point along the same edge
const SAME_EDGE_TURN: i32 = 3;
/// Turn taken when a strand wraps round a corner with nothing on the other side
const OPEN_CORNER_TURN: i32 = 4;
/// Turn taken when a strand wraps round a corner onto the neighbouring cell
const NEIGHBOUR_CORNER_TURN: i32 = 2;

/// One of the 18 boundary points of a specific cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub cell: CellIdx,
    pub point: usize,
}

impl Anchor {
    pub fn new(cell: CellIdx, point: usize) -> Self {
        Self { cell, point }
    }
}

/// One step of a loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// The strand crosses a cell, entering at this anchor and following that cell's routing
    Interior(Anchor),
    /// The strand has left the grid, and is joined straight to this anchor (where it re-enters)
    HandOff(Anchor),
}

impl Segment {
    pub fn anchor(&self) -> Anchor {
        match *self {
            Segment::Interior(a) | Segment::HandOff(a) => a,
        }
    }

    pub fn is_interior(&self) -> bool {
        matches!(self, Segment::Interior(_))
    }
}

/// A single closed strand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loop {
    segments: Vec<Segment>,
    /// Sum of every turn taken around the loop, in sixths of a turn
    turn: i32,
    is_small_circle: bool,
}

impl Loop {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn turn(&self) -> i32 {
        self.turn
    }

    /// A loop is regular if it closes up after exactly one full turn.  Only regular loops are
    /// filled; the rest are left as outlines.
    pub fn is_regular(&self) -> bool {
        self.turn == FULL_TURN
    }

    /// Returns `true` if this loop is the tiny circle formed by three corner arcs around a single
    /// grid vertex
    pub fn is_small_circle(&self) -> bool {
        self.is_small_circle
    }
}

/// Every loop in a grid, along with which loop passes through each anchor
#[derive(Debug, Clone)]
pub struct Tracing {
    loops: LoopVec<Loop>,
    /// The loop entering the cell at each anchor.  **Invariant**: never `None` once tracing
    /// finishes
    owners: CellVec<[Option<LoopIdx>; NUM_POINTS]>,
}

impl Tracing {
    pub fn loops(&self) -> &LoopVec<Loop> {
        &self.loops
    }

    /// The loop whose strand enters a cell at a given anchor
    pub fn owner(&self, anchor: Anchor) -> Option<LoopIdx> {
        self.owners[anchor.cell][anchor.point]
    }
}

/// Decompose all the strands in `grid` into closed loops.  Loops are discovered by scanning cells
/// in row-major order and each cell's points in ascending order, so the output is fully
/// determined by the grid and its routings.
pub fn trace(grid: &Grid, routings: &CellVec<CellRouting>) -> Tracing {
    assert_eq!(grid.len(), routings.len());

    let mut loops = LoopVec::new();
    let mut owners = CellVec::repeat([None; NUM_POINTS], grid.len());
    for cell in grid.row_major() {
        for point in 0..NUM_POINTS {
            if owners[cell][point].is_some() {
                continue;
            }
            let loop_idx = loops.next_idx();
            let new_loop = walk(grid, routings, Anchor::new(cell, point), |anchor| {
                let owner = &mut owners[anchor.cell][anchor.point];
                debug_assert!(owner.is_none(), "{:?} visited twice", anchor);
                *owner = Some(loop_idx);
            });
            loops.push(new_loop);
        }
    }

    debug_assert!(owners.iter().all(|o| o.iter().all(Option::is_some)));
    log::debug!(
        "Traced {} loops ({} regular) through {} cells",
        loops.len(),
        loops.iter().filter(|l| l.is_regular()).count(),
        grid.len()
    );
    Tracing { loops, owners }
}

/// Follow one strand from `start` until it returns there, calling `visit` on the anchor of every
/// cell it enters
fn walk(
    grid: &Grid,
    routings: &CellVec<CellRouting>,
    start: Anchor,
    mut visit: impl FnMut(Anchor),
) -> Loop {
    let max_len = 2 * NUM_POINTS * grid.len();
    let mut segments = Vec::new();
    let mut turn = 0;
    let mut current = start;
    loop {
        visit(current);
        segments.push(Segment::Interior(current));
        let routing = &routings[current.cell];
        turn += routing.turn(current.point);

        let exit = routing.route(current.point);
        let (edge, mate) = across_edge(exit);
        current = match grid.cell(current.cell).neighbour(edge) {
            Some(neighbour) => Anchor::new(neighbour, mate),
            None => {
                let (target, hand_off_turn) = hand_off(grid, current.cell, exit);
                segments.push(Segment::HandOff(target));
                turn += hand_off_turn;
                target
            }
        };
        if current == start {
            break;
        }
        debug_assert!(segments.len() <= max_len, "strand from {:?} never closes", start);
    }

    let is_small_circle = turn == FULL_TURN
        && segments.len() == 3
        && segments.iter().all(|seg| match *seg {
            Segment::Interior(a) => {
                a.point % 3 == 0 && routings[a.cell].geometry(a.point).is_simple()
            }
            Segment::HandOff(_) => false,
        });
    Loop {
        segments,
        turn,
        is_small_circle,
    }
}

/// Where a strand leaving `cell` at `exit` (with no cell on the other side) re-enters the grid,
/// and how far it turns on the way.
fn hand_off(grid: &Grid, cell: CellIdx, exit: usize) -> (Anchor, i32) {
    if exit % 3 != 2 {
        // Step to the next anchor along the same edge
        return (Anchor::new(cell, exit + 1), SAME_EDGE_TURN);
    }
    let next_edge = (exit / 3 + 1) % 6;
    match grid.cell(cell).neighbour(next_edge) {
        None => (Anchor::new(cell, (exit + 1) % NUM_POINTS), OPEN_CORNER_TURN),
        Some(neighbour) => (
            Anchor::new(neighbour, (exit + 13) % NUM_POINTS),
            NEIGHBOUR_CORNER_TURN,
        ),
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{
        grid::{Coverage, Layout, Viewport},
        knot::{Orientation, Templates},
        V2Ext, V2,
    };

    fn routings_for(
        grid: &Grid,
        mut f: impl FnMut(i32, i32) -> Orientation,
    ) -> CellVec<CellRouting> {
        let templates = Templates::new();
        grid.cells()
            .map(|cell| CellRouting::new(f(cell.row, cell.col), &templates))
    }

    /// Short description of a loop, e.g. `"1 >17 17 >1"`
    fn describe(l: &Loop) -> String {
        l.segments()
            .iter()
            .map(|seg| match seg {
                Segment::Interior(a) => a.point.to_string(),
                Segment::HandOff(a) => format!(">{}", a.point),
            })
            .join(" ")
    }

    #[test]
    fn lone_cell() {
        let grid = Grid::from_keys(Layout::new(1.0, V2::ZERO), vec![(0, 0)]);
        let routings = routings_for(&grid, |_, _| Orientation::new(0, [false, false]));
        let tracing = trace(&grid, &routings);

        let descriptions = tracing.loops().iter().map(describe).collect_vec();
        assert_eq!(
            descriptions,
            vec![
                "0 >0",
                "1 >17 17 >1",
                "2 >2",
                "3 >3",
                "4 >4",
                "5 >7 7 >14 14 >16 16 >5",
                "6 >6",
                "8 >10 10 >8",
                "9 >9",
                "11 >11",
                "12 >12",
                "13 >13",
                "15 >15",
            ]
        );
        assert!(tracing.loops().iter().all(Loop::is_regular));
        assert!(!tracing.loops().iter().any(Loop::is_small_circle));
        let num_segments: usize = tracing.loops().iter().map(|l| l.segments().len()).sum();
        assert_eq!(num_segments, 36);
    }

    #[test]
    fn three_corner_arcs_make_a_small_circle() {
        let grid = Grid::from_keys(Layout::new(1.0, V2::ZERO), vec![(0, 0), (0, -1), (-1, 0)]);
        let routings = routings_for(&grid, |row, _| Orientation::new(0, [false, row == -1]));
        let tracing = trace(&grid, &routings);

        let circles = tracing
            .loops()
            .iter()
            .filter(|l| l.is_small_circle())
            .collect_vec();
        assert_eq!(circles.len(), 1);
        let idx = |row, col| grid.get(row, col).unwrap();
        assert_eq!(
            circles[0].segments(),
            &[
                Segment::Interior(Anchor::new(idx(-1, 0), 12)),
                Segment::Interior(Anchor::new(idx(0, 0), 0)),
                Segment::Interior(Anchor::new(idx(0, -1), 6)),
            ]
        );
        assert!(circles[0].is_regular());
    }

    #[test]
    fn loops_partition_every_anchor() {
        let viewport = Viewport::new(300.0, 200.0);
        let grid = Grid::grow(Layout::new(30.0, viewport.middle()), &viewport, Coverage::Cover);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let routings = routings_for(&grid, |_, _| Orientation::random(&mut rng));
        let tracing = trace(&grid, &routings);

        let mut num_interior = 0;
        for (loop_idx, l) in tracing.loops().indexed_iter() {
            assert!(l.segments()[0].is_interior());
            for seg in l.segments() {
                if let Segment::Interior(anchor) = seg {
                    num_interior += 1;
                    assert_eq!(tracing.owner(*anchor), Some(loop_idx));
                }
            }
            // Hand-offs are always followed by the cell they hand off to
            for (a, b) in l.segments().iter().circular_tuple_windows() {
                if let Segment::HandOff(target) = a {
                    assert_eq!(*b, Segment::Interior(*target));
                }
            }
        }
        assert_eq!(num_interior, NUM_POINTS * grid.len());
        assert!(tracing.loops().iter().any(Loop::is_regular));
    }

    #[test]
    fn tracing_is_deterministic() {
        let viewport = Viewport::new(200.0, 200.0);
        let grid = Grid::grow(Layout::new(25.0, viewport.middle()), &viewport, Coverage::Contain);
        let make = || {
            let mut rng = ChaCha8Rng::seed_from_u64(3);
            trace(&grid, &routings_for(&grid, |_, _| Orientation::random(&mut rng)))
        };
        assert_eq!(make().loops(), make().loops());
    }
}
