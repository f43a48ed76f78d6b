//! The sparse hexagonal grid on which knots are woven.  Cells live in an arena ([`CellVec`]) and
//! are found by their axial `(row, col)` key through a [`SparseGrid`] index.

use std::collections::VecDeque;

use itertools::Itertools;

use crate::{
    indexed_vec::{CellIdx, CellVec},
    utils::SQRT_3_BY_2,
    V2,
};

mod cell;
pub mod sparse;

pub use cell::{across_edge, unit_points, unit_vertices, Cell, ANCHOR_INSET, NUM_POINTS};
pub use sparse::{SparseGrid, SparseLine};

/// The placement of the grid in pixel space: the radius (and side length) of every hexagon, and
/// the position of the centre of cell `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub radius: f32,
    pub centre: V2,
}

impl Layout {
    pub fn new(radius: f32, centre: V2) -> Self {
        Self { radius, centre }
    }

    /// The pixel position of the centre of the cell with a given key
    pub fn cell_centre(&self, row: i32, col: i32) -> V2 {
        let (row, col) = (row as f32, col as f32);
        self.centre
            + V2::new(
                col * 1.5 * self.radius,
                (row + col / 2.0) * self.radius * 2.0 * SQRT_3_BY_2,
            )
    }
}

/// The visible area, spanning `0 <= x < width` and `0 <= y < height`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, p: V2) -> bool {
        p.x >= 0.0 && p.x < self.width && p.y >= 0.0 && p.y < self.height
    }

    /// Returns `true` if this viewport encloses no pixels (or has nonsensical dimensions)
    pub fn is_degenerate(&self) -> bool {
        let is_positive = |x: f32| x.is_finite() && x > 0.0;
        !(is_positive(self.width) && is_positive(self.height))
    }

    pub fn middle(&self) -> V2 {
        V2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// How the grid grows to fill a [`Viewport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coverage {
    /// Keep growing until the viewport is completely covered; cells may overhang its edges
    Cover,
    /// Only keep cells which are completely inside the viewport
    Contain,
}

impl Default for Coverage {
    fn default() -> Self {
        Coverage::Cover
    }
}

/// A finished hexagonal grid, with all neighbour links resolved.
#[derive(Debug, Clone)]
pub struct Grid {
    layout: Layout,
    cells: CellVec<Cell>,
    index: SparseGrid<CellIdx>,
}

impl Grid {
    /// Grows a grid breadth-first from cell `(0, 0)` until every newly created cell lies fully
    /// outside the viewport.  Neighbour existence can't be known while the grid is still growing,
    /// so neighbours are only resolved once growth is complete.
    pub fn grow(layout: Layout, viewport: &Viewport, coverage: Coverage) -> Self {
        let mut grid = Self::empty(layout);
        let origin = grid.insert(0, 0);
        let mut to_examine = VecDeque::new();
        to_examine.push_back(origin);
        while let Some(cell_idx) = to_examine.pop_front() {
            for edge in 0..6 {
                let (row, col) = grid.cells[cell_idx].neighbour_key(edge);
                if grid.index.get(row, col).is_some() {
                    continue; // Already exists
                }
                let new_cell = Cell::new(row, col, &layout);
                if coverage == Coverage::Contain && !new_cell.is_fully_inside(viewport) {
                    continue; // Would overhang the viewport
                }
                let is_outside = new_cell.is_fully_outside(viewport);
                let new_idx = grid.push(new_cell);
                if !is_outside {
                    to_examine.push_back(new_idx);
                }
            }
        }
        grid.resolve_neighbours();
        log::debug!(
            "Grew grid of {} cells (radius {}, rows {:?})",
            grid.len(),
            layout.radius,
            grid.index.row_bounds()
        );
        grid
    }

    /// Creates a grid containing exactly the cells with the given keys.  Duplicate keys are
    /// ignored.
    pub fn from_keys(layout: Layout, keys: impl IntoIterator<Item = (i32, i32)>) -> Self {
        let mut grid = Self::empty(layout);
        for (row, col) in keys {
            if grid.index.get(row, col).is_none() {
                grid.insert(row, col);
            }
        }
        grid.resolve_neighbours();
        grid
    }

    fn empty(layout: Layout) -> Self {
        Self {
            layout,
            cells: CellVec::new(),
            index: SparseGrid::new(),
        }
    }

    fn insert(&mut self, row: i32, col: i32) -> CellIdx {
        let cell = Cell::new(row, col, &self.layout);
        self.push(cell)
    }

    fn push(&mut self, cell: Cell) -> CellIdx {
        let (row, col) = (cell.row, cell.col);
        let idx = self.cells.push(cell);
        self.index.set(row, col, idx);
        idx
    }

    /// Fill in every cell's (weak) neighbour links
    fn resolve_neighbours(&mut self) {
        let links = self.cells.map(|cell| {
            let mut neighbours = [None; 6];
            for (edge, n) in neighbours.iter_mut().enumerate() {
                let (row, col) = cell.neighbour_key(edge);
                *n = self.index.get(row, col).copied();
            }
            neighbours
        });
        for (idx, neighbours) in links.indexed_iter() {
            self.cells[idx].neighbours = *neighbours;
        }
    }

    /* Getters */

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, idx: CellIdx) -> &Cell {
        &self.cells[idx]
    }

    pub fn cells(&self) -> &CellVec<Cell> {
        &self.cells
    }

    /// Find a cell by its axial key
    pub fn get(&self, row: i32, col: i32) -> Option<CellIdx> {
        self.index.get(row, col).copied()
    }

    /// All cell indices, ordered by ascending row then ascending column.  Every randomised or
    /// order-dependent pass over the grid uses this order.
    pub fn row_major(&self) -> Vec<CellIdx> {
        self.index.iter().map(|(_, _, idx)| *idx).collect_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport_grid(coverage: Coverage) -> (Grid, Viewport) {
        let viewport = Viewport::new(400.0, 300.0);
        let layout = Layout::new(40.0, viewport.middle());
        (Grid::grow(layout, &viewport, coverage), viewport)
    }

    #[test]
    fn neighbour_links_are_symmetric() {
        let (grid, _) = viewport_grid(Coverage::Cover);
        for (idx, cell) in grid.cells().indexed_iter() {
            for edge in 0..6 {
                if let Some(n) = cell.neighbour(edge) {
                    assert_eq!(grid.cell(n).neighbour((edge + 3) % 6), Some(idx));
                    assert_eq!(grid.get(grid.cell(n).row, grid.cell(n).col), Some(n));
                }
            }
        }
    }

    #[test]
    fn covering_grid_surrounds_every_visible_cell() {
        let (grid, viewport) = viewport_grid(Coverage::Cover);
        assert!(grid.get(0, 0).is_some());
        let mut num_visible = 0;
        for cell in grid.cells().iter() {
            if !cell.is_fully_outside(&viewport) {
                num_visible += 1;
                assert!((0..6).all(|e| cell.neighbour(e).is_some()), "{:?}", cell);
            }
        }
        assert!(num_visible > 1);
        // The visible area is covered: every viewport corner is inside some cell's bounds
        for &corner in &[V2::new(0.0, 0.0), V2::new(399.0, 299.0)] {
            assert!(grid
                .cells()
                .iter()
                .any(|c| {
                    let d = c.centre - corner;
                    (d.x * d.x + d.y * d.y).sqrt() <= grid.layout().radius
                }));
        }
    }

    #[test]
    fn contained_grid_stays_inside() {
        let (grid, viewport) = viewport_grid(Coverage::Contain);
        for cell in grid.cells().iter().skip(1) {
            assert!(cell.is_fully_inside(&viewport));
        }
        assert!(grid.len() < viewport_grid(Coverage::Cover).0.len());
    }

    #[test]
    fn row_major_order() {
        let layout = Layout::new(1.0, V2::new(0.0, 0.0));
        let grid = Grid::from_keys(layout, vec![(1, 0), (0, 1), (0, -1), (-1, 0), (0, 1)]);
        assert_eq!(grid.len(), 4);
        let keys = grid
            .row_major()
            .into_iter()
            .map(|idx| (grid.cell(idx).row, grid.cell(idx).col))
            .collect_vec();
        assert_eq!(keys, vec![(-1, 0), (0, -1), (0, 1), (1, 0)]);
        // (0, -1) and (-1, 0) are adjacent, (0, 1) and (0, -1) are not
        let a = grid.get(0, -1).unwrap();
        assert_eq!(grid.cell(a).neighbour(1), grid.get(-1, 0));
        assert_eq!(grid.cell(a).neighbour(2), None);
    }
}
