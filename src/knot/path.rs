//! Converting traced loops into drawable paths in pixel space.

use crate::{grid::Grid, indexed_vec::CellVec, utils::CircularArc, V2};

use super::{
    routing::CellRouting,
    template::Prim,
    tracer::{Loop, Segment},
};

/// A single drawing command, with the same semantics as the HTML canvas path API
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(V2),
    LineTo(V2),
    /// Cubic Bézier from the current point, via two control points, to the last point
    CubicTo(V2, V2, V2),
    /// Circular arc.  If the path already has a current point, a straight line is first drawn to
    /// the arc's start.
    Arc(CircularArc),
    Close,
}

/// A closed outline, made of [`PathCmd`]s
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    cmds: Vec<PathCmd>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: PathCmd) {
        self.cmds.push(cmd);
    }

    pub fn cmds(&self) -> &[PathCmd] {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Assembles the outline of a [`Loop`].  Every interior segment draws its cell's geometry
    /// (scaled by the cell radius and moved to the cell's centre); hand-offs draw a straight line
    /// to where the strand re-enters the grid.
    pub fn from_loop(lp: &Loop, grid: &Grid, routings: &CellVec<CellRouting>) -> Self {
        let radius = grid.layout().radius;
        let mut path = Path::new();
        for (i, seg) in lp.segments().iter().enumerate() {
            match *seg {
                Segment::Interior(anchor) => {
                    let centre = grid.cell(anchor.cell).centre;
                    let geometry = routings[anchor.cell].geometry(anchor.point);
                    // Arcs start themselves, but a leading cubic needs a starting point
                    if let (0, Some(Prim::Cubic(cubic))) = (i, geometry.prims().first()) {
                        path.push(PathCmd::MoveTo(centre + cubic.points[0] * radius));
                    }
                    for prim in geometry.prims() {
                        path.push(prim_cmd(prim, centre, radius));
                    }
                }
                Segment::HandOff(target) => {
                    path.push(PathCmd::LineTo(grid.cell(target.cell).points[target.point]));
                }
            }
        }
        path.push(PathCmd::Close);
        path
    }
}

/// The command which draws a unit-frame [`Prim`] inside a cell
fn prim_cmd(prim: &Prim, centre: V2, radius: f32) -> PathCmd {
    match prim {
        Prim::Arc(arc) => PathCmd::Arc(arc.to_circular_arc(centre, radius)),
        Prim::Cubic(cubic) => {
            let [_, p1, p2, p3] = cubic.points.map(|p| centre + p * radius);
            PathCmd::CubicTo(p1, p2, p3)
        }
    }
}
