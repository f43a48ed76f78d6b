//! The geometric building blocks of every strand, expressed in the frame of a unit hexagon
//! (radius 1, centred on the origin).  Every cell's geometry is derived from the seven shapes in
//! [`Templates`] using only [`Prim::reversed`], [`Prim::rotated`] and composition.

use crate::{
    grid::ANCHOR_INSET,
    utils::{self, CircularArc, SQRT_3_BY_2},
    V2Ext, V2,
};

/// A circular arc whose end angles are whole sixths of a turn.  The arc runs clockwise (on
/// screen) from `start` to `end` unless `anticlockwise` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub centre: V2,
    pub radius: f32,
    /// Start angle, in sixths of a turn.  **Invariant**: in `0..6`
    pub start: i32,
    /// End angle, in sixths of a turn.  **Invariant**: in `0..6`
    pub end: i32,
    pub anticlockwise: bool,
}

impl Arc {
    fn new(centre: V2, radius: f32, start: i32, end: i32) -> Self {
        Self {
            centre,
            radius,
            start: start.rem_euclid(6),
            end: end.rem_euclid(6),
            anticlockwise: false,
        }
    }

    /// Converts this into a [`CircularArc`] scaled by `scale` then moved by `translation`
    pub fn to_circular_arc(self, translation: V2, scale: f32) -> CircularArc {
        CircularArc {
            centre: self.centre,
            radius: self.radius,
            start: utils::sixths_to_rad(self.start).0,
            end: utils::sixths_to_rad(self.end).0,
            anticlockwise: self.anticlockwise,
        }
        .transform(translation, scale)
    }
}

/// A cubic Bézier curve, given by its four control points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub points: [V2; 4],
}

impl Cubic {
    pub fn new(p0: V2, p1: V2, p2: V2, p3: V2) -> Self {
        Self {
            points: [p0, p1, p2, p3],
        }
    }

    /// Splits this curve at parameter `t` (using de Casteljau's algorithm), returning the two
    /// halves.  The first half ends exactly where the second one starts.
    pub fn split(&self, t: f32) -> (Cubic, Cubic) {
        let [p0, p1, p2, p3] = self.points;
        let a = utils::lerp(p0, p1, t);
        let b = utils::lerp(p1, p2, t);
        let c = utils::lerp(p2, p3, t);
        let d = utils::lerp(a, b, t);
        let e = utils::lerp(b, c, t);
        let f = utils::lerp(d, e, t);
        (Cubic::new(p0, a, d, f), Cubic::new(f, e, c, p3))
    }

    /// Mirror this curve in the y-axis
    fn mirrored(&self) -> Self {
        Self {
            points: self.points.map(|p| V2::new(-p.x, p.y)),
        }
    }
}

/// A single drawable primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Prim {
    Arc(Arc),
    Cubic(Cubic),
}

impl Prim {
    /// The same primitive, traversed in the opposite direction
    pub fn reversed(&self) -> Self {
        match *self {
            Prim::Arc(arc) => Prim::Arc(Arc {
                start: arc.end,
                end: arc.start,
                anticlockwise: !arc.anticlockwise,
                ..arc
            }),
            Prim::Cubic(Cubic {
                points: [p0, p1, p2, p3],
            }) => Prim::Cubic(Cubic::new(p3, p2, p1, p0)),
        }
    }

    /// Rotate clockwise about the origin by `steps` sixths of a turn.  Any integer is accepted.
    pub fn rotated(&self, steps: i32) -> Self {
        match *self {
            Prim::Arc(arc) => Prim::Arc(Arc {
                centre: arc.centre.rotate_sixths(steps),
                start: (arc.start + steps).rem_euclid(6),
                end: (arc.end + steps).rem_euclid(6),
                ..arc
            }),
            Prim::Cubic(cubic) => Prim::Cubic(Cubic {
                points: cubic.points.map(|p| p.rotate_sixths(steps)),
            }),
        }
    }

    pub fn start_point(&self) -> V2 {
        match self {
            Prim::Arc(arc) => arc.to_circular_arc(V2::ZERO, 1.0).start_point(),
            Prim::Cubic(cubic) => cubic.points[0],
        }
    }

    pub fn end_point(&self) -> V2 {
        match self {
            Prim::Arc(arc) => arc.to_circular_arc(V2::ZERO, 1.0).end_point(),
            Prim::Cubic(cubic) => cubic.points[3],
        }
    }
}

/// The curve connecting a boundary point to its routed partner inside a cell: one or two
/// [`Prim`]itives, drawn in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundArc {
    prims: Vec<Prim>,
}

impl CompoundArc {
    pub fn new(prims: Vec<Prim>) -> Self {
        Self { prims }
    }

    pub fn single(prim: Prim) -> Self {
        Self::new(vec![prim])
    }

    pub fn prims(&self) -> &[Prim] {
        &self.prims
    }

    /// Returns `true` if this is made of exactly one primitive
    pub fn is_simple(&self) -> bool {
        self.prims.len() == 1
    }

    /// The same curve, traversed in the opposite direction
    pub fn reversed(&self) -> Self {
        Self::new(self.prims.iter().rev().map(Prim::reversed).collect())
    }

    pub fn rotated(&self, steps: i32) -> Self {
        Self::new(self.prims.iter().map(|p| p.rotated(steps)).collect())
    }

    pub fn start_point(&self) -> Option<V2> {
        self.prims.first().map(Prim::start_point)
    }

    pub fn end_point(&self) -> Option<V2> {
        self.prims.last().map(Prim::end_point)
    }
}

/* Shape parameters */

/// How far the small crossing curve's free end reaches into the cell
const SMALL_CUBIC_FREE_REACH: f32 = 0.4;
/// How far the crossing curves reach into the cell at their shared end
const SMALL_CUBIC_SHARED_REACH: f32 = 0.5;
const LARGE_CUBIC_SHARED_REACH: f32 = 0.6;

/// The seven shapes from which every strand is built
#[derive(Debug, Clone, PartialEq)]
pub struct Templates {
    /// Around vertex 0, from anchor 0 to anchor 17
    pub tiny_arc: Prim,
    /// Around vertex 0, from the middle of edge 0 to the middle of edge 5
    pub small_arc: Prim,
    /// From the middle of edge 1 to the middle of edge 5, bulging round the far side of edge 0
    pub large_arc: Prim,
    /// Crossing curve from anchor 2 to the middle of edge 5
    pub small_cubic: Prim,
    /// Crossing curve from anchor 3 to the middle of edge 5
    pub large_cubic: Prim,
    pub small_cubic_mirror: Prim,
    pub large_cubic_mirror: Prim,
}

impl Templates {
    pub fn new() -> Self {
        let vertex_0 = V2::new(-0.5, -SQRT_3_BY_2);
        let arc_junction = V2::new(-0.75, -SQRT_3_BY_2 / 2.0);

        let small_cubic = Cubic::new(
            V2::new(0.5 - ANCHOR_INSET, -SQRT_3_BY_2),
            V2::new(0.5 - ANCHOR_INSET, -SQRT_3_BY_2 + SMALL_CUBIC_FREE_REACH),
            V2::new(0.0, -SQRT_3_BY_2 + SMALL_CUBIC_SHARED_REACH).rotate_sixths(5),
            arc_junction,
        );
        let large_cubic = Cubic::new(
            V2::new(-0.5 + ANCHOR_INSET, -SQRT_3_BY_2).rotate_sixths(1),
            V2::new(-0.5 + ANCHOR_INSET, -SQRT_3_BY_2 + SMALL_CUBIC_SHARED_REACH)
                .rotate_sixths(1),
            V2::new(0.0, -SQRT_3_BY_2 + LARGE_CUBIC_SHARED_REACH).rotate_sixths(5),
            arc_junction,
        );

        Self {
            tiny_arc: Prim::Arc(Arc::new(vertex_0, ANCHOR_INSET, 0, 2)),
            small_arc: Prim::Arc(Arc::new(vertex_0, 0.5, 0, 2)),
            large_arc: Prim::Arc(Arc::new(V2::new(0.0, -2.0 * SQRT_3_BY_2), 1.5, 1, 2)),
            small_cubic: Prim::Cubic(small_cubic),
            large_cubic: Prim::Cubic(large_cubic),
            small_cubic_mirror: Prim::Cubic(small_cubic.mirrored()),
            large_cubic_mirror: Prim::Cubic(large_cubic.mirrored()),
        }
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::unit_points;

    impl Templates {
        fn all(&self) -> [Prim; 7] {
            [
                self.tiny_arc,
                self.small_arc,
                self.large_arc,
                self.small_cubic,
                self.large_cubic,
                self.small_cubic_mirror,
                self.large_cubic_mirror,
            ]
        }
    }

    fn assert_close(a: V2, b: V2) {
        assert!(
            (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn double_reverse_is_identity() {
        for prim in Templates::new().all().iter() {
            assert_eq!(prim.reversed().reversed(), *prim);
        }
        let compound = CompoundArc::new(vec![
            Templates::new().small_cubic,
            Templates::new().small_arc.reversed(),
        ]);
        assert_eq!(compound.reversed().reversed(), compound);
        assert_ne!(compound.reversed(), compound);
    }

    #[test]
    fn half_turn_twice_is_identity() {
        for prim in Templates::new().all().iter() {
            assert_eq!(prim.rotated(3).rotated(3), prim.rotated(0));
            assert_eq!(prim.rotated(0), *prim);
        }
    }

    #[test]
    fn rotation_steps_are_normalised() {
        let t = Templates::new();
        for prim in [t.tiny_arc, t.large_arc].iter() {
            assert_eq!(prim.rotated(-1), prim.rotated(5));
            assert_eq!(prim.rotated(6), *prim);
        }
        match t.large_arc.rotated(5) {
            Prim::Arc(arc) => assert_eq!((arc.start, arc.end), (0, 1)),
            Prim::Cubic(_) => unreachable!(),
        }
    }

    #[test]
    fn rotation_commutes_with_reversal() {
        for prim in Templates::new().all().iter() {
            assert_eq!(prim.rotated(2).reversed(), prim.reversed().rotated(2));
        }
    }

    #[test]
    fn templates_start_and_end_on_anchors() {
        let t = Templates::new();
        let pts = unit_points();
        let junction = V2::new(-0.75, -SQRT_3_BY_2 / 2.0);
        assert_close(t.tiny_arc.start_point(), pts[0]);
        assert_close(t.tiny_arc.end_point(), pts[17]);
        assert_close(t.small_arc.start_point(), pts[1]);
        assert_close(t.small_arc.end_point(), pts[16]);
        assert_close(t.large_arc.start_point(), pts[4]);
        assert_close(t.large_arc.end_point(), pts[16]);
        assert_close(t.small_cubic.start_point(), pts[2]);
        assert_close(t.small_cubic.end_point(), junction);
        assert_close(t.large_cubic.start_point(), pts[3]);
        assert_close(t.small_cubic_mirror.start_point(), pts[0]);
        assert_close(t.large_cubic_mirror.start_point(), pts[17]);
    }

    #[test]
    fn split_halves_meet() {
        let cubic = Cubic::new(
            V2::new(0.0, 0.0),
            V2::new(1.0, 2.0),
            V2::new(3.0, 2.0),
            V2::new(4.0, 0.0),
        );
        let (a, b) = cubic.split(0.5);
        assert_eq!(a.points[3], b.points[0]);
        assert_eq!(a.points[0], cubic.points[0]);
        assert_eq!(b.points[3], cubic.points[3]);
        assert_close(a.points[3], V2::new(2.0, 1.5));
    }
}
