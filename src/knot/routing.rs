//! Per-cell routing: which boundary point each strand leaves by, how much it turns on the way, and
//! the curve it follows.  All 24 cell configurations come from a pair of hardcoded tables per
//! half of the hexagon, spliced together and then rotated.

use itertools::Itertools;
use rand::Rng;

use crate::grid::NUM_POINTS;

use super::template::{CompoundArc, Templates};

/// Index at which the tail tables are spliced into the head tables
const SPLICE_AT: usize = 7;

/// Exit point for each entry point of an unrotated cell, for entries `0..7` and `14..18`.  Indexed
/// by the first crossing.
const ROUTE_HEADS: [[usize; 11]; 2] = [
    [17, 16, 1, 2, 3, 6, 5, 15, 14, 4, 0],
    [17, 0, 3, 2, 1, 6, 5, 15, 14, 4, 16],
];
/// Exit point for entries `7..14`, indexed by the second crossing
const ROUTE_TAILS: [[usize; 7]; 2] = [[13, 9, 8, 7, 10, 11, 12], [13, 7, 8, 9, 12, 11, 10]];

/// Turn (in sixths of a turn) accumulated while crossing the cell from each entry point.  Same
/// layout as [`ROUTE_HEADS`].
const TURN_HEADS: [[i32; 11]; 2] = [
    [2, 2, 3, 2, 3, -2, 2, -2, 2, -1, -2],
    [2, 3, -2, 2, 2, -2, 2, -2, 2, -1, 3],
];
const TURN_TAILS: [[i32; 7]; 2] = [[-1, -2, 2, 2, 3, 2, 3], [-1, 3, 2, 3, -2, 2, 2]];

/// The random choices which fully determine a cell's routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Orientation {
    /// Rotation of the whole cell, in sixths of a turn.  **Invariant**: in `0..6`
    rotation: u8,
    /// Which strand passes 'over' at each of the cell's two crossings
    crossings: [bool; 2],
}

impl Orientation {
    /// # Panics
    ///
    /// Panics if `rotation >= 6`
    pub fn new(rotation: u8, crossings: [bool; 2]) -> Self {
        assert!(rotation < 6, "rotation must be in 0..6, got {}", rotation);
        Self {
            rotation,
            crossings,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        let rotation = rng.gen_range(0..6);
        let crossing0 = rng.gen();
        let crossing1 = rng.gen();
        Self::new(rotation, [crossing0, crossing1])
    }

    /// Every possible `Orientation`
    pub fn all() -> impl Iterator<Item = Orientation> {
        (0..6u8)
            .cartesian_product(0..4u8)
            .map(|(rotation, bits)| Self::new(rotation, [bits & 1 != 0, bits & 2 != 0]))
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn crossings(&self) -> [bool; 2] {
        self.crossings
    }
}

/// The fully expanded routing of one cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellRouting {
    orientation: Orientation,
    /// The exit point of the strand entering at each point.  **Invariant**: a permutation of
    /// `0..18`
    routes: [usize; NUM_POINTS],
    turns: [i32; NUM_POINTS],
    /// `geometry[p]` runs from anchor `p` to anchor `routes[p]` in the unit hexagon frame
    geometry: [CompoundArc; NUM_POINTS],
}

impl CellRouting {
    pub fn new(orientation: Orientation, templates: &Templates) -> Self {
        let shift = 3 * orientation.rotation as usize;
        let [c0, c1] = orientation.crossings.map(usize::from);
        Self {
            orientation,
            routes: splice_and_shift(&ROUTE_HEADS[c0], &ROUTE_TAILS[c1], shift, |exit| {
                (exit + shift) % NUM_POINTS
            }),
            turns: splice_and_shift(&TURN_HEADS[c0], &TURN_TAILS[c1], shift, |turn| turn),
            geometry: build_geometry(orientation, templates),
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The point where a strand entering at `point` leaves this cell
    pub fn route(&self, point: usize) -> usize {
        self.routes[point]
    }

    /// How far (in sixths of a turn) a strand entering at `point` turns before leaving
    pub fn turn(&self, point: usize) -> i32 {
        self.turns[point]
    }

    /// The curve followed by the strand entering at `point`, in the unit hexagon frame
    pub fn geometry(&self, point: usize) -> &CompoundArc {
        &self.geometry[point]
    }
}

/// Insert `tail` into `head` at [`SPLICE_AT`], then move every entry `shift` places round the
/// cell (mapping values through `f`).
fn splice_and_shift<T: Copy>(
    head: &[T; 11],
    tail: &[T; 7],
    shift: usize,
    f: impl Fn(T) -> T,
) -> [T; NUM_POINTS] {
    let spliced = head[..SPLICE_AT]
        .iter()
        .chain(tail.iter())
        .chain(head[SPLICE_AT..].iter())
        .copied()
        .collect_vec();
    let mut shifted = [spliced[0]; NUM_POINTS];
    for (entry, &value) in spliced.iter().enumerate() {
        shifted[(entry + shift) % NUM_POINTS] = f(value);
    }
    shifted
}

/// Each half of the hexagon (points `5..=13` and `14..=4`, before rotation) is governed by one
/// crossing.  The second half is the first rotated by half a turn.
fn build_geometry(orientation: Orientation, t: &Templates) -> [CompoundArc; NUM_POINTS] {
    let mut geometry: [CompoundArc; NUM_POINTS] = Default::default();
    let rotation = orientation.rotation as i32;
    for (half, &crossing) in orientation.crossings.iter().enumerate() {
        let steps = rotation + 3 * half as i32;
        let mut place = |point: i32, carc: CompoundArc| {
            geometry[(point + 3 * steps).rem_euclid(NUM_POINTS as i32) as usize] = carc;
        };

        let corner = CompoundArc::single(t.tiny_arc.rotated(steps + 2));
        place(5, corner.reversed());
        place(6, corner);
        if !crossing {
            let tiny = CompoundArc::single(t.tiny_arc.rotated(steps));
            place(17, tiny.reversed());
            place(0, tiny);
            place(1, CompoundArc::single(t.small_arc.rotated(steps)));
            place(
                2,
                CompoundArc::new(vec![t.small_cubic, t.small_arc.reversed()]).rotated(steps),
            );
            place(
                3,
                CompoundArc::new(vec![t.large_cubic, t.small_cubic.reversed()]).rotated(steps),
            );
            place(
                4,
                CompoundArc::new(vec![t.large_arc, t.large_cubic.reversed()]).rotated(steps),
            );
        } else {
            let tiny = CompoundArc::single(t.tiny_arc.rotated(steps + 1));
            place(2, tiny.reversed());
            place(3, tiny);
            place(4, CompoundArc::single(t.small_arc.rotated(steps + 1)));
            place(
                1,
                CompoundArc::new(vec![t.small_cubic_mirror, t.small_arc.rotated(1)])
                    .reversed()
                    .rotated(steps),
            );
            place(
                0,
                CompoundArc::new(vec![t.small_cubic_mirror, t.large_cubic_mirror.reversed()])
                    .rotated(steps),
            );
            place(
                17,
                CompoundArc::new(vec![t.large_cubic_mirror, t.large_arc]).rotated(steps),
            );
        }
        place(16, CompoundArc::single(t.large_arc.reversed().rotated(steps)));
    }
    geometry
}
