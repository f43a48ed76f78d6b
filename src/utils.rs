//! Miscellaneous utility functions, usually related to vectors.

use std::f32::consts::{PI, TAU};

use angle::{Angle, Rad};

use crate::V2;

/// `sqrt(3) / 2`, the sine of 60°
pub const SQRT_3_BY_2: f32 = 0.866_025_4;

/// Cosines of multiples of 60°.  Kept as literals so that rotations by 0° or 180° are exact.
const SIXTH_COS: [f32; 6] = [1.0, 0.5, -0.5, -1.0, -0.5, 0.5];
/// Sines of multiples of 60°
const SIXTH_SIN: [f32; 6] = [0.0, SQRT_3_BY_2, SQRT_3_BY_2, 0.0, -SQRT_3_BY_2, -SQRT_3_BY_2];

/// Extension methods and constants for [`V2`]
pub trait V2Ext: Sized {
    const ZERO: Self;
    const ONE: Self;

    /// Rotates this vector **clockwise** (our y-axis points down) by a given angle
    fn rotate(self, angle: impl Angle<f32> + Copy) -> Self;

    /// Rotates this vector clockwise by `steps` sixths of a turn.  `steps` can be any integer.
    fn rotate_sixths(self, steps: i32) -> Self;

    /// The unit vector pointing at a given angle (measured clockwise from the positive x-axis)
    fn from_angle(angle: impl Angle<f32> + Copy) -> Self;
}

impl V2Ext for V2 {
    const ZERO: Self = V2 { x: 0.0, y: 0.0 };
    const ONE: Self = V2 { x: 1.0, y: 1.0 };

    fn rotate(self, angle: impl Angle<f32> + Copy) -> Self {
        let sin = angle.sin();
        let cos = angle.cos();
        // Rotation **clockwise** corresponds to multiplication by the following matrix (which
        // looks like the classic anti-clockwise matrix because our y-axis goes down where the one
        // in maths goes up):
        // | cos(angle)  -sin(angle) |
        // | sin(angle)   cos(angle) |
        V2 {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    fn rotate_sixths(self, steps: i32) -> Self {
        let k = steps.rem_euclid(6) as usize;
        let (cos, sin) = (SIXTH_COS[k], SIXTH_SIN[k]);
        V2 {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    fn from_angle(angle: impl Angle<f32> + Copy) -> Self {
        V2::new(angle.cos(), angle.sin())
    }
}

/// Linearly interpolate between two points (`t = 0` gives `a`, `t = 1` gives `b`)
pub fn lerp(a: V2, b: V2, t: f32) -> V2 {
    a * (1.0 - t) + b * t
}

/// Converts an angle expressed in sixths of a turn into radians
pub fn sixths_to_rad(sixths: i32) -> Rad<f32> {
    Rad(sixths as f32 * PI / 3.0)
}

/// A circular arc, with the same parameters as an HTML canvas `arc()` call: the arc runs from
/// `start` to `end`, clockwise on screen unless `anticlockwise` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArc {
    pub centre: V2,
    pub radius: f32,
    /// Start angle, in radians
    pub start: f32,
    /// End angle, in radians
    pub end: f32,
    pub anticlockwise: bool,
}

impl CircularArc {
    /// The point on this arc's circle at a given angle
    pub fn point_at(&self, angle: f32) -> V2 {
        self.centre + V2::from_angle(Rad(angle)) * self.radius
    }

    pub fn start_point(&self) -> V2 {
        self.point_at(self.start)
    }

    pub fn end_point(&self) -> V2 {
        self.point_at(self.end)
    }

    /// Returns `(from, span)` such that the arc covers the angles `from..=from + span` in
    /// increasing order, with `0 <= span < 2π`.  Anticlockwise arcs are swapped so that this is
    /// always the case.
    pub fn increasing_span(&self) -> (f32, f32) {
        let (from, to) = if self.anticlockwise {
            (self.end, self.start)
        } else {
            (self.start, self.end)
        };
        (from, (to - from).rem_euclid(TAU))
    }

    /// Scale this arc about the origin, then translate it
    pub fn transform(&self, translation: V2, scale: f32) -> Self {
        Self {
            centre: self.centre * scale + translation,
            radius: self.radius * scale,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: V2, b: V2) {
        assert!(
            (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn sixth_rotations_match_general_rotation() {
        let v = V2::new(0.3, -0.7);
        for k in -7..13 {
            assert_close(v.rotate_sixths(k), v.rotate(sixths_to_rad(k)));
        }
    }

    #[test]
    fn half_turns_are_exact() {
        let v = V2::new(0.123, -4.5);
        assert_eq!(v.rotate_sixths(3).rotate_sixths(3), v.rotate_sixths(0));
        assert_eq!(v.rotate_sixths(6), v);
    }

    #[test]
    fn anticlockwise_arcs_swap_ends() {
        let arc = CircularArc {
            centre: V2::ZERO,
            radius: 1.0,
            start: PI / 2.0,
            end: 0.0,
            anticlockwise: true,
        };
        let (from, span) = arc.increasing_span();
        assert_eq!(from, 0.0);
        assert!((span - PI / 2.0).abs() < 1e-6);
        assert_close(arc.start_point(), V2::new(0.0, 1.0));
        assert_close(arc.end_point(), V2::new(1.0, 0.0));
    }

    #[test]
    fn lerp_endpoints() {
        let (a, b) = (V2::new(1.0, 2.0), V2::new(3.0, -2.0));
        assert_close(lerp(a, b, 0.0), a);
        assert_close(lerp(a, b, 1.0), b);
        assert_close(lerp(a, b, 0.5), V2::new(2.0, 0.0));
    }
}
