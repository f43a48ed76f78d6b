//! Fitting a linear gradient across a path, so that shading runs exactly from one side of a loop
//! to the other along the direction of the light.

use std::f32::consts::PI;

use angle::{Angle, Rad};

use crate::{utils::CircularArc, V2Ext, V2};

use super::{
    path::{Path, PathCmd},
    template::Cubic,
};

/// Arcs are sampled at least this often (30°)
const ARC_SAMPLE_STEP: f32 = PI / 6.0;

/// A cloud of points sampled along a [`Path`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradientFitter {
    samples: Vec<V2>,
}

impl GradientFitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples every curve of a path.  Straight lines and moves contribute no samples of their
    /// own.
    pub fn from_path(path: &Path) -> Self {
        let mut fitter = Self::new();
        let mut current = V2::ZERO;
        for cmd in path.cmds() {
            match *cmd {
                PathCmd::MoveTo(p) | PathCmd::LineTo(p) => current = p,
                PathCmd::CubicTo(p1, p2, p3) => {
                    fitter.add_cubic(&Cubic::new(current, p1, p2, p3));
                    current = p3;
                }
                PathCmd::Arc(arc) => {
                    fitter.add_arc(&arc);
                    current = arc.end_point();
                }
                PathCmd::Close => {}
            }
        }
        fitter
    }

    pub fn samples(&self) -> &[V2] {
        &self.samples
    }

    pub fn add_point(&mut self, p: V2) {
        self.samples.push(p);
    }

    /// Samples the ends of every piece of `arc`, after cutting it into pieces of at most 30°
    pub fn add_arc(&mut self, arc: &CircularArc) {
        let (from, span) = arc.increasing_span();
        // Allow for rounding error when the span is a whole number of steps
        let num_pieces = (span / ARC_SAMPLE_STEP - 1e-3).ceil() as usize;
        if num_pieces == 0 {
            self.add_point(arc.point_at(from));
            return;
        }
        let step = span / num_pieces as f32;
        for k in 0..=num_pieces {
            self.add_point(arc.point_at(from + k as f32 * step));
        }
    }

    /// Samples `cubic` at `t = 0, 1, 0.5, 0.25, 0.75`
    pub fn add_cubic(&mut self, cubic: &Cubic) {
        let (first_half, second_half) = cubic.split(0.5);
        let (first_quarter, _) = first_half.split(0.5);
        let (third_quarter, _) = second_half.split(0.5);
        self.add_point(cubic.points[0]);
        self.add_point(cubic.points[3]);
        self.add_point(second_half.points[0]);
        self.add_point(first_quarter.points[3]);
        self.add_point(third_quarter.points[3]);
    }

    /// Projects every sample onto the direction `angle`, returning the sample with the smallest
    /// projection and the distance between the smallest and largest projections.  If there's
    /// nothing to measure, the distance is 1.
    pub fn extent(&self, angle: impl Angle<f32> + Copy) -> (V2, f32) {
        let direction = V2::from_angle(angle);
        let mut min_point = V2::ZERO;
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &p in &self.samples {
            let projection = p.x * direction.x + p.y * direction.y;
            if projection < min {
                min = projection;
                min_point = p;
            }
            max = max.max(projection);
        }

        let extent = max - min;
        if !extent.is_finite() || extent == 0.0 {
            (min_point, 1.0)
        } else {
            (min_point, extent)
        }
    }

    /// The start and end points of a gradient running across every sample in the direction
    /// `angle`
    pub fn endpoints(&self, angle: Rad<f32>) -> (V2, V2) {
        let (start, extent) = self.extent(angle);
        (start, start + V2::from_angle(angle) * extent)
    }
}
