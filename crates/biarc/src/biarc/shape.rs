//! Arc and line shapes, their boxes, Bézier forms and approximation error bounds.
//!
//! - `Shape`: tagged arc/segment (no NaN sentinels).
//! - `bezier_error_bound`: control-point deviation between two cubics, trying
//!   both index orders.
//! - `arc_approx_error_bound` / `choose_leaf_shape`: certified deviation of a
//!   shape from a curve segment, plus the chord fallback policy.

use std::f64::consts::{FRAC_PI_2, TAU};

use nalgebra::Vector2;

use crate::bvh::Aabb;
use crate::cfg::{MAX_ARC_SWEEP, MIN_ARC_SWEEP};
use crate::curve::{division_point, line_intersection, CubicBezier, Line2};

/// Circular arc swept counterclockwise from `begin` to `end` (radians).
///
/// Invariants: `radius >= 0`, `begin <= end`, `end - begin <= 2π`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    pub center: Vector2<f64>,
    pub radius: f64,
    pub begin: f64,
    pub end: f64,
}

impl Arc {
    #[inline]
    pub fn sweep(&self) -> f64 {
        self.end - self.begin
    }

    #[inline]
    pub fn point_at_angle(&self, angle: f64) -> Vector2<f64> {
        self.center + Vector2::new(angle.cos(), angle.sin()) * self.radius
    }

    #[inline]
    pub fn start_point(&self) -> Vector2<f64> {
        self.point_at_angle(self.begin)
    }

    #[inline]
    pub fn end_point(&self) -> Vector2<f64> {
        self.point_at_angle(self.end)
    }

    #[inline]
    pub fn mid_point(&self) -> Vector2<f64> {
        self.point_at_angle(0.5 * (self.begin + self.end))
    }

    /// Whether the direction `angle` (any winding) falls inside the sweep.
    #[inline]
    pub fn contains_angle(&self, angle: f64) -> bool {
        let a = self.begin + (angle - self.begin).rem_euclid(TAU);
        a <= self.end
    }

    /// Bounding box: endpoints plus every axis extreme crossed by the sweep.
    pub fn aabb(&self) -> Aabb {
        let mut bb = Aabb::from_point(self.start_point());
        bb.include(self.end_point());
        let k_lo = (self.begin / FRAC_PI_2).ceil() as i64;
        let k_hi = (self.end / FRAC_PI_2).floor() as i64;
        for k in k_lo..=k_hi {
            let dir = match k.rem_euclid(4) {
                0 => Vector2::new(1.0, 0.0),
                1 => Vector2::new(0.0, 1.0),
                2 => Vector2::new(-1.0, 0.0),
                _ => Vector2::new(0.0, -1.0),
            };
            bb.include(self.center + dir * self.radius);
        }
        bb
    }

    /// Cubic through both endpoints whose inner control points sit 2/3 of the
    /// way to the intersection of the end tangents.
    pub fn to_bezier(&self) -> CubicBezier {
        let p0 = self.start_point();
        let p3 = self.end_point();
        let t0 = Vector2::new(-self.begin.sin(), self.begin.cos());
        let t1 = Vector2::new(-self.end.sin(), self.end.cos());
        let q = Line2::new(p0, t0)
            .zip(Line2::new(p3, t1))
            .and_then(|(l0, l1)| line_intersection(&l0, &l1));
        match q {
            Some(q) => CubicBezier::new(
                p0,
                p0 + (q - p0) * (2.0 / 3.0),
                p3 + (q - p3) * (2.0 / 3.0),
                p3,
            ),
            None => Segment { start: p0, end: p3 }.to_bezier(),
        }
    }
}

/// Straight segment `start → end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vector2<f64>,
    pub end: Vector2<f64>,
}

impl Segment {
    #[inline]
    pub fn point_at(&self, t: f64) -> Vector2<f64> {
        division_point(self.start, self.end, t)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    pub fn aabb(&self) -> Aabb {
        let mut bb = Aabb::from_point(self.start);
        bb.include(self.end);
        bb
    }

    /// Uniformly parametrized cubic form of the segment.
    pub fn to_bezier(&self) -> CubicBezier {
        CubicBezier::new(
            self.start,
            division_point(self.start, self.end, 1.0 / 3.0),
            division_point(self.start, self.end, 2.0 / 3.0),
            self.end,
        )
    }
}

/// Leaf approximation of a curve piece: a genuine arc or a straight segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Arc(Arc),
    Line(Segment),
}

impl Shape {
    #[inline]
    pub fn is_line(&self) -> bool {
        matches!(self, Shape::Line(_))
    }

    /// Point at normalized parameter `u ∈ [0, 1]` (angle-linear for arcs).
    pub fn point_at(&self, u: f64) -> Vector2<f64> {
        match self {
            Shape::Arc(a) => a.point_at_angle(a.begin + u * a.sweep()),
            Shape::Line(s) => s.point_at(u),
        }
    }

    pub fn aabb(&self) -> Aabb {
        match self {
            Shape::Arc(a) => a.aabb(),
            Shape::Line(s) => s.aabb(),
        }
    }

    pub fn to_bezier(&self) -> CubicBezier {
        match self {
            Shape::Arc(a) => a.to_bezier(),
            Shape::Line(s) => s.to_bezier(),
        }
    }
}

/// Largest control-point deviation between two cubics, minimized over the
/// forward and the reversed index matching.
///
/// Both curves are sampled at the same parameter, so `|c1(t) - c2(t)|` never
/// exceeds this value for the better of the two orientations.
pub fn bezier_error_bound(c1: &CubicBezier, c2: &CubicBezier) -> f64 {
    let mut forward: f64 = 0.0;
    let mut backward: f64 = 0.0;
    for i in 0..4 {
        forward = forward.max((c1.p[i] - c2.p[i]).norm());
        backward = backward.max((c1.p[3 - i] - c2.p[i]).norm());
    }
    forward.min(backward)
}

/// Certified deviation between `shape` and the curve segment it stands in for.
pub fn arc_approx_error_bound(shape: &Shape, curve: &CubicBezier) -> f64 {
    let approx = shape.to_bezier();
    let inter = bezier_error_bound(curve, &approx);
    match shape {
        Shape::Line(_) => inter,
        Shape::Arc(a) => inter + (approx.eval(0.5) - a.mid_point()).norm(),
    }
}

/// Pick the leaf shape for `segment` and return it with its error bound.
///
/// Arcs sweeping more than 90° or at most 0.001 rad are replaced by the chord
/// of `segment`; otherwise the chord still wins when its bound is smaller.
pub fn choose_leaf_shape(fitted: Shape, segment: &CubicBezier) -> (Shape, f64) {
    let chord = Shape::Line(Segment {
        start: segment.start(),
        end: segment.end(),
    });
    let chord_err = arc_approx_error_bound(&chord, segment);
    if let Shape::Arc(a) = fitted {
        let sweep = a.sweep();
        if !(sweep > MIN_ARC_SWEEP && sweep <= MAX_ARC_SWEEP) || !a.radius.is_finite() {
            return (chord, chord_err);
        }
    }
    let fitted_err = arc_approx_error_bound(&fitted, segment);
    if chord_err < fitted_err {
        (chord, chord_err)
    } else {
        (fitted, fitted_err)
    }
}
