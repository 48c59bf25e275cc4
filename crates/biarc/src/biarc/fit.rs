//! Biarc construction for a single cubic segment.

use std::f64::consts::TAU;

use nalgebra::Vector2;

use super::shape::{Arc, Segment, Shape};
use crate::curve::{
    angle_of, bisector, cross, line_intersection, midpoint, perp, try_unit, CubicBezier, Line2,
};

/// Two G1-joined pieces approximating a cubic: `first` runs from `p[0]` to
/// `inflection`, `second` from `inflection` to `p[3]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Biarc {
    pub inflection: Vector2<f64>,
    pub first: Shape,
    pub second: Shape,
}

/// Unit tangents at both ends, skipping coincident control points.
///
/// Falls back to `(0, 1)` at the start and `(1, 0)` at the end when every
/// control-point difference is degenerate.
pub fn end_tangents(curve: &CubicBezier) -> (Vector2<f64>, Vector2<f64>) {
    let p = &curve.p;
    let start = (1..4)
        .find_map(|i| try_unit(p[i] - p[i - 1]))
        .unwrap_or_else(|| Vector2::new(0.0, 1.0));
    let end = (1..4)
        .rev()
        .find_map(|i| try_unit(p[i] - p[i - 1]))
        .unwrap_or_else(|| Vector2::new(1.0, 0.0));
    (start, end)
}

/// Junction point of the biarc.
///
/// Intersects the bisector of `(p0 + t0, p3 + t1)` with the chord bisector;
/// of the two points at radius `|center - p0|` along the chord bisector the
/// one nearer `p0` is taken. Parallel bisectors give the chord midpoint.
pub fn biarc_inflection(curve: &CubicBezier) -> Vector2<f64> {
    let p0 = curve.start();
    let p3 = curve.end();
    let (t0, t1) = end_tangents(curve);
    let Some(chord_bis) = bisector(p0, p3) else {
        return midpoint(p0, p3);
    };
    let center = bisector(p0 + t0, p3 + t1).and_then(|l| line_intersection(&l, &chord_bis));
    let Some(center) = center else {
        return chord_bis.point;
    };
    let r = (center - p0).norm();
    let plus = center + chord_bis.dir * r;
    let minus = center - chord_bis.dir * r;
    if (plus - p0).norm() < (minus - p0).norm() {
        plus
    } else {
        minus
    }
}

/// Center of the arc tangent to `tangent` at `endpoint` that passes through
/// `inflection`. `None` when the two defining lines are parallel.
pub fn set_arc_center(
    endpoint: Vector2<f64>,
    tangent: Vector2<f64>,
    inflection: Vector2<f64>,
) -> Option<Vector2<f64>> {
    let bis = bisector(endpoint, inflection)?;
    let normal = Line2::new(endpoint, perp(tangent))?;
    line_intersection(&bis, &normal)
}

/// Arc from `from` to `to` around `center`, oriented so that the motion at
/// `anchor` agrees with `tangent`.
fn oriented_arc(
    center: Vector2<f64>,
    from: Vector2<f64>,
    to: Vector2<f64>,
    anchor: Vector2<f64>,
    tangent: Vector2<f64>,
) -> Option<Arc> {
    let radial = try_unit(anchor - center)?;
    let mut begin = angle_of(from - center);
    let mut end = angle_of(to - center);
    // Clockwise travel at the anchor: store the same point set counterclockwise.
    if cross(radial, tangent) < 0.0 {
        std::mem::swap(&mut begin, &mut end);
    }
    if end < begin {
        end += TAU;
    }
    Some(Arc {
        center,
        radius: (anchor - center).norm(),
        begin,
        end,
    })
}

/// Fit the biarc of `curve`. Degenerate halves become straight segments.
pub fn fit_biarc(curve: &CubicBezier) -> Biarc {
    let p0 = curve.start();
    let p3 = curve.end();
    let (t0, t1) = end_tangents(curve);
    let inflection = biarc_inflection(curve);

    let first = set_arc_center(p0, t0, inflection)
        .and_then(|c| oriented_arc(c, p0, inflection, p0, t0))
        .map(Shape::Arc)
        .unwrap_or(Shape::Line(Segment {
            start: p0,
            end: inflection,
        }));
    let second = set_arc_center(p3, t1, inflection)
        .and_then(|c| oriented_arc(c, inflection, p3, p3, t1))
        .map(Shape::Arc)
        .unwrap_or(Shape::Line(Segment {
            start: inflection,
            end: p3,
        }));

    Biarc {
        inflection,
        first,
        second,
    }
}
