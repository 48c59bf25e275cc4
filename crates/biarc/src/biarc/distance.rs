//! Exact closest points between two leaf shapes.
//!
//! Every routine returns `(distance, point_on_a, point_on_b)`. Intersecting
//! shapes report distance 0 with the intersection point on both sides.
//! Otherwise the minimum is taken over the finite candidate set where a
//! closest pair can occur: endpoint pairs, radial projections of endpoints,
//! and center-line or perpendicular-foot points that fall inside the sweeps.

use nalgebra::Vector2;

use super::shape::{Arc, Segment, Shape};
use crate::curve::{angle_of, cross, try_unit};

/// Running minimum over candidate point pairs.
struct Closest {
    dist: f64,
    a: Vector2<f64>,
    b: Vector2<f64>,
}

impl Closest {
    fn new(a: Vector2<f64>, b: Vector2<f64>) -> Self {
        Self {
            dist: (a - b).norm(),
            a,
            b,
        }
    }

    fn offer(&mut self, a: Vector2<f64>, b: Vector2<f64>) {
        let d = (a - b).norm();
        if d < self.dist {
            *self = Self { dist: d, a, b };
        }
    }

    fn into_tuple(self) -> (f64, Vector2<f64>, Vector2<f64>) {
        (self.dist, self.a, self.b)
    }
}

/// Closest point on `a → b` to `p`.
pub fn closest_on_segment(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> Vector2<f64> {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 <= f64::EPSILON * f64::EPSILON {
        return a;
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

/// Distance from `p` to the segment `a → b`.
pub fn point_segment_distance(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    (p - closest_on_segment(p, a, b)).norm()
}

/// Radial projection of `p` onto the arc, if the direction lies in its sweep.
fn radial_on_arc(p: Vector2<f64>, arc: &Arc) -> Option<Vector2<f64>> {
    let u = try_unit(p - arc.center)?;
    arc.contains_angle(angle_of(u))
        .then(|| arc.center + u * arc.radius)
}

/// Crossing point of two segments that properly intersect.
fn segment_crossing(s1: &Segment, s2: &Segment) -> Option<Vector2<f64>> {
    let (a, b, c, d) = (s1.start, s1.end, s2.start, s2.end);
    let d1 = cross(b - a, c - a);
    let d2 = cross(b - a, d - a);
    let d3 = cross(d - c, a - c);
    let d4 = cross(d - c, b - c);
    if d1 * d2 < 0.0 && d3 * d4 < 0.0 {
        Some(a + (b - a) * (d3 / (d3 - d4)))
    } else {
        None
    }
}

fn line_line(s1: &Segment, s2: &Segment) -> (f64, Vector2<f64>, Vector2<f64>) {
    if let Some(x) = segment_crossing(s1, s2) {
        return (0.0, x, x);
    }
    let mut best = Closest::new(s1.start, closest_on_segment(s1.start, s2.start, s2.end));
    best.offer(s1.end, closest_on_segment(s1.end, s2.start, s2.end));
    best.offer(closest_on_segment(s2.start, s1.start, s1.end), s2.start);
    best.offer(closest_on_segment(s2.end, s1.start, s1.end), s2.end);
    best.into_tuple()
}

fn arc_line(arc: &Arc, seg: &Segment) -> (f64, Vector2<f64>, Vector2<f64>) {
    let v = seg.end - seg.start;
    let a2 = v.norm_squared();

    // |start + s v - c|^2 = r^2
    if a2 > 0.0 {
        let w = seg.start - arc.center;
        let b = 2.0 * v.dot(&w);
        let c = w.norm_squared() - arc.radius * arc.radius;
        let disc = b * b - 4.0 * a2 * c;
        if disc >= 0.0 {
            let sq = disc.sqrt();
            for s in [(-b - sq) / (2.0 * a2), (-b + sq) / (2.0 * a2)] {
                if (0.0..=1.0).contains(&s) {
                    let x = seg.start + v * s;
                    if arc.contains_angle(angle_of(x - arc.center)) {
                        return (0.0, x, x);
                    }
                }
            }
        }
    }

    let (e0, e1) = (arc.start_point(), arc.end_point());
    let mut best = Closest::new(e0, closest_on_segment(e0, seg.start, seg.end));
    best.offer(e1, closest_on_segment(e1, seg.start, seg.end));
    for p in [seg.start, seg.end] {
        if let Some(q) = radial_on_arc(p, arc) {
            best.offer(q, p);
        }
    }
    if a2 > 0.0 {
        let foot = seg.start + v * ((arc.center - seg.start).dot(&v) / a2);
        if let Some(q) = radial_on_arc(foot, arc) {
            best.offer(q, closest_on_segment(q, seg.start, seg.end));
        }
    }
    best.into_tuple()
}

fn arc_arc(a1: &Arc, a2: &Arc) -> (f64, Vector2<f64>, Vector2<f64>) {
    let (r1, r2) = (a1.radius, a2.radius);
    let between = a2.center - a1.center;
    let d = between.norm();

    if d > 0.0 && (r1 - r2).abs() < d && d < r1 + r2 {
        let phi = angle_of(between);
        let alpha = ((r1 * r1 + d * d - r2 * r2) / (2.0 * r1 * d))
            .clamp(-1.0, 1.0)
            .acos();
        for theta in [phi - alpha, phi + alpha] {
            let x = a1.point_at_angle(theta);
            if a1.contains_angle(theta) && a2.contains_angle(angle_of(x - a2.center)) {
                return (0.0, x, x);
            }
        }
    }

    let (s1, e1) = (a1.start_point(), a1.end_point());
    let (s2, e2) = (a2.start_point(), a2.end_point());
    let mut best = Closest::new(s1, s2);
    best.offer(s1, e2);
    best.offer(e1, s2);
    best.offer(e1, e2);
    for p in [s2, e2] {
        if let Some(q) = radial_on_arc(p, a1) {
            best.offer(q, p);
        }
    }
    for p in [s1, e1] {
        if let Some(q) = radial_on_arc(p, a2) {
            best.offer(p, q);
        }
    }
    if let Some(u) = try_unit(between) {
        for sign1 in [1.0, -1.0] {
            let th1 = angle_of(u * sign1);
            if !a1.contains_angle(th1) {
                continue;
            }
            for sign2 in [1.0, -1.0] {
                let th2 = angle_of(u * sign2);
                if a2.contains_angle(th2) {
                    best.offer(a1.point_at_angle(th1), a2.point_at_angle(th2));
                }
            }
        }
    }
    best.into_tuple()
}

/// Exact minimum distance between two shapes with the closest point pair.
pub fn closest_points(a: &Shape, b: &Shape) -> (f64, Vector2<f64>, Vector2<f64>) {
    match (a, b) {
        (Shape::Arc(x), Shape::Arc(y)) => arc_arc(x, y),
        (Shape::Arc(x), Shape::Line(y)) => arc_line(x, y),
        (Shape::Line(x), Shape::Arc(y)) => {
            let (d, on_arc, on_line) = arc_line(y, x);
            (d, on_line, on_arc)
        }
        (Shape::Line(x), Shape::Line(y)) => line_line(x, y),
    }
}

#[inline]
pub fn shape_distance(a: &Shape, b: &Shape) -> f64 {
    closest_points(a, b).0
}
