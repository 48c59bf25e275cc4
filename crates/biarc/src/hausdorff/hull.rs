//! Control-polygon hull bound: a cubic lies inside the convex hull of its
//! control points, so the distance to that hull is a lower bound on the
//! distance to the curve.

use std::cmp::Ordering;

use nalgebra::Vector2;

use crate::biarc::point_segment_distance;
use crate::curve::{cross, CubicBezier};

#[inline]
fn turn(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    cross(b - a, c - a)
}

/// Counterclockwise hull (Andrew's monotone chain). Collinear and duplicate
/// points are dropped, so the result has 1, 2 or at least 3 vertices.
pub fn convex_hull(points: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(|a, b| match a.x.total_cmp(&b.x) {
        Ordering::Equal => a.y.total_cmp(&b.y),
        o => o,
    });
    pts.dedup_by(|a, b| (*a - *b).norm() < 1e-12);
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && turn(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && turn(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    hull
}

fn in_triangle(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> bool {
    let d1 = turn(a, b, p);
    let d2 = turn(b, c, p);
    let d3 = turn(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Distance from `p` to the convex hull of `curve`'s control points
/// (0 inside the hull).
pub fn hull_distance(p: Vector2<f64>, curve: &CubicBezier) -> f64 {
    let hull = convex_hull(&curve.p);
    match hull.len() {
        0 => f64::INFINITY,
        1 => (p - hull[0]).norm(),
        2 => point_segment_distance(p, hull[0], hull[1]),
        n => {
            if (1..n - 1).any(|i| in_triangle(p, hull[0], hull[i], hull[i + 1])) {
                return 0.0;
            }
            (0..n)
                .map(|i| point_segment_distance(p, hull[i], hull[(i + 1) % n]))
                .fold(f64::INFINITY, f64::min)
        }
    }
}
