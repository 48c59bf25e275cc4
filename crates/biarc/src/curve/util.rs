//! Small vector helpers shared by fitting, distance and search code.

use nalgebra::Vector2;

use crate::cfg::{EPS_DEGENERATE, EPS_PARALLEL};

#[inline]
pub fn midpoint(a: Vector2<f64>, b: Vector2<f64>) -> Vector2<f64> {
    (a + b) * 0.5
}

/// Point at parameter `t` on the segment `a → b` (`t=0` gives `a`).
#[inline]
pub fn division_point(a: Vector2<f64>, b: Vector2<f64>, t: f64) -> Vector2<f64> {
    a * (1.0 - t) + b * t
}

/// z-component of the 3D cross product of `a` and `b`.
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// `v` rotated by +90°.
#[inline]
pub fn perp(v: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-v.y, v.x)
}

/// Unit vector along `v`, or `None` for (near) zero vectors.
#[inline]
pub fn try_unit(v: Vector2<f64>) -> Option<Vector2<f64>> {
    let n = v.norm();
    if !n.is_finite() || n <= EPS_DEGENERATE {
        None
    } else {
        Some(v / n)
    }
}

#[inline]
pub fn angle_of(v: Vector2<f64>) -> f64 {
    v.y.atan2(v.x)
}

/// Infinite line through `point` along the unit direction `dir`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line2 {
    pub point: Vector2<f64>,
    pub dir: Vector2<f64>,
}

impl Line2 {
    /// `None` if `dir` is degenerate.
    #[inline]
    pub fn new(point: Vector2<f64>, dir: Vector2<f64>) -> Option<Self> {
        try_unit(dir).map(|dir| Self { point, dir })
    }
}

/// Perpendicular bisector of `p`–`q`. `None` when the points coincide.
pub fn bisector(p: Vector2<f64>, q: Vector2<f64>) -> Option<Line2> {
    Line2::new(midpoint(p, q), perp(q - p))
}

/// Intersection of two lines, `None` when they are parallel.
pub fn line_intersection(l1: &Line2, l2: &Line2) -> Option<Vector2<f64>> {
    let c = cross(l1.dir, l2.dir);
    if c.abs() < EPS_PARALLEL {
        return None;
    }
    let s = cross(l2.point - l1.point, l2.dir) / c;
    Some(l1.point + l1.dir * s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn intersection_of_axes_shifted() {
        let l1 = Line2::new(vector![0.0, 1.0], vector![1.0, 0.0]).unwrap();
        let l2 = Line2::new(vector![2.0, -3.0], vector![0.0, 2.0]).unwrap();
        let p = line_intersection(&l1, &l2).unwrap();
        assert!((p - vector![2.0, 1.0]).norm() < 1e-12);
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        let l1 = Line2::new(vector![0.0, 0.0], vector![1.0, 1.0]).unwrap();
        let l2 = Line2::new(vector![0.0, 1.0], vector![-2.0, -2.0]).unwrap();
        assert!(line_intersection(&l1, &l2).is_none());
    }

    #[test]
    fn bisector_is_equidistant() {
        let p = vector![1.0, 2.0];
        let q = vector![4.0, -1.0];
        let b = bisector(p, q).unwrap();
        let x = b.point + b.dir * 3.7;
        assert!(((x - p).norm() - (x - q).norm()).abs() < 1e-12);
        assert!(bisector(p, p).is_none());
    }

    #[test]
    fn zero_vector_has_no_unit() {
        assert!(try_unit(vector![0.0, 0.0]).is_none());
        let u = try_unit(vector![3.0, 4.0]).unwrap();
        assert!((u.norm() - 1.0).abs() < 1e-15);
    }
}
