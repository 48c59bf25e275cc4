//! Cubic Bézier curve and boundary validation.
//!
//! - `CubicBezier`: four control points, Bernstein evaluation, de Casteljau splits.
//! - `InputError`: rejects malformed input before it reaches the searches.

use std::fmt;

use nalgebra::Vector2;

use super::util::division_point;
use crate::cfg::MAX_POWER;

/// Errors raised at the library boundary for malformed queries.
#[derive(Clone, Debug, PartialEq)]
pub enum InputError {
    /// A curve needs exactly four control points.
    PointCount { expected: usize, actual: usize },
    /// A coordinate is NaN or infinite.
    NonFinite { index: usize },
    /// Subdivision power above `MAX_POWER`.
    PowerTooLarge { power: u32, max: u32 },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::PointCount { expected, actual } => {
                write!(f, "expected {expected} control points, got {actual}")
            }
            InputError::NonFinite { index } => {
                write!(f, "control point {index} has a non-finite coordinate")
            }
            InputError::PowerTooLarge { power, max } => {
                write!(f, "subdivision power {power} exceeds the maximum of {max}")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Reject powers that would blow up the hierarchy size.
pub fn check_power(power: u32) -> Result<(), InputError> {
    if power > MAX_POWER {
        return Err(InputError::PowerTooLarge {
            power,
            max: MAX_POWER,
        });
    }
    Ok(())
}

/// Cubic Bézier curve `B(t)`, `t ∈ [0, 1]`, with `B(0) = p[0]` and `B(1) = p[3]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub p: [Vector2<f64>; 4],
}

impl CubicBezier {
    #[inline]
    pub fn new(p0: Vector2<f64>, p1: Vector2<f64>, p2: Vector2<f64>, p3: Vector2<f64>) -> Self {
        Self {
            p: [p0, p1, p2, p3],
        }
    }

    /// All four control points at `q`.
    #[inline]
    pub fn point(q: Vector2<f64>) -> Self {
        Self { p: [q; 4] }
    }

    /// Validate and build from a slice of control points.
    pub fn from_points(points: &[Vector2<f64>]) -> Result<Self, InputError> {
        if points.len() != 4 {
            return Err(InputError::PointCount {
                expected: 4,
                actual: points.len(),
            });
        }
        if let Some(index) = points
            .iter()
            .position(|q| !(q.x.is_finite() && q.y.is_finite()))
        {
            return Err(InputError::NonFinite { index });
        }
        Ok(Self::new(points[0], points[1], points[2], points[3]))
    }

    /// Validate and build from interleaved coordinates `x0 y0 x1 y1 ...`.
    pub fn from_flat(coords: &[f64]) -> Result<Self, InputError> {
        if coords.len() != 8 {
            return Err(InputError::PointCount {
                expected: 4,
                actual: coords.len() / 2,
            });
        }
        let points: Vec<Vector2<f64>> = coords
            .chunks_exact(2)
            .map(|c| Vector2::new(c[0], c[1]))
            .collect();
        Self::from_points(&points)
    }

    #[inline]
    pub fn start(&self) -> Vector2<f64> {
        self.p[0]
    }

    #[inline]
    pub fn end(&self) -> Vector2<f64> {
        self.p[3]
    }

    /// Bernstein evaluation. Endpoints are returned exactly.
    pub fn eval(&self, t: f64) -> Vector2<f64> {
        if t == 0.0 {
            return self.p[0];
        }
        if t == 1.0 {
            return self.p[3];
        }
        let s = 1.0 - t;
        let b0 = s * s * s;
        let b1 = 3.0 * s * s * t;
        let b2 = 3.0 * s * t * t;
        let b3 = t * t * t;
        self.p[0] * b0 + self.p[1] * b1 + self.p[2] * b2 + self.p[3] * b3
    }

    /// de Casteljau split at `t`: `left` covers `[0, t]`, `right` covers `[t, 1]`.
    pub fn split(&self, t: f64) -> (CubicBezier, CubicBezier) {
        let [p0, p1, p2, p3] = self.p;
        let a = division_point(p0, p1, t);
        let b = division_point(p1, p2, t);
        let c = division_point(p2, p3, t);
        let ab = division_point(a, b, t);
        let bc = division_point(b, c, t);
        let m = division_point(ab, bc, t);
        (
            CubicBezier::new(p0, a, ab, m),
            CubicBezier::new(m, bc, c, p3),
        )
    }

    #[inline]
    pub fn bisect(&self) -> (CubicBezier, CubicBezier) {
        self.split(0.5)
    }

    /// `2^power` sub-curves by repeated bisection, in parameter order.
    pub fn subdivide(&self, power: u32) -> Vec<CubicBezier> {
        let mut curr = vec![*self];
        for _ in 0..power {
            let mut next = Vec::with_capacity(curr.len() * 2);
            for c in &curr {
                let (l, r) = c.bisect();
                next.push(l);
                next.push(r);
            }
            curr = next;
        }
        curr
    }

    /// Sub-curve on `[t0, t1]` (arguments may come in either order).
    ///
    /// A (near) empty interval yields a point curve at `B(t0)`.
    pub fn subcurve(&self, t0: f64, t1: f64) -> CubicBezier {
        let (a, b) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        let a = a.clamp(0.0, 1.0);
        let b = b.clamp(0.0, 1.0);
        if b - a < 1e-12 {
            return CubicBezier::point(self.eval(a));
        }
        let head = if b >= 1.0 { *self } else { self.split(b).0 };
        if a <= 0.0 {
            return head;
        }
        head.split(a / b).1
    }

    /// Same curve traversed from `p[3]` to `p[0]`.
    #[inline]
    pub fn reversed(&self) -> CubicBezier {
        CubicBezier::new(self.p[3], self.p[2], self.p[1], self.p[0])
    }

    /// `n + 1` uniform samples including both endpoints.
    pub fn sample(&self, n: usize) -> Vec<Vector2<f64>> {
        let n = n.max(1);
        (0..=n)
            .map(|i| self.eval(i as f64 / n as f64))
            .collect()
    }

    /// True when all control points coincide within `eps`.
    pub fn is_point(&self, eps: f64) -> bool {
        self.p.iter().all(|q| (q - self.p[0]).norm() <= eps)
    }
}
