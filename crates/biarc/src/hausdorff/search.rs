//! Point projection and the Hausdorff branch-and-bound.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use nalgebra::Vector2;
use tracing::{debug, trace};

use super::hull::hull_distance;
use crate::biarc::bezier_error_bound;
use crate::bvh::DistanceEstimate;
use crate::cfg::SearchCfg;
use crate::curve::{check_power, CubicBezier, InputError};

/// Closest point found on a curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub t: f64,
    pub point: Vector2<f64>,
    /// Within `projection_tol` above the true point-to-curve distance.
    pub distance: f64,
}

/// Parameter interval `[t0, t1]` of a curve with its key.
#[derive(Clone, Copy, Debug)]
struct Interval {
    key: f64,
    t0: f64,
    t1: f64,
    seg: CubicBezier,
}

impl Interval {
    #[inline]
    fn mid(&self) -> f64 {
        0.5 * (self.t0 + self.t1)
    }
}

/// Min-heap wrapper keyed by the hull lower bound.
struct ByLower(Interval);

impl PartialEq for ByLower {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for ByLower {}
impl PartialOrd for ByLower {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for ByLower {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .key
            .total_cmp(&self.0.key)
            .then_with(|| other.0.t0.total_cmp(&self.0.t0))
    }
}

/// Nearest point of `curve` to `p` by best-first bisection of the parameter
/// range. Stops once the best distance is within `cfg.projection_tol` of the
/// smallest hull bound still queued.
pub fn project(p: Vector2<f64>, curve: &CubicBezier, cfg: &SearchCfg) -> Projection {
    let d0 = (p - curve.start()).norm();
    let d1 = (p - curve.end()).norm();
    let mut best = if d1 < d0 {
        Projection {
            t: 1.0,
            point: curve.end(),
            distance: d1,
        }
    } else {
        Projection {
            t: 0.0,
            point: curve.start(),
            distance: d0,
        }
    };

    let mut heap = BinaryHeap::new();
    heap.push(ByLower(Interval {
        key: hull_distance(p, curve),
        t0: 0.0,
        t1: 1.0,
        seg: *curve,
    }));

    let mut pops = 0usize;
    while let Some(ByLower(iv)) = heap.pop() {
        if best.distance - iv.key < cfg.projection_tol {
            break;
        }
        pops += 1;
        if pops > cfg.max_projection_pops {
            trace!(pops, gap = best.distance - iv.key, "projection pop cap reached");
            break;
        }
        let tm = iv.mid();
        let (left, right) = iv.seg.bisect();
        for (seg, t0, t1) in [(left, iv.t0, tm), (right, tm, iv.t1)] {
            let child = Interval {
                key: hull_distance(p, &seg).max(iv.key),
                t0,
                t1,
                seg,
            };
            let q = seg.eval(0.5);
            let d = (p - q).norm();
            if d < best.distance {
                best = Projection {
                    t: child.mid(),
                    point: q,
                    distance: d,
                };
            }
            let q = seg.start();
            let d = (p - q).norm();
            if d < best.distance {
                best = Projection {
                    t: t0,
                    point: q,
                    distance: d,
                };
            }
            if child.key < best.distance - cfg.projection_tol {
                heap.push(ByLower(child));
            }
        }
    }
    best
}

/// Discrete one-sided lower bound: `n + 1` samples of `c1` projected onto
/// `c2`; the largest distance with its pair `(on c1, on c2)`.
pub fn sample_lower_bound(
    c1: &CubicBezier,
    c2: &CubicBezier,
    n: usize,
    cfg: &SearchCfg,
) -> (f64, Vector2<f64>, Vector2<f64>) {
    let mut best = (0.0, c1.start(), c2.start());
    let mut first = true;
    for q in c1.sample(n) {
        let proj = project(q, c2, cfg);
        if first || proj.distance > best.0 {
            best = (proj.distance, q, proj.point);
            first = false;
        }
    }
    best
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    /// Interval of curve 1 measured against curve 2.
    First,
    /// Interval of curve 2 measured against curve 1.
    Second,
}

/// Max-heap entry keyed by the interval's upper bound.
struct ByUpper {
    side: Side,
    iv: Interval,
}

impl PartialEq for ByUpper {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for ByUpper {}
impl PartialOrd for ByUpper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for ByUpper {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iv
            .key
            .total_cmp(&other.iv.key)
            .then_with(|| other.iv.t0.total_cmp(&self.iv.t0))
    }
}

/// Runner for one- and two-sided Hausdorff searches.
struct HausdorffRunner<'a> {
    curves: [&'a CubicBezier; 2],
    cfg: &'a SearchCfg,
    heap: BinaryHeap<ByUpper>,
    lower: f64,
    witness: (Vector2<f64>, Vector2<f64>),
    pops: usize,
}

impl<'a> HausdorffRunner<'a> {
    fn new(c1: &'a CubicBezier, c2: &'a CubicBezier, cfg: &'a SearchCfg) -> Self {
        Self {
            curves: [c1, c2],
            cfg,
            heap: BinaryHeap::new(),
            lower: 0.0,
            witness: (c1.start(), c2.start()),
            pops: 0,
        }
    }

    fn source(&self, side: Side) -> &'a CubicBezier {
        match side {
            Side::First => self.curves[0],
            Side::Second => self.curves[1],
        }
    }

    fn target(&self, side: Side) -> &'a CubicBezier {
        match side {
            Side::First => self.curves[1],
            Side::Second => self.curves[0],
        }
    }

    /// Raise the lower bound with sampled projections of `seg` onto the target.
    fn raise_lower(&mut self, side: Side, seg: &CubicBezier) {
        let (d, on_src, on_tgt) =
            sample_lower_bound(seg, self.target(side), self.cfg.samples, self.cfg);
        if d > self.lower {
            self.lower = d;
            self.witness = match side {
                Side::First => (on_src, on_tgt),
                Side::Second => (on_tgt, on_src),
            };
        }
    }

    /// Upper bound for the interval `[t0, t1]` of the source curve: deviation
    /// from the target piece between the projections of its endpoints.
    fn interval(&self, side: Side, t0: f64, t1: f64, parent: f64) -> Interval {
        let seg = self.source(side).subcurve(t0, t1);
        let target = self.target(side);
        let a = project(seg.start(), target, self.cfg);
        let b = project(seg.end(), target, self.cfg);
        let piece = target.subcurve(a.t, b.t);
        Interval {
            key: bezier_error_bound(&seg, &piece).min(parent),
            t0,
            t1,
            seg,
        }
    }

    fn top_key(&self) -> Option<f64> {
        self.heap.peek().map(|top| top.iv.key)
    }

    /// One pass seeded with `2^stage` intervals per side, every key capped
    /// by `cap`. Returns the largest key still queued and whether the pass
    /// met the tolerance before the stale valve fired.
    fn run_stage(&mut self, sides: &[Side], stage: u32, cap: f64) -> (f64, bool) {
        self.heap.clear();
        let seeds = 1usize << stage;
        for &side in sides {
            for k in 0..seeds {
                let t0 = k as f64 / seeds as f64;
                let t1 = (k + 1) as f64 / seeds as f64;
                let iv = self.interval(side, t0, t1, cap);
                self.heap.push(ByUpper { side, iv });
            }
        }

        let mut stale = 0usize;
        loop {
            let Some(best_upper) = self.top_key() else {
                return (cap, true);
            };
            if best_upper < self.lower + self.cfg.hausdorff_tol {
                return (best_upper, true);
            }
            if stale > self.cfg.max_stale_pops {
                return (best_upper, false);
            }
            let Some(ByUpper { side, iv }) = self.heap.pop() else {
                return (best_upper, true);
            };
            self.pops += 1;

            let tm = iv.mid();
            let left = self.interval(side, iv.t0, tm, iv.key);
            let right = self.interval(side, tm, iv.t1, iv.key);
            self.raise_lower(side, &left.seg);
            self.raise_lower(side, &right.seg);
            self.heap.push(ByUpper { side, iv: left });
            self.heap.push(ByUpper { side, iv: right });

            if self.top_key().is_some_and(|k| k < best_upper) {
                stale = 0;
            } else {
                stale += 1;
            }
        }
    }

    /// Stages `0..=power`; stage `k` seeds `2^k` intervals per side and
    /// starts from the bracket the earlier stages left.
    fn solve(mut self, sides: &[Side], power: u32) -> DistanceEstimate {
        let mut upper = bezier_error_bound(self.curves[0], self.curves[1]);
        for &side in sides {
            let c = self.source(side);
            self.raise_lower(side, c);
        }

        let mut converged = true;
        for stage in 0..=power {
            if upper < self.lower + self.cfg.hausdorff_tol {
                break;
            }
            let (stage_upper, settled) = self.run_stage(sides, stage, upper);
            upper = upper.min(stage_upper);
            converged = settled;
            trace!(stage, lower = self.lower, upper, settled, "hausdorff stage done");
        }

        // projections overshoot by at most `projection_tol`
        let lower = (self.lower - self.cfg.projection_tol).max(0.0);
        let upper = upper.max(lower);
        debug!(
            pops = self.pops,
            lower,
            upper,
            converged,
            "hausdorff search done"
        );
        DistanceEstimate::from_bounds(lower, upper, self.witness, self.pops, converged)
    }
}

/// Two-sided Hausdorff distance between `c1` and `c2`.
///
/// The search runs once per stage `0..=power`, stage `k` pre-splitting each
/// curve into `2^k` seed intervals, so a larger `power` never widens the
/// bracket.
pub fn hausdorff(
    c1: &CubicBezier,
    c2: &CubicBezier,
    power: u32,
    cfg: &SearchCfg,
) -> Result<DistanceEstimate, InputError> {
    check_power(power)?;
    Ok(HausdorffRunner::new(c1, c2, cfg).solve(&[Side::First, Side::Second], power))
}

/// One-sided Hausdorff distance: how far `c1` strays from `c2`.
pub fn directed_hausdorff(
    c1: &CubicBezier,
    c2: &CubicBezier,
    power: u32,
    cfg: &SearchCfg,
) -> Result<DistanceEstimate, InputError> {
    check_power(power)?;
    Ok(HausdorffRunner::new(c1, c2, cfg).solve(&[Side::First], power))
}

