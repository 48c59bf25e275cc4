//! Best-first minimum distance over two hierarchies, one tree level at a time.
//!
//! Level `k` refines the surviving pairs of level `k - 1` until both nodes of
//! each pair sit at depth `k`, then bounds each pair by the exact distance of
//! the two covers minus their errors. Everything a level computes depends only
//! on nodes down to depth `k`, so a tree built with a larger `power` repeats
//! the same levels and adds more: the bracket never widens with `power`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use nalgebra::Vector2;
use tracing::{debug, trace};

use super::types::{DistanceEstimate, Hierarchy, NodeId};
use crate::biarc::closest_points;
use crate::cfg::SearchCfg;
use crate::curve::{CubicBezier, InputError};

/// Smallest distance over `(n+1)^2` uniform sample pairs, with the pair.
pub fn sampled_min_distance(
    c1: &CubicBezier,
    c2: &CubicBezier,
    n: usize,
) -> (f64, Vector2<f64>, Vector2<f64>) {
    let s1 = c1.sample(n);
    let s2 = c2.sample(n);
    let mut best = (f64::INFINITY, s1[0], s2[0]);
    for p in &s1 {
        for q in &s2 {
            let d = (p - q).norm();
            if d < best.0 {
                best = (d, *p, *q);
            }
        }
    }
    best
}

/// Queued node pair; the heap pops the smallest bound first and breaks ties
/// by push order.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    bound: f64,
    seq: u64,
    a: NodeId,
    b: NodeId,
    /// Not yet sampled.
    fresh: bool,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: BinaryHeap is a max-heap
        other
            .bound
            .total_cmp(&self.bound)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Runner carrying the two trees, the queue and the incumbent bracket.
struct MinDistRunner<'a> {
    h1: &'a Hierarchy,
    h2: &'a Hierarchy,
    cfg: &'a SearchCfg,
    heap: BinaryHeap<Candidate>,
    seq: u64,
    lower: f64,
    upper: f64,
    witness: (Vector2<f64>, Vector2<f64>),
    pops: usize,
}

impl<'a> MinDistRunner<'a> {
    fn new(h1: &'a Hierarchy, h2: &'a Hierarchy, cfg: &'a SearchCfg) -> Self {
        let (upper, p, q) = sampled_min_distance(h1.curve(), h2.curve(), cfg.samples);
        Self {
            h1,
            h2,
            cfg,
            heap: BinaryHeap::new(),
            seq: 0,
            lower: 0.0,
            upper,
            witness: (p, q),
            pops: 0,
        }
    }

    fn offer_upper(&mut self, d: f64, p: Vector2<f64>, q: Vector2<f64>) {
        if d < self.upper {
            self.upper = d;
            self.witness = (p, q);
        }
    }

    fn push(&mut self, bound: f64, a: NodeId, b: NodeId, fresh: bool) {
        if bound < self.upper {
            self.heap.push(Candidate {
                bound,
                seq: self.seq,
                a,
                b,
                fresh,
            });
            self.seq += 1;
        }
    }

    /// Descend from the pairs that ended at the previous level until both
    /// nodes of every pair sit at depth `level` (or are leaves). Returns
    /// those pairs with bounds tightened by their covers, and raises the
    /// lower bound to the smallest of them.
    fn refine(&mut self, frontier: Vec<Candidate>, level: u32) -> Vec<Candidate> {
        let (h1, h2) = (self.h1, self.h2);
        self.heap.clear();
        for c in frontier {
            self.push(c.bound, c.a, c.b, false);
        }

        let mut reached = Vec::new();
        let mut floor = f64::INFINITY;
        while let Some(Candidate {
            bound, a, b, fresh, ..
        }) = self.heap.pop()
        {
            if bound > self.upper {
                break;
            }
            self.pops += 1;

            let (na, nb) = (h1.node(a), h2.node(b));
            if fresh {
                let (d, p, q) = sampled_min_distance(&na.segment, &nb.segment, self.cfg.samples);
                self.offer_upper(d, p, q);
            }

            let split_a = na.depth < level && !na.is_leaf();
            let split_b = nb.depth < level && !nb.is_leaf();
            if !split_a && !split_b {
                let mut bound = bound;
                if let (Some(ca), Some(cb)) = (na.cover(), nb.cover()) {
                    let (d, p, q) = closest_points(&ca.shape, &cb.shape);
                    let slack = ca.error + cb.error;
                    self.offer_upper(d + slack, p, q);
                    bound = bound.max(d - slack);
                }
                floor = floor.min(bound);
                reached.push(Candidate {
                    bound,
                    seq: 0,
                    a,
                    b,
                    fresh: false,
                });
                continue;
            }

            let (box_a, box_b) = (na.search_box(), nb.search_box());
            let expand_a = split_a && (!split_b || box_a.area() >= box_b.area());
            if expand_a {
                if let Some((l, r)) = na.children() {
                    for child in [l, r] {
                        let key = bound.max(h1.node(child).search_box().distance(&box_b));
                        self.push(key, child, b, true);
                    }
                }
            } else if let Some((l, r)) = nb.children() {
                for child in [l, r] {
                    let key = bound.max(box_a.distance(&h2.node(child).search_box()));
                    self.push(key, a, child, true);
                }
            }
        }

        self.lower = self.upper.min(self.lower.max(floor));
        reached.retain(|c| c.bound < self.upper);
        reached
    }

    fn solve(mut self) -> DistanceEstimate {
        let (h1, h2) = (self.h1, self.h2);
        let (r1, r2) = (h1.root(), h2.root());
        let bound = h1.node(r1).search_box().distance(&h2.node(r2).search_box());
        self.lower = bound.min(self.upper);

        let mut frontier = vec![Candidate {
            bound,
            seq: 0,
            a: r1,
            b: r2,
            fresh: false,
        }];
        for level in 1..=h1.depth().max(h2.depth()) {
            if self.upper <= self.lower {
                break;
            }
            frontier = self.refine(frontier, level);
            trace!(
                level,
                pairs = frontier.len(),
                lower = self.lower,
                upper = self.upper,
                "level refined"
            );
        }

        debug!(
            pops = self.pops,
            lower = self.lower,
            upper = self.upper,
            "min distance search done"
        );
        DistanceEstimate::from_bounds(self.lower, self.upper, self.witness, self.pops, true)
    }
}

/// Minimum distance between the curves of two hierarchies.
pub fn min_distance(h1: &Hierarchy, h2: &Hierarchy, cfg: &SearchCfg) -> DistanceEstimate {
    MinDistRunner::new(h1, h2, cfg).solve()
}

/// Build both hierarchies at `power` and run `min_distance`.
pub fn curve_min_distance(
    c1: &CubicBezier,
    c2: &CubicBezier,
    power: u32,
    cfg: &SearchCfg,
) -> Result<DistanceEstimate, InputError> {
    let h1 = Hierarchy::build(c1, power)?;
    let h2 = Hierarchy::build(c2, power)?;
    Ok(min_distance(&h1, &h2, cfg))
}
