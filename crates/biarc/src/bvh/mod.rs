//! Bounding-volume hierarchy of biarc leaves and the minimum-distance search.
//!
//! Purpose
//! - Turn a cubic into a binary tree of boxes whose leaves carry an arc or a
//!   segment plus its certified error, with each leaf box inflated by that error
//!   so it contains the true curve piece.
//! - Answer minimum-distance queries between two trees by best-first
//!   branch-and-bound on box distances.
//!
//! Why this design
//! - Nodes live in a flat arena addressed by `NodeId`; children are explicit
//!   in `NodeKind`, so traversal needs no ownership juggling and the tree can be
//!   handed to a renderer as a plain slice.
//! - Search knobs come from `SearchCfg`; the queue is a `BinaryHeap` ordered by
//!   `f64::total_cmp`.
//!
//! Search outline (`min_distance`)
//! - Every non-root node keeps a `Cover`: the half of its parent's biarc with
//!   its error and inflated box. Pruning uses these boxes, which do not depend
//!   on the tree's `power`.
//! - Upper bound: sampled distance of the whole curves, refined by sampling
//!   each new pair and by cover distances plus both errors.
//! - Lower bound: after each level, the smallest bound among the pairs that
//!   reached it, where a pair's bound is the larger of its box distance and
//!   the cover distance minus both errors.
//! - Stop after the leaf level, or once the upper bound meets the lower.

mod build;
mod mindist;
mod types;

pub use mindist::{curve_min_distance, min_distance, sampled_min_distance};
pub use types::{Aabb, Cover, DistanceEstimate, Hierarchy, Node, NodeId, NodeKind};
