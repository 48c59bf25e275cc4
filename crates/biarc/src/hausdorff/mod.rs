//! Hausdorff distance between two cubics.
//!
//! Purpose
//! - Project points onto a curve with a certified gap (`project`), using the
//!   control-polygon hull as the lower bound.
//! - Bracket the one- or two-sided Hausdorff distance with a max-queue over
//!   parameter intervals of the searched curve(s).
//!
//! Bounds
//! - Lower: largest projection distance among samples of every interval
//!   visited so far (`sample_lower_bound`), reported minus `projection_tol`
//!   since each projection may overshoot by that much.
//! - Upper: per interval, the control-point deviation between the interval's
//!   piece and the target piece spanned by the projections of its endpoints,
//!   never above the parent's value; globally the largest queued value.
//!
//! Termination
//! - The search runs in stages `0..=power`, stage `k` seeded with `2^k`
//!   intervals per searched curve and capped by the upper bound so far.
//! - A stage ends when the largest queued upper bound falls within
//!   `hausdorff_tol` of the lower bound, or after `max_stale_pops` consecutive
//!   pops fail to lower it (`converged = false` if the last stage ends so).

mod hull;
mod search;

pub use hull::{convex_hull, hull_distance};
pub use search::{directed_hausdorff, hausdorff, project, sample_lower_bound, Projection};
