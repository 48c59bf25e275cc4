//! Biarc approximation of cubic segments.
//!
//! Purpose
//! - Replace a cubic segment by two G1-joined circular arcs (falling back to
//!   straight segments when the construction degenerates) together with a
//!   certified bound on the deviation.
//! - Provide the exact closest-point routine between two such shapes, used at
//!   the leaves of the minimum-distance search.
//!
//! Guarantees
//! - Every `Shape::Arc` produced here has a finite radius, `begin <= end` and
//!   a sweep of at most one full turn.
//! - `arc_approx_error_bound(shape, seg)` bounds `|seg(t) - approx(t)|` for the
//!   Bézier form of `shape`, plus the arc's deviation from that form at its
//!   midpoint; leaf boxes are inflated by this value.

mod distance;
mod fit;
mod shape;

pub use distance::{closest_on_segment, closest_points, point_segment_distance, shape_distance};
pub use fit::{biarc_inflection, end_tangents, fit_biarc, set_arc_center, Biarc};
pub use shape::{
    arc_approx_error_bound, bezier_error_bound, choose_leaf_shape, Arc, Segment, Shape,
};

#[cfg(test)]
mod tests;
