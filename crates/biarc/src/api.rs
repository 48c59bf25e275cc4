//! Curated surface for callers (the CLI, benches, renderers).
//!
//! Prefer these re-exports over deep module paths; internals may move.

// Curves and validation
pub use crate::curve::rand::{draw_curve, draw_pair, CurveCfg, ReplayToken};
pub use crate::curve::{check_power, CubicBezier, InputError};
// Biarc fitting and leaf shapes
pub use crate::biarc::{
    arc_approx_error_bound, bezier_error_bound, choose_leaf_shape, closest_points, fit_biarc,
    shape_distance, Arc, Biarc, Segment, Shape,
};
// Hierarchy and minimum distance
pub use crate::bvh::{
    curve_min_distance, min_distance, sampled_min_distance, Aabb, Cover, DistanceEstimate,
    Hierarchy, Node, NodeId, NodeKind,
};
// Hausdorff and projection
pub use crate::hausdorff::{
    directed_hausdorff, hausdorff, hull_distance, project, sample_lower_bound, Projection,
};
// Configuration
pub use crate::cfg::{SearchCfg, MAX_POWER};
