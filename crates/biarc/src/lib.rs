//! Biarc hierarchies and certified distance queries between cubic Bézier curves.
//!
//! Queries
//! - `bvh::min_distance`: minimum Euclidean distance, best-first over two
//!   arc hierarchies.
//! - `hausdorff::hausdorff` / `hausdorff::directed_hausdorff`: two- and
//!   one-sided Hausdorff distance, best-first over parameter intervals.
//!
//! Every query returns a `DistanceEstimate` bracketing the answer; the crate does
//! no I/O and installs no logging subscriber (events go through `tracing`).

pub mod api;
pub mod biarc;
pub mod bvh;
pub mod cfg;
pub mod curve;
pub mod hausdorff;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::SearchCfg;
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::biarc::{Arc, Segment, Shape};
    pub use crate::bvh::{curve_min_distance, min_distance, DistanceEstimate, Hierarchy};
    pub use crate::cfg::SearchCfg;
    pub use crate::curve::rand::{CurveCfg, ReplayToken};
    pub use crate::curve::{CubicBezier, InputError};
    pub use crate::hausdorff::{directed_hausdorff, hausdorff};
    pub use nalgebra::Vector2 as Vec2;
}
