//! Tolerances and search configuration.
//!
//! Policy
//! - Geometric tolerances are fixed constants. They guard degenerate
//!   constructions (coincident points, parallel lines) and are not meant to be
//!   tuned per query.
//! - Search knobs (sample counts, convergence tolerances, iteration caps) live
//!   in `SearchCfg` so callers can trade accuracy for time explicitly.

/// Below this length a direction vector is treated as zero.
pub const EPS_DEGENERATE: f64 = 1e-6;
/// Two unit directions whose cross product is below this are parallel.
pub const EPS_PARALLEL: f64 = 1e-6;
/// Arcs sweeping at most this many radians are replaced by their chord.
pub const MIN_ARC_SWEEP: f64 = 1e-3;
/// Arcs sweeping more than this are replaced by their chord.
pub const MAX_ARC_SWEEP: f64 = std::f64::consts::FRAC_PI_2;
/// Largest accepted subdivision power (`2^(power+1)` leaves per hierarchy).
pub const MAX_POWER: u32 = 12;

/// Branch-and-bound configuration shared by the distance queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchCfg {
    /// Uniform samples per curve for sampled upper/lower bounds (`samples + 1` points).
    pub samples: usize,
    /// Bound gap at which a point projection stops.
    pub projection_tol: f64,
    /// Bound gap at which the Hausdorff search stops.
    pub hausdorff_tol: f64,
    /// Consecutive pops without a better upper bound before the Hausdorff search gives up.
    pub max_stale_pops: usize,
    /// Hard cap on queue pops inside a single projection.
    pub max_projection_pops: usize,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            samples: 10,
            projection_tol: 1e-5,
            hausdorff_tol: 1e-5,
            max_stale_pops: 100,
            max_projection_pops: 10_000,
        }
    }
}
