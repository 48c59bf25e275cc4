//! Vector and cubic Bézier primitives.
//!
//! Purpose
//! - Provide the curve value type used by every query: Bernstein evaluation,
//!   de Casteljau splitting at arbitrary parameters, repeated bisection.
//! - Keep degenerate-vector handling explicit (`try_unit` returns `Option`).
//!
//! Guarantees
//! - `eval(0)` and `eval(1)` return the end control points bit-for-bit.
//! - After `split(t)`, the left curve's last control point and the right
//!   curve's first control point are the same value.

pub mod rand;
mod types;
pub mod util;

pub use types::{check_power, CubicBezier, InputError};
pub use util::{
    angle_of, bisector, cross, division_point, line_intersection, midpoint, perp, try_unit, Line2,
};

#[cfg(test)]
mod tests;
