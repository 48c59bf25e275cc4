//! Reproducible random cubic curves (replay tokens).
//!
//! Model
//! - Control points are drawn uniformly from an axis-aligned box, optionally
//!   after placing the endpoints a minimum distance apart so the biarc chord
//!   is well defined.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG,
//!   so the `index`-th curve of a run can be regenerated on its own.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::CubicBezier;

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct CurveCfg {
    /// Lower-left corner of the sampling box.
    pub min: Vector2<f64>,
    /// Upper-right corner of the sampling box.
    pub max: Vector2<f64>,
    /// Minimum endpoint separation; redrawn up to a few times, then accepted.
    pub min_chord: f64,
}

impl Default for CurveCfg {
    fn default() -> Self {
        Self {
            min: Vector2::new(0.0, 0.0),
            max: Vector2::new(1000.0, 1000.0),
            min_chord: 50.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }

    /// Token for the next draw of the same run.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }
}

fn draw_point<R: Rng>(rng: &mut R, cfg: &CurveCfg) -> Vector2<f64> {
    let lo = cfg.min.inf(&cfg.max);
    let hi = cfg.min.sup(&cfg.max);
    Vector2::new(
        lo.x + rng.gen::<f64>() * (hi.x - lo.x),
        lo.y + rng.gen::<f64>() * (hi.y - lo.y),
    )
}

/// Draw one curve.
pub fn draw_curve(cfg: CurveCfg, tok: ReplayToken) -> CubicBezier {
    let mut rng = tok.to_std_rng();
    let p0 = draw_point(&mut rng, &cfg);
    let mut p3 = draw_point(&mut rng, &cfg);
    for _ in 0..8 {
        if (p3 - p0).norm() >= cfg.min_chord {
            break;
        }
        p3 = draw_point(&mut rng, &cfg);
    }
    let p1 = draw_point(&mut rng, &cfg);
    let p2 = draw_point(&mut rng, &cfg);
    CubicBezier::new(p0, p1, p2, p3)
}

/// Draw two curves from consecutive tokens.
pub fn draw_pair(cfg: CurveCfg, tok: ReplayToken) -> (CubicBezier, CubicBezier) {
    (draw_curve(cfg, tok), draw_curve(cfg, tok.next()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproducible_draw() {
        let tok = ReplayToken { seed: 42, index: 7 };
        let a = draw_curve(CurveCfg::default(), tok);
        let b = draw_curve(CurveCfg::default(), tok);
        assert_eq!(a, b);
        let c = draw_curve(CurveCfg::default(), tok.next());
        assert_ne!(a, c);
    }

    #[test]
    fn points_stay_in_box() {
        let cfg = CurveCfg {
            min: Vector2::new(-1.0, -2.0),
            max: Vector2::new(1.0, 2.0),
            min_chord: 0.5,
        };
        for index in 0..50 {
            let c = draw_curve(cfg, ReplayToken { seed: 3, index });
            for q in c.p {
                assert!((-1.0..=1.0).contains(&q.x));
                assert!((-2.0..=2.0).contains(&q.y));
            }
        }
    }
}
