use super::*;
use nalgebra::{vector, Vector2};
use proptest::prelude::*;

fn arch() -> CubicBezier {
    CubicBezier::new(
        vector![0.0, 0.0],
        vector![1.0, 2.0],
        vector![3.0, 2.0],
        vector![4.0, 0.0],
    )
}

fn curve_from(c: [f64; 8]) -> CubicBezier {
    CubicBezier::from_flat(&c).unwrap()
}

#[test]
fn eval_matches_closed_form() {
    // x(t) = 3t(1-t)^2 + 9t^2(1-t) + 4t^3, y(t) = 6t(1-t)
    let c = arch();
    for i in 0..=20 {
        let t = i as f64 / 20.0;
        let s = 1.0 - t;
        let x = 3.0 * t * s * s + 9.0 * t * t * s + 4.0 * t * t * t;
        let y = 6.0 * t * s;
        assert!((c.eval(t) - vector![x, y]).norm() < 1e-12);
    }
}

#[test]
fn subdivide_power_reconstructs_curve() {
    let c = arch();
    let parts = c.subdivide(4);
    assert_eq!(parts.len(), 16);
    for (k, part) in parts.iter().enumerate() {
        for j in 0..=4 {
            let local = j as f64 / 4.0;
            let global = (k as f64 + local) / 16.0;
            assert!((part.eval(local) - c.eval(global)).norm() < 1e-12);
        }
    }
    for w in parts.windows(2) {
        assert_eq!(w[0].end(), w[1].start());
    }
    assert_eq!(parts[0].start(), c.start());
    assert_eq!(parts[15].end(), c.end());
}

#[test]
fn subcurve_covers_interval() {
    let c = arch();
    let s = c.subcurve(0.7, 0.2);
    for j in 0..=10 {
        let u = j as f64 / 10.0;
        assert!((s.eval(u) - c.eval(0.2 + 0.5 * u)).norm() < 1e-12);
    }
    let whole = c.subcurve(0.0, 1.0);
    assert_eq!(whole, c);
    let dot = c.subcurve(1.0, 1.0);
    assert!(dot.is_point(0.0));
    assert!((dot.start() - c.end()).norm() < 1e-12);
}

#[test]
fn reversed_runs_backwards() {
    let c = arch();
    let r = c.reversed();
    assert!((r.eval(0.3) - c.eval(0.7)).norm() < 1e-12);
}

#[test]
fn boundary_validation() {
    let pts = vec![Vector2::new(0.0, 0.0); 3];
    assert_eq!(
        CubicBezier::from_points(&pts),
        Err(InputError::PointCount {
            expected: 4,
            actual: 3
        })
    );
    let mut coords = [0.0; 8];
    coords[5] = f64::NAN;
    assert_eq!(
        CubicBezier::from_flat(&coords),
        Err(InputError::NonFinite { index: 2 })
    );
    assert!(check_power(crate::cfg::MAX_POWER).is_ok());
    assert!(matches!(
        check_power(crate::cfg::MAX_POWER + 1),
        Err(InputError::PowerTooLarge { .. })
    ));
}

#[test]
fn sample_includes_endpoints() {
    let c = arch();
    let s = c.sample(10);
    assert_eq!(s.len(), 11);
    assert_eq!(s[0], c.start());
    assert_eq!(s[10], c.end());
}

proptest! {
    #[test]
    fn endpoints_are_exact(coords in prop::array::uniform8(-1e3f64..1e3)) {
        let c = curve_from(coords);
        prop_assert_eq!(c.eval(0.0), c.p[0]);
        prop_assert_eq!(c.eval(1.0), c.p[3]);
    }

    #[test]
    fn split_is_continuous(coords in prop::array::uniform8(-1e3f64..1e3), t in 0.001f64..0.999) {
        let c = curve_from(coords);
        let (l, r) = c.split(t);
        prop_assert_eq!(l.eval(1.0), r.eval(0.0));
        let scale = 1.0 + c.p.iter().map(|q| q.norm()).fold(0.0, f64::max);
        prop_assert!((l.eval(1.0) - c.eval(t)).norm() < 1e-12 * scale);
    }

    #[test]
    fn split_halves_reproduce_parametrization(
        coords in prop::array::uniform8(-1e3f64..1e3),
        t in 0.05f64..0.95,
        u in 0.0f64..1.0,
    ) {
        let c = curve_from(coords);
        let (l, r) = c.split(t);
        let scale = 1.0 + c.p.iter().map(|q| q.norm()).fold(0.0, f64::max);
        prop_assert!((l.eval(u) - c.eval(t * u)).norm() < 1e-10 * scale);
        prop_assert!((r.eval(u) - c.eval(t + (1.0 - t) * u)).norm() < 1e-10 * scale);
    }
}
