use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use nalgebra::{vector, Vector2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::curve::CubicBezier;

const KAPPA: f64 = 0.552_284_749_830_793_4;

fn quarter_circle() -> CubicBezier {
    CubicBezier::new(
        vector![1.0, 0.0],
        vector![1.0, KAPPA],
        vector![KAPPA, 1.0],
        vector![0.0, 1.0],
    )
}

fn unit_arc(begin: f64, end: f64) -> Arc {
    Arc {
        center: Vector2::zeros(),
        radius: 1.0,
        begin,
        end,
    }
}

#[test]
fn tangents_skip_coincident_points() {
    let c = CubicBezier::new(
        vector![0.0, 0.0],
        vector![0.0, 0.0],
        vector![2.0, 0.0],
        vector![2.0, 0.0],
    );
    let (t0, t1) = end_tangents(&c);
    assert!((t0 - vector![1.0, 0.0]).norm() < 1e-12);
    assert!((t1 - vector![1.0, 0.0]).norm() < 1e-12);

    let dot = CubicBezier::point(vector![3.0, 3.0]);
    assert_eq!(end_tangents(&dot), (vector![0.0, 1.0], vector![1.0, 0.0]));
}

#[test]
fn quarter_circle_fits_two_eighth_arcs() {
    let c = quarter_circle();
    let b = fit_biarc(&c);
    let s = std::f64::consts::FRAC_1_SQRT_2;
    assert!((b.inflection - vector![s, s]).norm() < 1e-9);

    let (Shape::Arc(first), Shape::Arc(second)) = (b.first, b.second) else {
        panic!("expected two arcs, got {b:?}");
    };
    for a in [first, second] {
        assert!(a.center.norm() < 1e-9);
        assert!((a.radius - 1.0).abs() < 1e-9);
    }
    assert!(first.begin.abs() < 1e-9);
    assert!((first.end - FRAC_PI_4).abs() < 1e-9);
    assert!((second.begin - FRAC_PI_4).abs() < 1e-9);
    assert!((second.end - FRAC_PI_2).abs() < 1e-9);

    let (left, right) = c.bisect();
    let (_, e1) = choose_leaf_shape(b.first, &left);
    let (_, e2) = choose_leaf_shape(b.second, &right);
    assert!(e1 < 0.03 && e2 < 0.03, "errors {e1} {e2}");
}

#[test]
fn clockwise_curve_gets_counterclockwise_arcs() {
    let c = quarter_circle().reversed();
    let b = fit_biarc(&c);
    for shape in [b.first, b.second] {
        let Shape::Arc(a) = shape else {
            panic!("expected arc, got {shape:?}");
        };
        assert!(a.begin <= a.end);
        assert!((a.sweep() - FRAC_PI_4).abs() < 1e-9);
    }
    // the first arc starts at the curve start, stored counterclockwise
    let Shape::Arc(a) = b.first else { unreachable!() };
    assert!((a.end_point() - c.start()).norm() < 1e-9);
}

#[test]
fn straight_curve_degenerates_to_lines() {
    let c = CubicBezier::new(
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![2.0, 0.0],
        vector![3.0, 0.0],
    );
    let b = fit_biarc(&c);
    assert!(b.first.is_line() && b.second.is_line());
    assert!((b.inflection - vector![1.5, 0.0]).norm() < 1e-12);
    let (left, _) = c.bisect();
    let (shape, err) = choose_leaf_shape(b.first, &left);
    assert!(shape.is_line());
    assert!(err < 1e-12);
}

#[test]
fn arc_box_includes_crossed_extremes() {
    let bb = unit_arc(-0.1, PI + 0.1).aabb();
    assert!((bb.min.x + 1.0).abs() < 1e-12);
    assert!((bb.max.x - 1.0).abs() < 1e-12);
    assert!((bb.max.y - 1.0).abs() < 1e-12);
    assert!((bb.min.y + 0.1f64.sin()).abs() < 1e-12);

    // same extremes on a later winding
    let bb = unit_arc(TAU - 0.1, TAU + 0.1).aabb();
    assert!((bb.max.x - 1.0).abs() < 1e-12);
    assert!(bb.min.x > 0.99);
}

#[test]
fn quarter_arc_bezier_deviation() {
    let a = Shape::Arc(unit_arc(0.0, FRAC_PI_2));
    let bz = a.to_bezier();
    assert!((bz.start() - vector![1.0, 0.0]).norm() < 1e-12);
    assert!((bz.end() - vector![0.0, 1.0]).norm() < 1e-12);
    // degree-elevated conic: midpoint at (0.75, 0.75)
    let expected = (0.75f64 * 0.75 * 2.0).sqrt() - 1.0;
    assert!((arc_approx_error_bound(&a, &bz) - expected).abs() < 1e-12);
}

#[test]
fn line_bezier_is_exact() {
    let s = Shape::Line(Segment {
        start: vector![1.0, 2.0],
        end: vector![4.0, -2.0],
    });
    let bz = s.to_bezier();
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!((bz.eval(t) - s.point_at(t)).norm() < 1e-12);
    }
    assert!(arc_approx_error_bound(&s, &bz) < 1e-12);
    assert_eq!(bezier_error_bound(&bz, &bz.reversed()), 0.0);
}

#[test]
fn wide_and_tiny_arcs_become_chords() {
    let seg = CubicBezier::new(
        vector![1.0, 0.0],
        vector![1.0, 1.3],
        vector![-1.0, 1.3],
        vector![-1.0, 0.0],
    );
    let (shape, _) = choose_leaf_shape(Shape::Arc(unit_arc(0.0, PI)), &seg);
    assert_eq!(
        shape,
        Shape::Line(Segment {
            start: seg.start(),
            end: seg.end()
        })
    );
    let (shape, _) = choose_leaf_shape(Shape::Arc(unit_arc(0.0, 1e-4)), &seg);
    assert!(shape.is_line());
}

#[test]
fn parallel_segments() {
    let a = Shape::Line(Segment {
        start: vector![0.0, 0.0],
        end: vector![0.0, 3.0],
    });
    let b = Shape::Line(Segment {
        start: vector![5.0, 0.0],
        end: vector![5.0, 3.0],
    });
    assert!((shape_distance(&a, &b) - 5.0).abs() < 1e-12);
    assert!((point_segment_distance(vector![1.0, 5.0], vector![0.0, 0.0], vector![0.0, 3.0])
        - 5f64.sqrt())
    .abs()
        < 1e-12);
}

#[test]
fn crossing_shapes_touch() {
    let x = Shape::Line(Segment {
        start: vector![-1.0, -1.0],
        end: vector![1.0, 1.0],
    });
    let y = Shape::Line(Segment {
        start: vector![-1.0, 1.0],
        end: vector![1.0, -1.0],
    });
    let (d, p, q) = closest_points(&x, &y);
    assert_eq!(d, 0.0);
    assert!(p.norm() < 1e-12 && q.norm() < 1e-12);

    let upper = Shape::Arc(unit_arc(0.0, PI));
    let shifted = Shape::Arc(Arc {
        center: vector![1.0, 0.0],
        radius: 1.0,
        begin: FRAC_PI_2,
        end: 3.0 * FRAC_PI_2,
    });
    assert_eq!(shape_distance(&upper, &shifted), 0.0);
    assert_eq!(shape_distance(&upper, &y), 0.0);
}

#[test]
fn concentric_arcs_facing_away() {
    let a = Shape::Arc(unit_arc(0.0, FRAC_PI_2));
    let b = Shape::Arc(Arc {
        center: Vector2::zeros(),
        radius: 2.0,
        begin: PI,
        end: 1.5 * PI,
    });
    assert!((shape_distance(&a, &b) - 5f64.sqrt()).abs() < 1e-12);
}

fn random_shape(rng: &mut StdRng) -> Shape {
    if rng.gen_bool(0.5) {
        let begin = rng.gen_range(-PI..PI);
        Shape::Arc(Arc {
            center: vector![rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)],
            radius: rng.gen_range(0.1..5.0),
            begin,
            end: begin + rng.gen_range(0.01..TAU),
        })
    } else {
        Shape::Line(Segment {
            start: vector![rng.gen_range(-8.0..8.0), rng.gen_range(-8.0..8.0)],
            end: vector![rng.gen_range(-8.0..8.0), rng.gen_range(-8.0..8.0)],
        })
    }
}

fn spacing(s: &Shape, n: usize) -> f64 {
    match s {
        Shape::Arc(a) => a.radius * a.sweep() / n as f64,
        Shape::Line(l) => l.length() / n as f64,
    }
}

#[test]
fn exact_distance_matches_dense_sampling() {
    const N: usize = 600;
    let mut rng = StdRng::seed_from_u64(0xb1a2c);
    for _ in 0..40 {
        let a = random_shape(&mut rng);
        let b = random_shape(&mut rng);
        let pa: Vec<_> = (0..=N).map(|i| a.point_at(i as f64 / N as f64)).collect();
        let pb: Vec<_> = (0..=N).map(|i| b.point_at(i as f64 / N as f64)).collect();
        let sampled = pa
            .iter()
            .flat_map(|p| pb.iter().map(move |q| (p - q).norm()))
            .fold(f64::INFINITY, f64::min);

        let (d, wa, wb) = closest_points(&a, &b);
        assert!(d <= sampled + 1e-9, "{a:?} {b:?}: exact {d} > sampled {sampled}");
        assert!(
            sampled <= d + spacing(&a, N) + spacing(&b, N) + 1e-9,
            "{a:?} {b:?}: exact {d} sampled {sampled}"
        );
        assert!(((wa - wb).norm() - d).abs() < 1e-9);

        let (d_swapped, _, _) = closest_points(&b, &a);
        assert!((d - d_swapped).abs() < 1e-9);
    }
}
