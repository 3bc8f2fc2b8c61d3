// tests/geometry_properties.rs
//
// Property checks for generated snapshots, swept over many seeds and scales.
// Run with: cargo test --test geometry_properties

use crossview::geometry::{
    GeometryError, GeometrySnapshot, MAX_SCALE, VectorName, Vector3, cross,
};
use crossview::{GeometryConfig, generate};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SEEDS: u64 = 200;
const SCALES: [f32; 5] = [1.0, 5.0, 0.25, -2.0, 37.5];

fn approx_eq(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

fn for_each_snapshot(mut check: impl FnMut(f32, &GeometrySnapshot)) {
    for scale in SCALES {
        for seed in 0..SEEDS {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let s = generate(1.0, scale, &mut rng)
                .unwrap_or_else(|e| panic!("seed {seed} scale {scale}: {e}"));
            check(scale, &s);
        }
    }
}

#[test]
fn base_vectors_have_length_abs_scale() {
    for_each_snapshot(|scale, s| {
        let tol = 1e-5 * scale.abs().max(1.0);
        assert!(
            approx_eq(s.vector_a().length(), scale.abs(), tol),
            "|a| = {} for scale {scale}",
            s.vector_a().length()
        );
        assert!(approx_eq(s.vector_b().length(), scale.abs(), tol));
    });
}

#[test]
fn cross_is_perpendicular_to_both_base_vectors() {
    for_each_snapshot(|scale, s| {
        let tol = 1e-5 * scale.abs().powi(3).max(1.0);
        let c = s.cross();
        assert!(c.dot(s.vector_a()).abs() <= tol, "c·a = {}", c.dot(s.vector_a()));
        assert!(c.dot(s.vector_b()).abs() <= tol, "c·b = {}", c.dot(s.vector_b()));
    });
}

#[test]
fn cross_length_is_product_of_lengths_times_sine() {
    for_each_snapshot(|_, s| {
        let la = s.vector_a().length();
        let lb = s.vector_b().length();
        let expected = la * lb * s.angle().sin();
        let tol = 2e-3 * (la * lb).max(1.0);
        assert!(
            approx_eq(s.cross().length(), expected, tol),
            "|c| = {} vs {}",
            s.cross().length(),
            expected
        );

        // Lagrange's identity, free of the acos round trip.
        let lhs = s.cross().length_squared();
        let rhs = la * la * lb * lb - s.vector_a().dot(s.vector_b()).powi(2);
        assert!(approx_eq(lhs, rhs, 1e-4 * (la * la * lb * lb).max(1.0)));
    });
}

#[test]
fn closing_edges_reach_base_vectors() {
    for_each_snapshot(|scale, s| {
        let tol = 1e-5 * scale.abs().max(1.0);
        assert!((s.sum() + s.sum_to_a() - s.vector_a()).length() <= tol);
        assert!((s.sum() + s.sum_to_b() - s.vector_b()).length() <= tol);
    });
}

#[test]
fn swapping_base_vectors_negates_cross() {
    for_each_snapshot(|_, s| {
        assert_eq!(cross(s.vector_b(), s.vector_a()), -s.cross());
        assert_eq!(s.swapped().cross(), -s.cross());
    });
}

#[test]
fn right_hand_rule_examples() {
    let unit =
        GeometrySnapshot::from_vectors(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
    assert_eq!(unit.cross(), Vector3::new(0.0, 0.0, 1.0));

    let scaled =
        GeometrySnapshot::from_vectors(Vector3::new(2.0, 0.0, 0.0), Vector3::new(0.0, 3.0, 0.0));
    assert_eq!(scaled.cross(), Vector3::new(0.0, 0.0, 6.0));
}

#[test]
fn zero_range_always_fails_on_vector_a() {
    for seed in 0..16 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        assert_eq!(
            generate(0.0, 5.0, &mut rng),
            Err(GeometryError::DegenerateVector { which: VectorName::A })
        );
    }
}

#[test]
fn range_only_affects_sampling_not_length() {
    // Directions are normalized, so any positive range yields |a| == |scale|.
    for range in [1e-3, 0.5, 1.0, 1e3] {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let s = generate(range, 5.0, &mut rng).unwrap();
        assert!(approx_eq(s.vector_a().length(), 5.0, 1e-4), "range {range}");
    }
}

#[test]
fn extreme_ranges_still_give_scale_length_vectors() {
    for range in [1e-30, 1e-25, f32::MIN_POSITIVE, 1e30, f32::MAX / 2.0, f32::MAX] {
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let s = generate(range, 5.0, &mut rng)
                .unwrap_or_else(|e| panic!("range {range:e} seed {seed}: {e}"));
            assert!(approx_eq(s.vector_a().length(), 5.0, 1e-4), "range {range:e}");
            assert!(approx_eq(s.vector_b().length(), 5.0, 1e-4), "range {range:e}");
            assert!(s.cross().is_finite());
        }
    }
}

#[test]
fn largest_scale_keeps_every_derived_value_finite() {
    for scale in [MAX_SCALE, -MAX_SCALE] {
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let s = generate(1.0, scale, &mut rng).unwrap();
            for v in [s.vector_a(), s.vector_b(), s.sum(), s.sum_to_a(), s.sum_to_b(), s.cross()] {
                assert!(v.is_finite(), "scale {scale:e} seed {seed}: {v:?}");
            }
            assert!(s.area().is_finite());

            // Perpendicularity, measured in units of |scale|.
            let c = s.cross() / (scale * scale);
            let (a, b) = (s.vector_a() / scale, s.vector_b() / scale);
            assert!(c.dot(a).abs() <= 1e-4, "c·a = {}", c.dot(a));
            assert!(c.dot(b).abs() <= 1e-4, "c·b = {}", c.dot(b));
        }
    }
}

#[test]
fn scales_past_the_limit_are_rejected() {
    for scale in [1e20, -1e20, f32::MAX, f32::NEG_INFINITY] {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(generate(1.0, scale, &mut rng), Err(GeometryError::InvalidScale(scale)));
        assert_eq!(
            GeometryConfig::new(1.0).with_scale(scale).validate(),
            Err(GeometryError::InvalidScale(scale))
        );
    }
}

#[test]
fn config_generate_matches_free_function() {
    let cfg = GeometryConfig::new(1.0).with_seed(2024);
    let from_cfg = cfg.generate(&mut cfg.rng()).unwrap();
    let direct = generate(1.0, 5.0, &mut ChaCha8Rng::seed_from_u64(2024)).unwrap();
    assert_eq!(from_cfg, direct);
}
