//! Property-based tests for the segmentation formulas using proptest.
//!
//! Covers: the scale/segment inverse relationship, domain rejection of
//! non-positive scales, and determinism of the pure functions.

use nmax_core::{
    Constants, SpiralParams, effective_pi, sample_range, scale_to_segments, scan,
    segments_to_scale,
};
use proptest::prelude::*;

// ── Scale ↔ Segments ─────────────────────────────────────────────────

proptest! {
    /// l_p · φ^k maps back to k for integer k.
    #[test]
    fn integer_steps_invert(k in -100i32..300) {
        let c = Constants::physical();
        let s0 = c.planck_length * c.phi.powi(k);
        let n = scale_to_segments(&c, s0).unwrap();
        prop_assert!((n - f64::from(k)).abs() < 1e-9, "k={} n={}", k, n);
    }

    /// Any positive scale yields a finite count that maps back to itself.
    #[test]
    fn positive_scales_roundtrip(exp in -60.0f64..30.0) {
        let c = Constants::physical();
        let s0 = 10f64.powf(exp);
        let n = scale_to_segments(&c, s0).unwrap();
        prop_assert!(n.is_finite());
        let back = segments_to_scale(&c, n);
        prop_assert!(((back - s0) / s0).abs() < 1e-9);
    }

    /// Non-positive scales are always rejected.
    #[test]
    fn non_positive_rejected(s0 in -1e30f64..=0.0) {
        let c = Constants::physical();
        prop_assert!(scale_to_segments(&c, s0).is_err());
    }

    /// Larger scales need more steps.
    #[test]
    fn segments_increase_with_scale(a in 1e-40f64..1e10, factor in 1.001f64..1e6) {
        let c = Constants::physical();
        let na = scale_to_segments(&c, a).unwrap();
        let nb = scale_to_segments(&c, a * factor).unwrap();
        prop_assert!(nb > na);
    }
}

// ── Effective-π & Scanner ────────────────────────────────────────────

proptest! {
    /// Identical inputs give bit-identical outputs.
    #[test]
    fn effective_pi_deterministic(n in -50.0f64..150.0, r0 in 0.1f64..10.0, lambda in 0.1f64..3.0) {
        let c = Constants::physical();
        let p = SpiralParams { r0, lambda };
        let a = effective_pi(&c, n, p);
        let b = effective_pi(&c, n, p);
        prop_assert_eq!(a.to_bits(), b.to_bits());
    }

    /// The reported point is the first one below the tolerance.
    #[test]
    fn scan_reports_first_flat_step(end in 2u32..120, eps_exp in -20i32..-1) {
        let c = Constants::physical();
        let samples = sample_range(&c, SpiralParams::default(), 1..end);
        let eps = 10f64.powi(eps_exp);
        let result = scan(&samples, eps).unwrap();
        match result.point() {
            Some(p) => {
                prop_assert!(p.difference < eps);
                for w in samples[..=p.index].windows(2) {
                    prop_assert!((w[1].value - w[0].value).abs() >= eps);
                }
            }
            None => {
                for w in samples.windows(2) {
                    prop_assert!((w[1].value - w[0].value).abs() >= eps);
                }
            }
        }
    }
}
