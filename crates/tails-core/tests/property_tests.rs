//! Property-based tests for sample utilities and special functions

use proptest::prelude::*;
use tails_core::math::{hurwitz_zeta, ln_upper_incomplete_gamma};
use tails_core::sample::{distinct_with_first_index, floor_likelihoods, is_sorted, sorted};
use tails_core::{Cutoffs, LIKELIHOOD_FLOOR};

proptest! {
    #[test]
    fn prop_sorted_is_sorted_permutation(data in prop::collection::vec(-1e6f64..1e6, 0..100)) {
        let s = sorted(&data);
        prop_assert!(is_sorted(&s));
        let mut expected = data.clone();
        expected.sort_by(f64::total_cmp);
        prop_assert_eq!(s.as_ref(), expected.as_slice());
    }

    #[test]
    fn prop_first_indices_point_at_first_occurrence(mut data in prop::collection::vec(0u8..20, 1..80)) {
        data.sort_unstable();
        let values: Vec<f64> = data.iter().map(|&x| f64::from(x)).collect();
        let (distinct, indices) = distinct_with_first_index(&values);
        prop_assert_eq!(distinct.len(), indices.len());
        prop_assert!(distinct.windows(2).all(|w| w[0] < w[1]));
        for (&v, &i) in distinct.iter().zip(&indices) {
            prop_assert_eq!(values[i], v);
            prop_assert!(i == 0 || values[i - 1] < v);
        }
    }

    #[test]
    fn prop_floor_leaves_only_positive_finite(mut l in prop::collection::vec(
        prop_oneof![Just(0.0), Just(-1.0), Just(f64::NAN), Just(f64::INFINITY), 1e-300f64..1.0],
        0..50,
    )) {
        let before = l.clone();
        floor_likelihoods(&mut l);
        for (after, before) in l.iter().zip(&before) {
            prop_assert!(*after > 0.0 && after.is_finite());
            if before.is_finite() && *before > 0.0 {
                prop_assert_eq!(after, before);
            } else {
                prop_assert_eq!(*after, LIKELIHOOD_FLOOR);
            }
        }
    }

    #[test]
    fn prop_filter_respects_cutoffs(
        data in prop::collection::vec(0.0f64..100.0, 0..60),
        xmin in 0.1f64..50.0,
        width in prop::option::of(0.0f64..50.0),
    ) {
        let cutoffs = Cutoffs::bounded(xmin, width.map(|w| xmin + w));
        let kept = cutoffs.filter(&data);
        prop_assert!(kept.iter().all(|&x| cutoffs.contains(x)));
        prop_assert_eq!(kept.len(), data.iter().filter(|&&x| cutoffs.contains(x)).count());
    }

    #[test]
    fn prop_zeta_shift_identity(s in 1.1f64..6.0, q in 0.5f64..200.0) {
        let diff = hurwitz_zeta(s, q) - hurwitz_zeta(s, q + 1.0);
        let expected = q.powf(-s);
        prop_assert!(((diff - expected) / expected).abs() < 1e-6);
    }

    #[test]
    fn prop_incomplete_gamma_decreasing_in_x(s in -3.0f64..3.0, x in 0.01f64..20.0) {
        let here = ln_upper_incomplete_gamma(s, x);
        let further = ln_upper_incomplete_gamma(s, x * 1.1);
        prop_assert!(here.is_finite());
        prop_assert!(further < here);
    }
}
